//! Frequency tables per funnel stage, demographics, and supplementary questions.
//!
//! Columns the export does not contain are skipped silently; the resulting
//! maps simply lack those tables and downstream renderers branch on that.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::constants::answers;
use crate::constants::columns;
use crate::constants::loader::{EMPTY_MARKER, MULTI_SELECT_DELIMITER, SKIPPED_MARKER};
use crate::dimension::Dimension;
use crate::metrics::{CrossTab, FrequencyTable};
use crate::source::SurveyTable;
use crate::types::TableKey;

/// Named frequency tables in insertion order.
pub type Tables = IndexMap<TableKey, FrequencyTable>;

/// How a column's answers are counted.
#[derive(Clone, Copy, Debug)]
enum Selection {
    Single,
    Multi { skip: Option<&'static str> },
}

#[derive(Clone, Copy, Debug)]
struct TableSpec {
    key: TableKey,
    column: &'static str,
    selection: Selection,
}

const fn single(key: TableKey, column: &'static str) -> TableSpec {
    TableSpec {
        key,
        column,
        selection: Selection::Single,
    }
}

const fn multi(key: TableKey, column: &'static str, skip: Option<&'static str>) -> TableSpec {
    TableSpec {
        key,
        column,
        selection: Selection::Multi { skip },
    }
}

fn stage_specs(dimension: Dimension) -> &'static [TableSpec] {
    const SENSE: &[TableSpec] = &[single("awareness", columns::AWARENESS)];
    const INTEREST: &[TableSpec] = &[single("attraction", columns::ATTRACTION)];
    const COMMUNICATION: &[TableSpec] = &[
        single("interaction", columns::INTERACTION),
        multi("interaction_types", columns::INTERACTION_TYPES, None),
    ];
    const ACTION: &[TableSpec] = &[
        single("purchase", columns::PURCHASE),
        multi("channels", columns::PURCHASE_CHANNELS, Some(SKIPPED_MARKER)),
        multi("barriers", columns::PURCHASE_BARRIERS, Some(SKIPPED_MARKER)),
    ];
    const SHARE: &[TableSpec] = &[
        single("satisfaction", columns::SATISFACTION),
        multi("improvements", columns::IMPROVEMENTS, None),
    ];
    match dimension {
        Dimension::Sense => SENSE,
        Dimension::Interest => INTEREST,
        Dimension::Communication => COMMUNICATION,
        Dimension::Action => ACTION,
        Dimension::Share => SHARE,
    }
}

const DEMOGRAPHIC_SPECS: &[TableSpec] = &[
    single("gender", columns::GENDER),
    single("age", columns::AGE),
    single("occupation", columns::OCCUPATION),
    single("income", columns::INCOME),
    single("social_media_usage", columns::SOCIAL_MEDIA_USAGE),
];

fn frequency(table: &SurveyTable, spec: &TableSpec) -> Option<FrequencyTable> {
    let Some(values) = table.present_values(spec.column) else {
        debug!("[sicas:analysis] column missing for '{}', skipping", spec.key);
        return None;
    };
    Some(match spec.selection {
        Selection::Single => FrequencyTable::single_select(values),
        Selection::Multi { skip } => {
            FrequencyTable::multi_select(values, MULTI_SELECT_DELIMITER, skip)
        }
    })
}

fn collect(table: &SurveyTable, specs: &[TableSpec]) -> Tables {
    specs
        .iter()
        .filter_map(|spec| frequency(table, spec).map(|freq| (spec.key, freq)))
        .collect()
}

/// Frequency tables grouped by funnel stage.
///
/// Every stage is present (in funnel order), possibly with no tables.
#[derive(Clone, Debug, Default, Serialize)]
pub struct FunnelResults {
    stages: IndexMap<Dimension, Tables>,
}

impl FunnelResults {
    /// Tables of one stage.
    pub fn stage(&self, dimension: Dimension) -> Option<&Tables> {
        self.stages.get(&dimension)
    }

    /// A single table by stage and key.
    pub fn table(&self, dimension: Dimension, key: &str) -> Option<&FrequencyTable> {
        self.stage(dimension)?.get(key)
    }

    /// `(stage, tables)` pairs in funnel order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &Tables)> {
        self.stages.iter().map(|(dimension, tables)| (*dimension, tables))
    }

    /// Total number of tables across all stages.
    pub fn table_count(&self) -> usize {
        self.stages.values().map(IndexMap::len).sum()
    }
}

/// Compute every stage's frequency tables.
pub fn analyze_funnel(table: &SurveyTable) -> FunnelResults {
    let stages = Dimension::ALL
        .into_iter()
        .map(|dimension| (dimension, collect(table, stage_specs(dimension))))
        .collect();
    FunnelResults { stages }
}

/// Gender, age, occupation, income and social-media-usage tables.
pub fn analyze_demographics(table: &SurveyTable) -> Tables {
    collect(table, DEMOGRAPHIC_SPECS)
}

/// Favourable share per funnel stage; `None` when the stage's table is missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FunnelRates {
    /// Sense: very or somewhat familiar.
    pub awareness: Option<f64>,
    /// Interest: very or fairly attracted.
    pub interest: Option<f64>,
    /// Communication: any interaction at all.
    pub communication: Option<f64>,
    /// Action: purchased because of social media.
    pub action: Option<f64>,
    /// Share: very or fairly satisfied.
    pub share: Option<f64>,
}

impl FunnelRates {
    /// Rate of one stage.
    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Sense => self.awareness,
            Dimension::Interest => self.interest,
            Dimension::Communication => self.communication,
            Dimension::Action => self.action,
            Dimension::Share => self.share,
        }
    }

    /// Available `(stage, rate)` pairs in funnel order.
    pub fn available(&self) -> Vec<(Dimension, f64)> {
        Dimension::ALL
            .into_iter()
            .filter_map(|dimension| self.get(dimension).map(|rate| (dimension, rate)))
            .collect()
    }

    /// True when all five stages have a rate.
    pub fn is_complete(&self) -> bool {
        self.available().len() == Dimension::ALL.len()
    }
}

/// Labels counted as favourable for each stage's headline table.
pub fn favourable_labels(dimension: Dimension) -> (TableKey, &'static [&'static str]) {
    match dimension {
        Dimension::Sense => (
            "awareness",
            &[answers::AWARE_VERY, answers::AWARE_SOMEWHAT],
        ),
        Dimension::Interest => (
            "attraction",
            &[answers::ATTRACT_VERY, answers::ATTRACT_FAIRLY],
        ),
        Dimension::Communication => (
            "interaction",
            &[
                answers::INTERACT_FREQUENT,
                answers::INTERACT_OCCASIONAL,
                answers::INTERACT_RARE,
            ],
        ),
        Dimension::Action => ("purchase", &[answers::PURCHASE_YES]),
        Dimension::Share => (
            "satisfaction",
            &[answers::SATISFIED_VERY, answers::SATISFIED_FAIRLY],
        ),
    }
}

/// Derive the favourable share of each stage from its headline table.
pub fn funnel_rates(results: &FunnelResults) -> FunnelRates {
    let rate = |dimension: Dimension| {
        let (key, labels) = favourable_labels(dimension);
        results
            .table(dimension, key)
            .map(|table| table.sum_of(labels))
    };
    FunnelRates {
        awareness: rate(Dimension::Sense),
        interest: rate(Dimension::Interest),
        communication: rate(Dimension::Communication),
        action: rate(Dimension::Action),
        share: rate(Dimension::Share),
    }
}

/// Tables for the questions outside the funnel itself.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SupplementaryResults {
    /// Channels through which respondents met the brand.
    pub contact_channels: Option<FrequencyTable>,
    /// Rated interaction experience.
    pub interaction_experience: Option<FrequencyTable>,
    /// Brand impressions (multi-select).
    pub brand_impression: Option<FrequencyTable>,
    /// Whether social media increased brand understanding.
    pub increased_understanding: Option<FrequencyTable>,
    /// Non-empty free-text suggestions, `None` when the column is absent.
    pub suggestions: Option<Vec<String>>,
}

impl SupplementaryResults {
    /// Number of usable suggestions.
    pub fn suggestion_count(&self) -> usize {
        self.suggestions.as_ref().map_or(0, Vec::len)
    }
}

/// Analyze contact channels, experience, impression, understanding and suggestions.
pub fn analyze_supplementary(table: &SurveyTable) -> SupplementaryResults {
    let suggestions = table.present_values(columns::SUGGESTIONS).map(|values| {
        values
            .into_iter()
            .filter(|value| *value != EMPTY_MARKER)
            .map(str::to_string)
            .collect()
    });
    if suggestions.is_none() {
        debug!("[sicas:analysis] suggestions column missing, skipping");
    }
    SupplementaryResults {
        contact_channels: frequency(
            table,
            &multi("brand_contact_channels", columns::CONTACT_CHANNELS, None),
        ),
        interaction_experience: frequency(
            table,
            &single("interaction_experience", columns::INTERACTION_EXPERIENCE),
        ),
        brand_impression: frequency(
            table,
            &multi("brand_impression", columns::BRAND_IMPRESSION, None),
        ),
        increased_understanding: frequency(
            table,
            &single("increased_understanding", columns::INCREASED_UNDERSTANDING),
        ),
        suggestions,
    }
}

/// Cross-tabulate two single-select columns over rows answering both.
///
/// `None` when either column is absent.
pub fn cross_tab(table: &SurveyTable, row_column: &str, col_column: &str) -> Option<CrossTab> {
    let rows = table.column(row_column)?;
    let cols = table.column(col_column)?;
    let pairs = rows
        .zip(cols)
        .filter_map(|(row, col)| Some((row?, col?)));
    Some(CrossTab::from_pairs(pairs))
}

/// Display order of understanding levels, most increased first.
pub const UNDERSTANDING_ORDER: [&str; 4] = [
    answers::UNDERSTANDING_MUCH,
    answers::UNDERSTANDING_SOME,
    answers::UNDERSTANDING_LITTLE,
    answers::UNDERSTANDING_NONE,
];

/// Display order of interaction experience, best first.
pub const EXPERIENCE_ORDER: [&str; 5] = [
    answers::EXPERIENCE_VERY_GOOD,
    answers::EXPERIENCE_FAIRLY_GOOD,
    answers::EXPERIENCE_NEUTRAL,
    answers::EXPERIENCE_POOR,
    answers::EXPERIENCE_VERY_POOR,
];

/// Cross-tabulations between supplementary questions and funnel outcomes.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CrossDimensional {
    /// Increased understanding (rows) against purchase (columns).
    pub understanding_purchase: Option<CrossTab>,
    /// Interaction experience (rows) against satisfaction (columns).
    pub experience_satisfaction: Option<CrossTab>,
}

impl CrossDimensional {
    /// True when neither cross-tab could be built.
    pub fn is_empty(&self) -> bool {
        self.understanding_purchase.is_none() && self.experience_satisfaction.is_none()
    }
}

/// Build both supplementary cross-tabs with their levels in display order.
pub fn cross_dimensional(table: &SurveyTable) -> CrossDimensional {
    let non_empty = |tab: CrossTab| (!tab.is_empty()).then_some(tab);
    CrossDimensional {
        understanding_purchase: cross_tab(table, columns::INCREASED_UNDERSTANDING, columns::PURCHASE)
            .map(|tab| tab.with_row_order(&UNDERSTANDING_ORDER))
            .and_then(non_empty),
        experience_satisfaction: cross_tab(table, columns::INTERACTION_EXPERIENCE, columns::SATISFACTION)
            .map(|tab| tab.with_row_order(&EXPERIENCE_ORDER))
            .and_then(non_empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey(columns: &[&str], rows: &[&[&str]]) -> SurveyTable {
        SurveyTable::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter().map(|r| r.to_vec()).collect(),
        )
    }

    #[test]
    fn missing_columns_are_skipped() {
        let table = survey(&[columns::AWARENESS], &[&["非常了解"], &["不太了解"]]);
        let results = analyze_funnel(&table);
        assert_eq!(results.table_count(), 1);
        assert!(results.table(Dimension::Sense, "awareness").is_some());
        assert!(results.stage(Dimension::Action).unwrap().is_empty());

        let rates = funnel_rates(&results);
        assert_eq!(rates.awareness, Some(0.5));
        assert_eq!(rates.action, None);
        assert!(!rates.is_complete());
    }

    #[test]
    fn purchase_barriers_skip_marker_per_response() {
        let table = survey(
            &[columns::PURCHASE_BARRIERS],
            &[&["价格过高┋推广较少"], &["(跳过)"], &["价格过高"]],
        );
        let results = analyze_funnel(&table);
        let barriers = results.table(Dimension::Action, "barriers").unwrap();
        assert_eq!(barriers.total(), 3);
        assert!(barriers.get("(跳过)").is_none());
    }

    #[test]
    fn communication_rate_counts_any_interaction() {
        let table = survey(
            &[columns::INTERACTION],
            &[&["偶尔互动"], &["很少互动"], &["从未互动"], &["经常互动(点赞、评论、分享等)"]],
        );
        let rates = funnel_rates(&analyze_funnel(&table));
        assert_eq!(rates.communication, Some(0.75));
    }

    #[test]
    fn supplementary_drops_empty_suggestions() {
        let table = survey(
            &[columns::SUGGESTIONS, columns::INCREASED_UNDERSTANDING],
            &[&["多发户外视频", "很多"], &["(空)", "一些"], &["", "很多"]],
        );
        let results = analyze_supplementary(&table);
        assert_eq!(results.suggestion_count(), 1);
        assert!(results.contact_channels.is_none());
        assert_eq!(
            results.increased_understanding.unwrap().mode().unwrap().label,
            "很多"
        );
    }

    #[test]
    fn cross_tab_uses_rows_answering_both() {
        let table = survey(
            &[columns::GENDER, columns::PURCHASE],
            &[&["男", "是"], &["女", ""], &["女", "否"]],
        );
        let tab = cross_tab(&table, columns::GENDER, columns::PURCHASE).unwrap();
        assert_eq!(tab.counts, vec![vec![1, 0], vec![0, 1]]);
        assert!(cross_tab(&table, columns::GENDER, columns::AGE).is_none());
    }

    #[test]
    fn cross_dimensional_orders_understanding_levels() {
        let table = survey(
            &[columns::INCREASED_UNDERSTANDING, columns::PURCHASE],
            &[&["较少", "否"], &["很多", "是"], &["一些", "是"], &["很多", "否"]],
        );
        let tabs = cross_dimensional(&table);
        let understanding = tabs.understanding_purchase.unwrap();
        assert_eq!(understanding.row_labels, vec!["很多", "一些", "较少"]);
        assert_eq!(understanding.share("很多", "是"), Some(0.5));
        assert!(tabs.experience_satisfaction.is_none());
    }
}
