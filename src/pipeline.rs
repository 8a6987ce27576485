//! End-to-end pipelines: load, analyze, render charts, write the report.
//!
//! Each pipeline owns one chart directory and one report under the output
//! root. Chart links inside reports are relative to that root so the
//! Markdown renders from where it is written.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::{
    CrossDimensional, FunnelRates, FunnelResults, SupplementaryResults, Tables, analyze_demographics,
    analyze_funnel, analyze_supplementary, cross_dimensional, cross_tab, funnel_rates,
};
use crate::charts::{
    HeatmapOptions, bar_chart, funnel_chart, grouped_bar_chart, heatmap, horizontal_bar_chart,
    names, palette, pca_variance_chart, pie_chart, radar_chart, rgb, scree_plot, stacked_bar_chart,
};
use crate::config::AnalysisConfig;
use crate::constants::answers::PURCHASE_YES;
use crate::constants::charts::{DEMOGRAPHIC_BAR, STAGE_BAR};
use crate::constants::columns;
use crate::constants::output::{
    ADDITIONAL_PLOTS_DIR, ADDITIONAL_REPORT, FUNNEL_PLOTS_DIR, FUNNEL_REPORT, THESIS_PLOTS_DIR,
    THESIS_REPORT, VALIDATION_PLOTS_DIR, VALIDATION_REPORT,
};
use crate::constants::sync::{ADDITIONAL_COMMIT_MESSAGE, VALIDATION_COMMIT_MESSAGE};
use crate::dimension::Dimension;
use crate::errors::SurveyError;
use crate::labels::translate_all;
use crate::metrics::FrequencyTable;
use crate::narrative::thesis_conclusions;
use crate::report::thesis::FigureDirs;
use crate::report::{funnel_report, supplementary_report, thesis_report, validation_report};
use crate::source::{SurveySource, SurveyTable};
use crate::stats::correlation::correlation_matrix;
use crate::stats::{FactorOutcome, ValidationResults, encode_dimensions, validate};
use crate::transport::{SyncOutcome, SyncRequest, ensure_dir, sync_outputs, write_json, write_report};
use crate::types::Sentence;
use crate::utils::capitalize;

/// Age brackets in display order.
const AGE_ORDER: [&str; 5] = ["18岁以下", "18-25岁", "26-35岁", "36-45岁", "46岁及以上"];

/// Items shown in the thesis correlation heatmap, with their axis labels.
const THESIS_HEATMAP_ITEMS: [(&str, &str); 5] = [
    ("S1", "Brand Awareness"),
    ("I1", "Content Attraction"),
    ("C1", "Interaction Level"),
    ("A1", "Purchase"),
    ("S2", "Satisfaction"),
];

/// Files produced by one pipeline run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Artifacts {
    /// Written report.
    pub report: PathBuf,
    /// Rendered chart files.
    pub charts: Vec<PathBuf>,
}

impl Artifacts {
    fn new(report: PathBuf, charts: Vec<PathBuf>) -> Self {
        Self { report, charts }
    }
}

/// Funnel analysis results and outputs.
#[derive(Clone, Debug, Serialize)]
pub struct FunnelOutcome {
    /// Per-stage frequency tables.
    pub results: FunnelResults,
    /// Demographic frequency tables.
    pub demographics: Tables,
    /// Favourable share per stage.
    pub rates: FunnelRates,
    /// Files written.
    pub artifacts: Artifacts,
}

/// Statistical validation results and outputs.
#[derive(Clone, Debug, Serialize)]
pub struct ValidationOutcome {
    /// Reliability, validity and factor results.
    pub results: ValidationResults,
    /// Files written.
    pub artifacts: Artifacts,
    /// Git sync result; `None` unless sync was requested.
    #[serde(skip)]
    pub sync: Option<SyncOutcome>,
}

/// Thesis report inputs and outputs.
#[derive(Clone, Debug, Serialize)]
pub struct ThesisOutcome {
    /// Favourable share per stage.
    pub rates: FunnelRates,
    /// Key findings in report order.
    pub conclusions: Vec<Sentence>,
    /// Files written.
    pub artifacts: Artifacts,
}

/// Supplementary analysis results and outputs.
#[derive(Clone, Debug, Serialize)]
pub struct SupplementaryOutcome {
    /// Supplementary frequency tables.
    pub results: SupplementaryResults,
    /// Supplementary cross-tabs.
    pub cross: CrossDimensional,
    /// Files written.
    pub artifacts: Artifacts,
    /// Git sync result; `None` unless sync was requested.
    #[serde(skip)]
    pub sync: Option<SyncOutcome>,
}

/// Every pipeline's outcome from one [`run_all`] call.
#[derive(Clone, Debug, Serialize)]
pub struct AllOutcomes {
    /// Funnel analysis.
    pub funnel: FunnelOutcome,
    /// Statistical validation.
    pub validation: ValidationOutcome,
    /// Thesis report.
    pub thesis: ThesisOutcome,
    /// Supplementary analysis.
    pub supplementary: SupplementaryOutcome,
}

/// Display labels and proportions of a frequency table, in table order.
fn series(table: &FrequencyTable) -> (Vec<String>, Vec<f64>) {
    let labels = translate_all(table.entries().iter().map(|entry| entry.label.as_str()));
    let values = table.entries().iter().map(|entry| entry.proportion).collect();
    (labels, values)
}

fn load(source: &dyn SurveySource) -> Result<SurveyTable, SurveyError> {
    info!("[sicas:pipeline] loading survey from {}", source.id());
    source.load()
}

fn persist_summary<T: Serialize>(config: &AnalysisConfig, value: &T) -> Result<(), SurveyError> {
    if let Some(path) = &config.summary_json {
        write_json(path, value)?;
    }
    Ok(())
}

fn maybe_sync(config: &AnalysisConfig, message: &str, paths: [&str; 2]) -> Option<SyncOutcome> {
    if !config.sync {
        return None;
    }
    let request = paths
        .into_iter()
        .fold(SyncRequest::new(&config.output_root, message), |request, path| request.with_path(path));
    Some(sync_outputs(&request))
}

/// Funnel stage labels and rates, in funnel order, for the available stages.
fn funnel_series(rates: &FunnelRates) -> (Vec<String>, Vec<f64>) {
    rates
        .available()
        .into_iter()
        .map(|(dimension, rate)| {
            let label = match dimension {
                Dimension::Sense => "Sense (Awareness)",
                Dimension::Interest => "Interest",
                Dimension::Communication => "Communication",
                Dimension::Action => "Action (Purchase)",
                Dimension::Share => "Share/Satisfaction",
            };
            (label.to_string(), rate)
        })
        .unzip()
}

/// Render the stage, demographic and funnel charts of the funnel analysis.
pub fn render_funnel_charts(
    dir: &Path,
    results: &FunnelResults,
    demographics: &Tables,
    rates: &FunnelRates,
) -> Result<Vec<PathBuf>, SurveyError> {
    ensure_dir(dir)?;
    let mut charts = Vec::new();
    for (dimension, tables) in results.iter() {
        for (key, table) in tables {
            if table.is_empty() {
                continue;
            }
            let (labels, values) = series(table);
            let title = format!("{} - {}", capitalize(dimension.key()), capitalize(key));
            charts.push(bar_chart(
                dir,
                &names::stage(dimension, key),
                &title,
                &labels,
                &values,
                rgb(STAGE_BAR),
            )?);
        }
    }
    for (key, table) in demographics {
        if table.is_empty() {
            continue;
        }
        let (labels, values) = series(table);
        let title = format!("Demographic - {}", capitalize(key));
        charts.push(bar_chart(
            dir,
            &names::demographic(key),
            &title,
            &labels,
            &values,
            rgb(DEMOGRAPHIC_BAR),
        )?);
    }
    let (stages, values) = funnel_series(rates);
    if !stages.is_empty() {
        charts.push(funnel_chart(dir, names::FUNNEL, &stages, &values)?);
    }
    Ok(charts)
}

/// Frequency analysis of every funnel stage plus demographics.
pub fn run_funnel_analysis(
    source: &dyn SurveySource,
    config: &AnalysisConfig,
) -> Result<FunnelOutcome, SurveyError> {
    let table = load(source)?;
    let layout = config.layout();
    let results = analyze_funnel(&table);
    let demographics = analyze_demographics(&table);
    let rates = funnel_rates(&results);
    info!(
        "[sicas:pipeline] funnel analysis built {} stage tables and {} demographic tables",
        results.table_count(),
        demographics.len()
    );

    let charts = render_funnel_charts(&layout.dir(FUNNEL_PLOTS_DIR), &results, &demographics, &rates)?;
    let report = funnel_report(&results, &demographics, Path::new(FUNNEL_PLOTS_DIR))?;
    let report = write_report(&layout.report(FUNNEL_REPORT), &report)?;

    let outcome = FunnelOutcome {
        results,
        demographics,
        rates,
        artifacts: Artifacts::new(report, charts),
    };
    persist_summary(config, &outcome)?;
    Ok(outcome)
}

/// Render the dimension heatmap, scree plot, loadings heatmap and PCA chart.
pub fn render_validation_charts(dir: &Path, results: &ValidationResults) -> Result<Vec<PathBuf>, SurveyError> {
    ensure_dir(dir)?;
    let mut charts = Vec::new();

    if let Some(correlations) = &results.validity.dimensions {
        let labels: Vec<String> = correlations.labels.iter().map(|d| d.name().to_string()).collect();
        let values: Vec<Vec<f64>> = correlations.values.rows().into_iter().map(|row| row.to_vec()).collect();
        charts.push(heatmap(
            dir,
            names::DIMENSION_CORRELATIONS,
            "Correlations Between SICAS Dimensions",
            &labels,
            &labels,
            &values,
            HeatmapOptions::correlation(),
        )?);
    }

    let FactorOutcome::Analyzed(analysis) = &results.factor else {
        return Ok(charts);
    };
    charts.push(scree_plot(dir, names::SCREE_PLOT, &analysis.eigenvalues)?);

    if let Some(extraction) = &analysis.extraction {
        let items: Vec<String> = analysis.codes.iter().map(|code| code.to_string()).collect();
        let factors: Vec<String> = (1..=extraction.n_factors).map(|idx| format!("Factor {idx}")).collect();
        let values: Vec<Vec<f64>> = extraction.loadings.rows().into_iter().map(|row| row.to_vec()).collect();
        charts.push(heatmap(
            dir,
            names::FACTOR_LOADINGS,
            "Factor Loadings",
            &items,
            &factors,
            &values,
            HeatmapOptions::correlation(),
        )?);
    }

    if let Some(pca) = &analysis.pca {
        charts.push(pca_variance_chart(dir, names::PCA_VARIANCE, &pca.variance_ratio, &pca.cumulative)?);
    }
    Ok(charts)
}

/// Reliability, validity and factor analysis of the encoded items.
pub fn run_statistical_validation(
    source: &dyn SurveySource,
    config: &AnalysisConfig,
) -> Result<ValidationOutcome, SurveyError> {
    let table = load(source)?;
    let layout = config.layout();
    let results = validate(&table);
    if let FactorOutcome::Insufficient(reason) = &results.factor {
        warn!("[sicas:pipeline] factor analysis skipped: {reason}");
    }

    let charts = render_validation_charts(&layout.dir(VALIDATION_PLOTS_DIR), &results)?;
    let report = validation_report(&results, Path::new(VALIDATION_PLOTS_DIR))?;
    let report = write_report(&layout.report(VALIDATION_REPORT), &report)?;
    let sync = maybe_sync(config, VALIDATION_COMMIT_MESSAGE, [VALIDATION_PLOTS_DIR, VALIDATION_REPORT]);

    let outcome = ValidationOutcome {
        results,
        artifacts: Artifacts::new(report, charts),
        sync,
    };
    persist_summary(config, &outcome)?;
    Ok(outcome)
}

/// Pairwise item correlations of the thesis heatmap items present in `table`.
fn thesis_item_correlations(table: &SurveyTable) -> Option<(Vec<String>, Vec<Vec<f64>>)> {
    let matrix = encode_dimensions(table);
    let present: Vec<(&str, &str)> = THESIS_HEATMAP_ITEMS
        .into_iter()
        .filter(|(code, _)| matrix.column(code).is_some())
        .collect();
    if present.len() < 2 {
        return None;
    }
    let columns: Vec<_> = present
        .iter()
        .filter_map(|(code, _)| matrix.column(code))
        .collect();
    let data = Array2::from_shape_fn((matrix.n_rows(), columns.len()), |(row, col)| columns[col][row]);
    let values = correlation_matrix(&data)
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect();
    let labels = present.iter().map(|(_, label)| label.to_string()).collect();
    Some((labels, values))
}

/// Radar axis labels and rates for the stages present.
fn radar_series(rates: &FunnelRates) -> (Vec<String>, Vec<f64>) {
    rates
        .available()
        .into_iter()
        .map(|(dimension, rate)| {
            let label = match dimension {
                Dimension::Sense => "Brand Awareness",
                Dimension::Interest => "Content Attraction",
                Dimension::Communication => "Social Interaction",
                Dimension::Action => "Purchase Conversion",
                Dimension::Share => "User Satisfaction",
            };
            (label.to_string(), rate)
        })
        .unzip()
}

/// Render the thesis figures: pies, radar, item heatmap and demographic cross-tabs.
pub fn render_thesis_charts(
    dir: &Path,
    table: &SurveyTable,
    results: &FunnelResults,
    demographics: &Tables,
    rates: &FunnelRates,
) -> Result<Vec<PathBuf>, SurveyError> {
    ensure_dir(dir)?;
    let mut charts = Vec::new();

    for (key, data) in demographics {
        if data.is_empty() {
            continue;
        }
        let (labels, values) = series(data);
        let title = format!("Distribution of {}", capitalize(key));
        charts.push(pie_chart(dir, &names::pie(None, key), &title, &labels, &values)?);
    }

    for (dimension, key) in [
        (Dimension::Sense, "awareness"),
        (Dimension::Action, "purchase"),
        (Dimension::Share, "satisfaction"),
    ] {
        let Some(data) = results.table(dimension, key).filter(|data| !data.is_empty()) else {
            continue;
        };
        let (labels, values) = series(data);
        let title = format!("{} - {} Distribution", capitalize(dimension.key()), capitalize(key));
        charts.push(pie_chart(dir, &names::pie(Some(dimension), key), &title, &labels, &values)?);
    }

    let (labels, values) = radar_series(rates);
    if labels.len() >= 3 {
        charts.push(radar_chart(
            dir,
            names::RADAR_OVERVIEW,
            "SICAS Model Performance Overview",
            &labels,
            &values,
            palette(0),
        )?);
    }

    if let Some((labels, values)) = thesis_item_correlations(table) {
        charts.push(heatmap(
            dir,
            names::CORRELATION_HEATMAP,
            "Correlation Between SICAS Components",
            &labels,
            &labels,
            &values,
            HeatmapOptions::correlation().with_lower_triangle(),
        )?);
    }

    if let Some(tab) = cross_tab(table, columns::GENDER, columns::AWARENESS).filter(|tab| !tab.is_empty()) {
        let tab = tab.translated();
        charts.push(grouped_bar_chart(
            dir,
            names::GENDER_AWARENESS,
            "Brand Awareness by Gender",
            &tab,
            &tab.row_normalized(),
            "Proportion",
        )?);
    }

    if let Some(tab) = cross_tab(table, columns::AGE, columns::PURCHASE).filter(|tab| !tab.is_empty()) {
        let tab = tab
            .with_row_order(&AGE_ORDER)
            .with_col_order(&[PURCHASE_YES])
            .translated();
        charts.push(stacked_bar_chart(
            dir,
            names::AGE_PURCHASE,
            "Purchase Rate by Age Group",
            &tab,
            &[palette(5), palette(2)],
        )?);
    }
    Ok(charts)
}

/// Key findings, figure gallery and recommendations for thesis use.
pub fn run_thesis_report(
    source: &dyn SurveySource,
    config: &AnalysisConfig,
) -> Result<ThesisOutcome, SurveyError> {
    let table = load(source)?;
    let layout = config.layout();
    let results = analyze_funnel(&table);
    let demographics = analyze_demographics(&table);
    let rates = funnel_rates(&results);
    let conclusions = thesis_conclusions(&results, &rates, &demographics);

    let mut charts = render_thesis_charts(&layout.dir(THESIS_PLOTS_DIR), &table, &results, &demographics, &rates)?;
    // Figure 8 links the funnel analysis bar chart of content attraction.
    if let Some(attraction) = results.table(Dimension::Interest, "attraction").filter(|t| !t.is_empty()) {
        let dir = ensure_dir(&layout.dir(FUNNEL_PLOTS_DIR))?;
        let (labels, values) = series(attraction);
        charts.push(bar_chart(
            &dir,
            &names::stage(Dimension::Interest, "attraction"),
            "Interest - Attraction",
            &labels,
            &values,
            rgb(STAGE_BAR),
        )?);
    }

    let dirs = FigureDirs {
        thesis: Path::new(THESIS_PLOTS_DIR),
        funnel: Path::new(FUNNEL_PLOTS_DIR),
    };
    let report = thesis_report(&results, &rates, &conclusions, dirs)?;
    let report = write_report(&layout.report(THESIS_REPORT), &report)?;

    let outcome = ThesisOutcome {
        rates,
        conclusions,
        artifacts: Artifacts::new(report, charts),
    };
    persist_summary(config, &outcome)?;
    Ok(outcome)
}

/// Render the supplementary charts and cross-dimensional figures.
pub fn render_supplementary_charts(
    dir: &Path,
    results: &SupplementaryResults,
    cross: &CrossDimensional,
) -> Result<Vec<PathBuf>, SurveyError> {
    ensure_dir(dir)?;
    let mut charts = Vec::new();

    if let Some(channels) = results.contact_channels.as_ref().filter(|t| !t.is_empty()) {
        let (labels, values) = series(channels);
        charts.push(horizontal_bar_chart(
            dir,
            names::BRAND_CONTACT_CHANNELS,
            "Brand Contact Channels",
            &labels,
            &values,
            palette(0),
        )?);
    }
    if let Some(experience) = results.interaction_experience.as_ref().filter(|t| !t.is_empty()) {
        let (labels, values) = series(experience);
        charts.push(pie_chart(
            dir,
            names::INTERACTION_EXPERIENCE,
            "Social Media Interaction Experience",
            &labels,
            &values,
        )?);
    }
    if let Some(impression) = results.brand_impression.as_ref().filter(|t| !t.is_empty()) {
        let (labels, values) = series(impression);
        charts.push(horizontal_bar_chart(
            dir,
            names::BRAND_IMPRESSION,
            "Brand Impression",
            &labels,
            &values,
            palette(1),
        )?);
    }
    if let Some(understanding) = results.increased_understanding.as_ref().filter(|t| !t.is_empty()) {
        let (labels, values) = series(understanding);
        charts.push(pie_chart(
            dir,
            names::INCREASED_UNDERSTANDING,
            "Increased Brand Understanding from Social Media",
            &labels,
            &values,
        )?);
    }

    if let Some(tab) = &cross.understanding_purchase {
        let tab = tab.clone().with_col_order(&[PURCHASE_YES]).translated();
        charts.push(stacked_bar_chart(
            dir,
            names::UNDERSTANDING_VS_PURCHASE,
            "Purchase Rate by Level of Increased Understanding",
            &tab,
            &[palette(5), palette(2)],
        )?);
    }
    if let Some(tab) = &cross.experience_satisfaction {
        let tab = tab.translated();
        charts.push(heatmap(
            dir,
            names::EXPERIENCE_VS_SATISFACTION,
            "Relationship Between Interaction Experience and Overall Satisfaction",
            &tab.row_labels,
            &tab.col_labels,
            &tab.as_f64(),
            HeatmapOptions::counts(),
        )?);
    }
    Ok(charts)
}

/// Analysis of the questions outside the funnel.
pub fn run_supplementary_analysis(
    source: &dyn SurveySource,
    config: &AnalysisConfig,
) -> Result<SupplementaryOutcome, SurveyError> {
    let table = load(source)?;
    let layout = config.layout();
    let results = analyze_supplementary(&table);
    let cross = cross_dimensional(&table);
    info!(
        "[sicas:pipeline] supplementary analysis collected {} suggestions",
        results.suggestion_count()
    );

    let charts = render_supplementary_charts(&layout.dir(ADDITIONAL_PLOTS_DIR), &results, &cross)?;
    let report = supplementary_report(&results, &cross, Path::new(ADDITIONAL_PLOTS_DIR))?;
    let report = write_report(&layout.report(ADDITIONAL_REPORT), &report)?;
    let sync = maybe_sync(config, ADDITIONAL_COMMIT_MESSAGE, [ADDITIONAL_PLOTS_DIR, ADDITIONAL_REPORT]);

    let outcome = SupplementaryOutcome {
        results,
        cross,
        artifacts: Artifacts::new(report, charts),
        sync,
    };
    persist_summary(config, &outcome)?;
    Ok(outcome)
}

/// Run all four pipelines in order; the summary, if requested, covers all of them.
pub fn run_all(source: &dyn SurveySource, config: &AnalysisConfig) -> Result<AllOutcomes, SurveyError> {
    let quiet = AnalysisConfig {
        summary_json: None,
        ..config.clone()
    };
    let outcomes = AllOutcomes {
        funnel: run_funnel_analysis(source, &quiet)?,
        validation: run_statistical_validation(source, &quiet)?,
        thesis: run_thesis_report(source, &quiet)?,
        supplementary: run_supplementary_analysis(source, &quiet)?,
    };
    persist_summary(config, &outcomes)?;
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemorySource;
    use tempfile::tempdir;

    fn source(rows: Vec<Vec<&str>>) -> InMemorySource {
        let columns = vec![
            columns::AWARENESS.to_string(),
            columns::ATTRACTION.to_string(),
            columns::INTERACTION.to_string(),
            columns::PURCHASE.to_string(),
            columns::SATISFACTION.to_string(),
            columns::GENDER.to_string(),
            columns::AGE.to_string(),
        ];
        InMemorySource::new("memory", SurveyTable::new(columns, rows))
    }

    fn rows() -> Vec<Vec<&'static str>> {
        vec![
            vec!["非常了解", "非常吸引", "经常互动(点赞、评论、分享等)", "是", "非常满意", "男", "18-25岁"],
            vec!["略有了解", "比较吸引", "偶尔互动", "否", "比较满意", "女", "26-35岁"],
            vec!["不太了解", "一般", "从未互动", "否", "一般", "女", "26-35岁"],
            vec!["完全不了解", "不太吸引", "很少互动", "是", "不太满意", "男", "36-45岁"],
        ]
    }

    #[test]
    fn funnel_series_uses_stage_labels() {
        let rates = FunnelRates {
            awareness: Some(0.5),
            action: Some(0.2),
            ..FunnelRates::default()
        };
        let (labels, values) = funnel_series(&rates);
        assert_eq!(labels, vec!["Sense (Awareness)", "Action (Purchase)"]);
        assert_eq!(values, vec![0.5, 0.2]);
    }

    #[test]
    fn thesis_pipeline_links_funnel_attraction_chart() {
        let dir = tempdir().unwrap();
        let config = AnalysisConfig::default().with_output_root(dir.path());
        let outcome = run_thesis_report(&source(rows()), &config).unwrap();
        assert!(dir.path().join("plots").join("interest_attraction.svg").exists());
        assert!(dir.path().join("thesis_plots").join("radar_sicas_overview.svg").exists());
        assert!(dir.path().join("thesis_plots").join("stacked_age_purchase.svg").exists());
        assert!(dir.path().join("thesis_plots").join("heatmap_sicas_correlation.svg").exists());
        assert!(outcome.artifacts.report.ends_with("thesis_report.md"));
        assert!(outcome.conclusions.iter().any(|c| c.contains("Brand Awareness")));
    }

    #[test]
    fn summary_json_is_written_when_requested() {
        let dir = tempdir().unwrap();
        let summary = dir.path().join("summary.json");
        let config = AnalysisConfig::default()
            .with_output_root(dir.path())
            .with_summary_json(&summary);
        run_funnel_analysis(&source(rows()), &config).unwrap();
        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(summary).unwrap()).unwrap();
        assert!(json["rates"]["awareness"].as_f64().is_some());
    }

    #[test]
    fn sync_is_not_attempted_by_default() {
        let dir = tempdir().unwrap();
        let config = AnalysisConfig::default().with_output_root(dir.path());
        let outcome = run_statistical_validation(&source(rows()), &config).unwrap();
        assert!(outcome.sync.is_none());
        assert!(dir.path().join("statistical_validation_report.md").exists());
        assert!(dir.path().join("validation_plots").join("dimension_correlations.svg").exists());
    }
}
