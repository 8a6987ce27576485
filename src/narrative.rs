//! Threshold ladders and the sentences they select.
//!
//! Every ladder is a descending table of [`Band`]s closed by a catch-all, and
//! [`rank`] is the only place a value is compared against a cut point.

use std::fmt;

use crate::analysis::{FunnelRates, FunnelResults, Tables};
use crate::constants::narrative::{SIGNIFICANT_DROP_OFF, TOP_CATEGORIES};
use crate::dimension::Dimension;
use crate::labels::translate;
use crate::metrics::FrequencyTable;
use crate::types::Sentence;
use crate::utils::percent;

/// One rung of a ladder: values above `lower` (or equal, when `inclusive`) map to `qualifier`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band<T> {
    /// Lower bound of the band.
    pub lower: f64,
    /// Whether `lower` itself belongs to the band.
    pub inclusive: bool,
    /// Value returned for this band.
    pub qualifier: T,
}

impl<T> Band<T> {
    const fn above(lower: f64, qualifier: T) -> Self {
        Self {
            lower,
            inclusive: false,
            qualifier,
        }
    }

    const fn at_least(lower: f64, qualifier: T) -> Self {
        Self {
            lower,
            inclusive: true,
            qualifier,
        }
    }

    const fn otherwise(qualifier: T) -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            inclusive: true,
            qualifier,
        }
    }

    fn admits(&self, value: f64) -> bool {
        if self.inclusive {
            value >= self.lower
        } else {
            value > self.lower
        }
    }
}

/// Qualifier of the first band admitting `value`; `NaN` falls through to the last band.
pub fn rank<T: Copy, const N: usize>(value: f64, bands: &[Band<T>; N]) -> T {
    const { assert!(N > 0, "a ladder needs at least one band") };
    bands
        .iter()
        .find(|band| band.admits(value))
        .unwrap_or(&bands[N - 1])
        .qualifier
}

/// Three-level qualifier shared by most ladders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Top band.
    High,
    /// Middle band.
    Moderate,
    /// Bottom band.
    Low,
}

/// Favourable share of awareness, attraction, satisfaction, experience and understanding.
pub const FAVOURABLE_SHARE: [Band<Level>; 3] = [
    Band::above(0.6, Level::High),
    Band::above(0.3, Level::Moderate),
    Band::otherwise(Level::Low),
];

/// Share of respondents who interact at all.
pub const PARTICIPATION: [Band<Level>; 2] = [
    Band::above(0.5, Level::High),
    Band::otherwise(Level::Low),
];

/// Purchase conversion.
pub const CONVERSION: [Band<Level>; 3] = [
    Band::above(0.3, Level::High),
    Band::above(0.1, Level::Moderate),
    Band::otherwise(Level::Low),
];

/// Mean favourable share across all five stages.
pub const OVERALL_PERFORMANCE: [Band<Level>; 3] = [
    Band::above(0.6, Level::High),
    Band::above(0.3, Level::Moderate),
    Band::otherwise(Level::Low),
];

/// Mean off-diagonal correlation between dimension scores.
pub const MEAN_CORRELATION: [Band<Level>; 3] = [
    Band::above(0.4, Level::High),
    Band::above(0.2, Level::Moderate),
    Band::otherwise(Level::Low),
];

/// Largest stage-to-stage decrease.
pub const DROP_OFF: [Band<bool>; 2] = [
    Band::above(SIGNIFICANT_DROP_OFF, true),
    Band::otherwise(false),
];

/// Conventional interpretation of Cronbach's alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlphaGrade {
    /// Excellent.
    Excellent,
    /// Good.
    Good,
    /// Acceptable.
    Acceptable,
    /// Questionable.
    Questionable,
    /// Poor.
    Poor,
    /// Unacceptable.
    Unacceptable,
}

impl fmt::Display for AlphaGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlphaGrade::Excellent => "Excellent",
            AlphaGrade::Good => "Good",
            AlphaGrade::Acceptable => "Acceptable",
            AlphaGrade::Questionable => "Questionable",
            AlphaGrade::Poor => "Poor",
            AlphaGrade::Unacceptable => "Unacceptable",
        };
        f.write_str(label)
    }
}

/// Alpha grades, inclusive lower bounds.
pub const ALPHA: [Band<AlphaGrade>; 6] = [
    Band::at_least(0.9, AlphaGrade::Excellent),
    Band::at_least(0.8, AlphaGrade::Good),
    Band::at_least(0.7, AlphaGrade::Acceptable),
    Band::at_least(0.6, AlphaGrade::Questionable),
    Band::at_least(0.5, AlphaGrade::Poor),
    Band::otherwise(AlphaGrade::Unacceptable),
];

/// Sampling adequacy grade of a KMO value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adequacy {
    /// Excellent.
    Excellent,
    /// Good.
    Good,
    /// Acceptable.
    Acceptable,
    /// Mediocre.
    Mediocre,
    /// Poor.
    Poor,
}

/// KMO grades, inclusive lower bounds.
pub const KMO: [Band<Adequacy>; 5] = [
    Band::at_least(0.8, Adequacy::Excellent),
    Band::at_least(0.7, Adequacy::Good),
    Band::at_least(0.6, Adequacy::Acceptable),
    Band::at_least(0.5, Adequacy::Mediocre),
    Band::otherwise(Adequacy::Poor),
];

/// Adjacent pair of funnel stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Sense to Interest.
    AwarenessInterest,
    /// Interest to Communication.
    InterestCommunication,
    /// Communication to Action.
    CommunicationAction,
    /// Action to Share.
    ActionSatisfaction,
}

impl Transition {
    /// Stage names joined by `joiner`, e.g. "awareness to interest".
    pub fn describe(self, joiner: &str) -> String {
        let (from, to) = match self {
            Transition::AwarenessInterest => ("awareness", "interest"),
            Transition::InterestCommunication => ("interest", "communication"),
            Transition::CommunicationAction => ("communication", "action"),
            Transition::ActionSatisfaction => ("action", "satisfaction"),
        };
        format!("{from} {joiner} {to}")
    }
}

/// All five rates, when every stage table exists.
fn complete_rates(rates: &FunnelRates) -> Option<[f64; 5]> {
    Some([
        rates.awareness?,
        rates.interest?,
        rates.communication?,
        rates.action?,
        rates.share?,
    ])
}

/// Transition with the largest decrease; a rise into satisfaction counts as zero.
pub fn largest_drop(rates: &FunnelRates) -> Option<(Transition, f64)> {
    let [awareness, interest, communication, action, satisfaction] = complete_rates(rates)?;
    let transitions = [
        (Transition::AwarenessInterest, awareness - interest),
        (Transition::InterestCommunication, interest - communication),
        (Transition::CommunicationAction, communication - action),
        (
            Transition::ActionSatisfaction,
            if action > satisfaction {
                action - satisfaction
            } else {
                0.0
            },
        ),
    ];
    // first maximum wins on ties
    transitions
        .into_iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
}

/// Mean of the five stage rates.
pub fn overall_performance(rates: &FunnelRates) -> Option<f64> {
    complete_rates(rates).map(|values| values.iter().sum::<f64>() / values.len() as f64)
}

fn weakest_stage(rates: &FunnelRates) -> Option<&'static str> {
    let [awareness, interest, communication, action, satisfaction] = complete_rates(rates)?;
    [
        ("awareness", awareness),
        ("interest", interest),
        ("communication", communication),
        ("action", action),
        ("satisfaction", satisfaction),
    ]
    .into_iter()
    .reduce(|best, next| if next.1 < best.1 { next } else { best })
    .map(|(name, _)| name)
}

/// `"Label (12.3%)"` for the top entries of a table, comma separated.
pub fn top_categories(table: &FrequencyTable, n: usize) -> String {
    table
        .top(n)
        .iter()
        .map(|entry| format!("{} ({})", translate(&entry.label), percent(entry.proportion)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Headline sentence for one funnel stage.
pub fn dimension_conclusion(dimension: Dimension, rate: f64) -> Sentence {
    let pct = percent(rate);
    match dimension {
        Dimension::Sense => match rank(rate, &FAVOURABLE_SHARE) {
            Level::High => format!(
                "**Brand Awareness:** Arc'teryx enjoys high brand recognition, with over {pct} of respondents indicating they are familiar with the brand. This strong awareness foundation provides an excellent starting point for marketing initiatives."
            ),
            Level::Moderate => format!(
                "**Brand Awareness:** Arc'teryx has moderate brand recognition, with {pct} of respondents familiar with the brand. This suggests opportunities for increasing brand visibility in the market."
            ),
            Level::Low => format!(
                "**Brand Awareness:** Arc'teryx has relatively low brand recognition ({pct}), indicating a significant need for awareness-building campaigns."
            ),
        },
        Dimension::Interest => match rank(rate, &FAVOURABLE_SHARE) {
            Level::High => format!(
                "**Content Attraction:** The brand's social media content effectively captures audience interest, with {pct} finding it attractive. This demonstrates strong content strategy alignment with audience preferences."
            ),
            Level::Moderate => format!(
                "**Content Attraction:** {pct} of respondents find Arc'teryx's social media content attractive, suggesting room for enhancing content appeal to better engage the audience."
            ),
            Level::Low => format!(
                "**Content Attraction:** Only {pct} of respondents find the social media content attractive, highlighting a critical need to revise content strategy to better align with audience preferences."
            ),
        },
        Dimension::Communication => match rank(rate, &PARTICIPATION) {
            Level::High | Level::Moderate => format!(
                "**User Interaction:** With {pct} of respondents engaging with Arc'teryx social media in some capacity, the brand has established an interactive relationship with its audience, demonstrating effective two-way communication."
            ),
            Level::Low => format!(
                "**User Interaction:** The majority of respondents ({}) report never interacting with Arc'teryx social media, indicating a significant gap in audience engagement that needs addressing.",
                percent(1.0 - rate)
            ),
        },
        Dimension::Action => match rank(rate, &CONVERSION) {
            Level::High => format!(
                "**Purchase Conversion:** The {pct} conversion rate from social media to purchases represents a strong return on investment for Arc'teryx's social media marketing efforts, exceeding industry benchmarks."
            ),
            Level::Moderate => format!(
                "**Purchase Conversion:** The {pct} social media-driven purchase rate aligns with industry standards but presents opportunities for optimization through improved call-to-action strategies and streamlined purchasing pathways."
            ),
            Level::Low => format!(
                "**Purchase Conversion:** With only {pct} of respondents making purchases based on social media content, there exists a significant disconnect between engagement and conversion that requires strategic intervention."
            ),
        },
        Dimension::Share => match rank(rate, &FAVOURABLE_SHARE) {
            Level::High => format!(
                "**User Satisfaction:** The remarkably high satisfaction rate ({pct}) demonstrates exceptional social media content quality and audience alignment, creating strong potential for advocacy and word-of-mouth marketing."
            ),
            Level::Moderate => format!(
                "**User Satisfaction:** {pct} of users report satisfaction with Arc'teryx's social media, indicating generally positive reception but with room for enhancement to reach excellence."
            ),
            Level::Low => format!(
                "**User Satisfaction:** The satisfaction rate of {pct} suggests significant issues with social media content strategy that require comprehensive reassessment to better meet audience expectations."
            ),
        },
    }
}

fn drop_off_conclusion(transition: Transition, drop: f64) -> Sentence {
    let pct = percent(drop);
    match transition {
        Transition::AwarenessInterest => format!(
            "**Funnel Analysis:** The most significant drop-off occurs between awareness and interest ({pct} decrease), indicating that while many consumers know the brand, the content fails to capture their interest. Content strategy should be revised to better align with the interests of brand-aware consumers."
        ),
        Transition::InterestCommunication => format!(
            "**Funnel Analysis:** Despite generating interest, there's a substantial {pct} decrease in active communication, suggesting barriers to engagement that should be addressed through more interactive content formats and stronger calls-to-action."
        ),
        Transition::CommunicationAction => format!(
            "**Funnel Analysis:** The {pct} drop between interaction and purchase represents a critical conversion gap. This indicates potential issues with product pricing, availability, or purchase pathway that should be strategically addressed."
        ),
        Transition::ActionSatisfaction => format!(
            "**Funnel Analysis:** The {pct} decline from purchase to satisfaction suggests post-purchase disappointment that could damage brand reputation. Aligning marketing messaging more closely with product reality and improving customer experience should be prioritized."
        ),
    }
}

fn overall_conclusion(rates: &FunnelRates) -> Option<Sentence> {
    let overall = overall_performance(rates)?;
    let (transition, _) = largest_drop(rates)?;
    let weakest = weakest_stage(rates)?;
    let sentence = match rank(overall, &OVERALL_PERFORMANCE) {
        Level::High => {
            let strength = match (rates.awareness, rates.share) {
                (Some(a), Some(s)) if (a + s) / 2.0 > overall => {
                    "brand awareness and user satisfaction"
                }
                _ => "content interest and engagement",
            };
            format!(
                "**Overall SICAS Performance:** Arc'teryx demonstrates strong social media marketing effectiveness with above-average performance across the SICAS model, particularly in {strength}. The brand should maintain its successful strategies while addressing the identified gap in the {} transition to further optimize marketing ROI.",
                transition.describe("to")
            )
        }
        Level::Moderate => format!(
            "**Overall SICAS Performance:** Arc'teryx shows moderate effectiveness in social media marketing with varied performance across the SICAS framework. The brand should prioritize improving the {weakest} stage and addressing the significant drop-off between {} to enhance overall marketing effectiveness.",
            transition.describe("and")
        ),
        Level::Low => format!(
            "**Overall SICAS Performance:** Arc'teryx faces significant challenges in social media marketing effectiveness with below-average performance across the SICAS model. A comprehensive strategy overhaul is recommended, starting with {weakest} and systematically addressing each stage of the customer journey."
        ),
    };
    Some(sentence)
}

/// Key findings for the thesis report, one per available stage plus
/// demographic, improvement, drop-off and overall sentences.
pub fn thesis_conclusions(
    results: &FunnelResults,
    rates: &FunnelRates,
    demographics: &Tables,
) -> Vec<Sentence> {
    let mut conclusions: Vec<Sentence> = rates
        .available()
        .into_iter()
        .map(|(dimension, rate)| dimension_conclusion(dimension, rate))
        .collect();

    if let Some(top) = demographics.get("gender").and_then(FrequencyTable::mode) {
        conclusions.push(format!(
            "**Demographic Insight:** The customer base shows a {} representation of {} respondents, suggesting targeted content strategies could be developed to either strengthen appeal to this dominant demographic or to expand reach among underrepresented groups.",
            percent(top.proportion),
            translate(&top.label).to_lowercase()
        ));
    }

    if let Some([first, second]) = demographics.get("age").and_then(|table| table.top(2).first_chunk::<2>()) {
        conclusions.push(format!(
            "**Age Distribution:** The majority of respondents fall within the {} ({}) and {} ({}) age brackets, indicating these segments should be prioritized in content strategy while considering approaches to engage other age demographics.",
            translate(&first.label),
            percent(first.proportion),
            translate(&second.label),
            percent(second.proportion)
        ));
    }

    if let Some(improvements) = results.table(Dimension::Share, "improvements") {
        if !improvements.is_empty() {
            conclusions.push(format!(
                "**Priority Improvements:** Based on user feedback, the most critical areas for improvement are: {}. These insights should guide immediate refinements to Arc'teryx's social media strategy.",
                top_categories(improvements, TOP_CATEGORIES)
            ));
        }
    }

    if let Some((transition, drop)) = largest_drop(rates) {
        if rank(drop, &DROP_OFF) {
            conclusions.push(drop_off_conclusion(transition, drop));
        }
    }

    conclusions.extend(overall_conclusion(rates));
    conclusions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates(values: [f64; 5]) -> FunnelRates {
        FunnelRates {
            awareness: Some(values[0]),
            interest: Some(values[1]),
            communication: Some(values[2]),
            action: Some(values[3]),
            share: Some(values[4]),
        }
    }

    #[test]
    fn rank_is_exhaustive_and_respects_inclusivity() {
        assert_eq!(rank(0.61, &FAVOURABLE_SHARE), Level::High);
        assert_eq!(rank(0.6, &FAVOURABLE_SHARE), Level::Moderate);
        assert_eq!(rank(0.3, &FAVOURABLE_SHARE), Level::Low);
        assert_eq!(rank(-5.0, &FAVOURABLE_SHARE), Level::Low);
        assert_eq!(rank(f64::NAN, &FAVOURABLE_SHARE), Level::Low);
        assert_eq!(rank(0.7, &ALPHA), AlphaGrade::Acceptable);
        assert_eq!(rank(0.69, &ALPHA), AlphaGrade::Questionable);
        assert_eq!(rank(f64::NAN, &KMO), Adequacy::Poor);
    }

    #[test]
    fn every_ladder_ends_with_a_catch_all() {
        assert_eq!(FAVOURABLE_SHARE.last().unwrap().lower, f64::NEG_INFINITY);
        assert_eq!(PARTICIPATION.last().unwrap().lower, f64::NEG_INFINITY);
        assert_eq!(CONVERSION.last().unwrap().lower, f64::NEG_INFINITY);
        assert_eq!(OVERALL_PERFORMANCE.last().unwrap().lower, f64::NEG_INFINITY);
        assert_eq!(MEAN_CORRELATION.last().unwrap().lower, f64::NEG_INFINITY);
        assert_eq!(ALPHA.last().unwrap().lower, f64::NEG_INFINITY);
        assert_eq!(KMO.last().unwrap().lower, f64::NEG_INFINITY);
    }

    #[test]
    fn seventy_percent_satisfaction_is_remarkably_high() {
        let sentence = dimension_conclusion(Dimension::Share, 0.7);
        assert!(sentence.contains("remarkably high"));
        assert!(sentence.contains("70.0%"));
    }

    #[test]
    fn largest_drop_ignores_rise_into_satisfaction() {
        let (transition, drop) = largest_drop(&rates([0.9, 0.5, 0.45, 0.2, 0.8])).unwrap();
        assert_eq!(transition, Transition::AwarenessInterest);
        assert!((drop - 0.4).abs() < 1e-12);
    }

    #[test]
    fn conclusions_cover_each_available_stage() {
        let sentences = thesis_conclusions(
            &FunnelResults::default(),
            &rates([0.8, 0.7, 0.6, 0.2, 0.75]),
            &Tables::new(),
        );
        for heading in [
            "Brand Awareness",
            "Content Attraction",
            "User Interaction",
            "Purchase Conversion",
            "User Satisfaction",
            "Funnel Analysis",
            "Overall SICAS Performance",
        ] {
            assert!(
                sentences.iter().any(|s| s.contains(heading)),
                "missing {heading}"
            );
        }
    }
}
