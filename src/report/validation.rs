use std::fmt::{self, Write};
use std::path::Path;

use super::assemble;
use crate::charts::{chart_path, names};
use crate::constants::output::VALIDATION_REPORT;
use crate::constants::validation::{
    ADEQUATE_ALPHA, ADEQUATE_MEAN_CORRELATION, BARTLETT_SIGNIFICANCE, KMO_THRESHOLD, MAX_FACTORS,
    THEORY_CORRELATION,
};
use crate::dimension::Dimension;
use crate::errors::SurveyError;
use crate::narrative::{ALPHA, Adequacy, KMO, Level, MEAN_CORRELATION, rank};
use crate::stats::correlation::CorrelationMatrix;
use crate::stats::factor::{FactorAnalysis, FactorExtraction};
use crate::stats::{FactorOutcome, Reliability, ValidationResults};
use crate::utils::{markdown_image, percent};

const FUTURE_RESEARCH: [(&str, &str); 5] = [
    (
        "Expanded Measurement Scales",
        "Develop multiple items for each SICAS dimension to enable more robust reliability assessment.",
    ),
    (
        "Larger Sample Size",
        "Collect data from a larger sample to improve the statistical power of factor analysis.",
    ),
    (
        "Confirmatory Factor Analysis",
        "Conduct confirmatory factor analysis to formally test the hypothesized five-factor structure of the SICAS model.",
    ),
    (
        "Test-Retest Reliability",
        "Assess the stability of measurements over time, particularly for single-item dimensions.",
    ),
    (
        "Cross-Validation",
        "Validate the model across different industries and cultural contexts to establish generalizability.",
    ),
];

fn table_label(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Sense => "Sense (Awareness)",
        Dimension::Interest => "Interest (Attraction)",
        Dimension::Communication => "Communication (Interaction)",
        Dimension::Action => "Action (Purchase)",
        Dimension::Share => "Share (Satisfaction)",
    }
}

fn write_reliability(out: &mut String, results: &ValidationResults) -> fmt::Result {
    writeln!(out, "## 1. Reliability Analysis (Cronbach's Alpha)")?;
    writeln!(out)?;
    writeln!(
        out,
        "Reliability analysis ensures that the measurement items within each dimension show internal consistency. Cronbach's alpha values above 0.7 are generally considered acceptable, while values above 0.8 indicate good reliability."
    )?;
    writeln!(out)?;
    writeln!(out, "| Dimension | Cronbach's Alpha | Interpretation |")?;
    writeln!(out, "|-----------|-----------------|----------------|")?;
    for (dimension, reliability) in &results.reliability.dimensions {
        let (value, interpretation) = match reliability {
            Reliability::Alpha(alpha) => (format!("{alpha:.3}"), rank(*alpha, &ALPHA).to_string()),
            Reliability::SingleItem => (
                "Single item".to_string(),
                "Cannot calculate (single item)".to_string(),
            ),
            Reliability::NotComputable => (
                "Not computable".to_string(),
                "Insufficient complete responses".to_string(),
            ),
        };
        writeln!(out, "| {} | {value} | {interpretation} |", table_label(*dimension))?;
    }
    if let Some(overall) = results.reliability.overall {
        writeln!(
            out,
            "| **Overall SICAS Model** | {overall:.3} | {} |",
            rank(overall, &ALPHA)
        )?;
    }
    writeln!(out)?;

    if let Some(overall) = results.reliability.overall {
        if overall >= ADEQUATE_ALPHA {
            writeln!(
                out,
                "The overall Cronbach's alpha value indicates that the SICAS model demonstrates adequate internal consistency reliability. This means that the items within each dimension consistently measure the same construct."
            )?;
        } else {
            writeln!(
                out,
                "The overall Cronbach's alpha value suggests some inconsistency in the measurement items. This could be due to the limited number of items per dimension or variability in respondent interpretations. Future research should consider expanding the number of items per dimension to improve reliability."
            )?;
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "> **Note**: Several dimensions in this analysis contain only a single measurement item, which prevents the calculation of Cronbach's alpha for those dimensions individually. For single-item dimensions, alternative validation methods such as test-retest reliability would be more appropriate but are beyond the scope of this analysis."
    )?;
    writeln!(out)
}

fn theory_checks(correlations: &CorrelationMatrix<Dimension>) -> Vec<&'static str> {
    let checks = [
        (
            Dimension::Sense,
            Dimension::Interest,
            "As theoretically expected, brand awareness (Sense) correlates positively with content attraction (Interest), suggesting that consumers who are more aware of the brand tend to find its content more attractive.",
        ),
        (
            Dimension::Interest,
            Dimension::Action,
            "The correlation between content attraction (Interest) and purchase behavior (Action) confirms that engaging content contributes to conversion.",
        ),
        (
            Dimension::Communication,
            Dimension::Share,
            "The relationship between interaction (Communication) and satisfaction (Share) highlights how engagement impacts overall satisfaction with the brand's social media presence.",
        ),
    ];
    checks
        .into_iter()
        .filter(|(a, b, _)| {
            correlations
                .get(*a, *b)
                .is_some_and(|r| r > THEORY_CORRELATION)
        })
        .map(|(_, _, sentence)| sentence)
        .collect()
}

fn write_validity(out: &mut String, results: &ValidationResults, plots_dir: &Path) -> fmt::Result {
    writeln!(out, "## 2. Validity Analysis")?;
    writeln!(out)?;
    writeln!(
        out,
        "Validity analysis examines whether the survey instrument accurately measures what it intends to measure. For the SICAS model, we analyze the correlations between dimensions to assess construct validity."
    )?;
    writeln!(out)?;
    writeln!(out, "### 2.1 Dimension Correlations")?;
    writeln!(out)?;

    let Some(correlations) = &results.validity.dimensions else {
        writeln!(
            out,
            "Fewer than two SICAS dimensions are present in the data, so dimension correlations could not be computed."
        )?;
        return writeln!(out);
    };

    writeln!(out, "The following heatmap shows the correlations between SICAS dimensions:")?;
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        markdown_image(
            "Dimension Correlations",
            &chart_path(plots_dir, names::DIMENSION_CORRELATIONS)
        )
    )?;
    writeln!(out)?;

    let mut paragraph = Vec::new();
    if let Some((a, b, r)) = correlations.strongest_pair() {
        paragraph.push(format!(
            "The correlation analysis reveals that the strongest relationship exists between the **{}** and **{}** dimensions (r = {r:.2}).",
            a.name(),
            b.name()
        ));
    }
    paragraph.extend(theory_checks(correlations).into_iter().map(str::to_string));
    if !paragraph.is_empty() {
        writeln!(out, "{}", paragraph.join(" "))?;
        writeln!(out)?;
    }

    if let Some(mean) = correlations.mean_off_diagonal() {
        let sentence = match rank(mean, &MEAN_CORRELATION) {
            Level::High => {
                "The moderate to strong correlations between dimensions provide evidence of construct validity, indicating that the five dimensions of the SICAS model are interrelated as expected by the theoretical framework. However, the correlations are not so high as to suggest redundancy among dimensions."
            }
            Level::Moderate => {
                "The modest correlations between dimensions suggest that the SICAS components are measuring related but distinct aspects of social media marketing effectiveness, providing evidence of discriminant validity while maintaining theoretical coherence."
            }
            Level::Low => {
                "The relatively weak correlations between dimensions suggest that the SICAS components may be measuring distinct aspects of social media marketing effectiveness with limited overlap. While this demonstrates discriminant validity, it raises questions about the theoretical coherence of the model as a unified framework."
            }
        };
        writeln!(out, "{sentence}")?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_adequacy(out: &mut String, analysis: &FactorAnalysis) -> fmt::Result {
    writeln!(out, "### 3.1 Sampling Adequacy")?;
    writeln!(out)?;
    match analysis.kmo {
        Some(kmo) => {
            writeln!(out, "**Kaiser-Meyer-Olkin (KMO) Measure**: {kmo:.3}")?;
            writeln!(out)?;
            let sentence = match rank(kmo, &KMO) {
                Adequacy::Excellent => "The KMO value indicates **excellent** sampling adequacy for factor analysis.",
                Adequacy::Good => "The KMO value indicates **good** sampling adequacy for factor analysis.",
                Adequacy::Acceptable => "The KMO value indicates **acceptable** sampling adequacy for factor analysis.",
                Adequacy::Mediocre => {
                    "The KMO value indicates **mediocre** but acceptable sampling adequacy for factor analysis."
                }
                Adequacy::Poor => {
                    "The KMO value indicates **poor** sampling adequacy, suggesting caution in interpreting factor analysis results."
                }
            };
            writeln!(out, "{sentence}")?;
        }
        None => {
            writeln!(out, "**Kaiser-Meyer-Olkin (KMO) Measure**: not computable")?;
            writeln!(out)?;
            writeln!(
                out,
                "The item correlation matrix is singular, so sampling adequacy could not be assessed; factor analysis results should be interpreted with caution."
            )?;
        }
    }
    writeln!(out)?;

    let bartlett = &analysis.bartlett;
    writeln!(
        out,
        "**Bartlett's Test of Sphericity**: Chi-square = {:.2}, p-value = {:.4}",
        bartlett.chi_square, bartlett.p_value
    )?;
    writeln!(out)?;
    if bartlett.p_value < BARTLETT_SIGNIFICANCE {
        writeln!(
            out,
            "Bartlett's test is statistically significant (p < 0.05), indicating that factor analysis is appropriate for this data."
        )?;
    } else {
        writeln!(
            out,
            "Bartlett's test is not statistically significant (p > 0.05), suggesting caution in interpreting factor analysis results."
        )?;
    }
    writeln!(out)
}

fn write_loadings_table(out: &mut String, analysis: &FactorAnalysis, extraction: &FactorExtraction) -> fmt::Result {
    let factors: Vec<String> = (1..=extraction.n_factors).map(|idx| format!("Factor {idx}")).collect();
    writeln!(out, "| Item | {} | Communality |", factors.join(" | "))?;
    writeln!(out, "|------|{}-------------|", "----------|".repeat(factors.len()))?;
    for (row, code) in analysis.codes.iter().enumerate() {
        let cells: Vec<String> = extraction
            .loadings
            .row(row)
            .iter()
            .map(|loading| format!("{loading:.3}"))
            .collect();
        let communality = extraction.communalities.get(row).copied().unwrap_or(f64::NAN);
        writeln!(out, "| {code} | {} | {communality:.3} |", cells.join(" | "))?;
    }
    writeln!(out)
}

fn write_factor(out: &mut String, results: &ValidationResults, plots_dir: &Path) -> fmt::Result {
    writeln!(out, "## 3. Factor Analysis")?;
    writeln!(out)?;
    writeln!(
        out,
        "Factor analysis examines whether the measurement items cluster as expected into the five SICAS dimensions. This helps validate the structural integrity of the model."
    )?;
    writeln!(out)?;

    let analysis = match &results.factor {
        FactorOutcome::Insufficient(reason) => {
            writeln!(
                out,
                "**Note**: {reason}. Factor analysis could not be performed due to insufficient data."
            )?;
            return writeln!(out);
        }
        FactorOutcome::Analyzed(analysis) => analysis,
    };

    write_adequacy(out, analysis)?;

    writeln!(out, "### 3.2 Factor Extraction")?;
    writeln!(out)?;
    writeln!(out, "The scree plot helps determine the optimal number of factors to extract:")?;
    writeln!(out)?;
    writeln!(out, "{}", markdown_image("Scree Plot", &chart_path(plots_dir, names::SCREE_PLOT)))?;
    writeln!(out)?;

    match &analysis.extraction {
        Some(extraction) => {
            writeln!(out, "### 3.3 Factor Loadings")?;
            writeln!(out)?;
            writeln!(out, "The factor loadings show how strongly each measurement item relates to each factor:")?;
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                markdown_image("Factor Loadings", &chart_path(plots_dir, names::FACTOR_LOADINGS))
            )?;
            writeln!(out)?;
            write_loadings_table(out, analysis, extraction)?;
            writeln!(out, "**Interpretation**:")?;
            writeln!(out)?;
            if analysis.aligns_with_dimensions().unwrap_or(false) {
                writeln!(
                    out,
                    "The factor loadings generally align with the theoretical SICAS dimensions, with items from the same dimension loading most strongly on the same factor. This provides evidence of construct validity for the SICAS model."
                )?;
            } else {
                writeln!(
                    out,
                    "The factor loading pattern shows some deviation from the theoretical SICAS structure. Some items from different dimensions load on the same factor, which suggests that respondents may perceive these dimensions as related or that the measurement items may need refinement to better distinguish between dimensions."
                )?;
            }
            writeln!(out)?;
        }
        None => {
            writeln!(
                out,
                "Factors were not extracted because the data did not meet the sampling adequacy criteria (KMO of at least {KMO_THRESHOLD} and a significant Bartlett's test)."
            )?;
            writeln!(out)?;
        }
    }

    if let Some(pca) = &analysis.pca {
        writeln!(out, "### 3.4 Principal Component Analysis")?;
        writeln!(out)?;
        writeln!(out, "PCA provides an alternative view of the dimensional structure:")?;
        writeln!(out)?;
        writeln!(out, "{}", markdown_image("PCA Variance", &chart_path(plots_dir, names::PCA_VARIANCE)))?;
        writeln!(out)?;
        let components = pca.components_for_target;
        let first = pca.variance_ratio.first().copied().unwrap_or(0.0);
        let reached = pca.cumulative.get(components.saturating_sub(1)).copied().unwrap_or(0.0);
        writeln!(
            out,
            "The first component explains {} of the total variance, while the first {components} components together explain {} of the variance.",
            percent(first),
            percent(reached)
        )?;
        writeln!(out)?;
        if components <= MAX_FACTORS {
            writeln!(
                out,
                "The fact that {components} components explain over 80% of the variance is consistent with the five-dimensional SICAS model structure."
            )?;
        } else {
            writeln!(
                out,
                "The PCA results suggest that more than the five theoretical SICAS dimensions may be present in the data, indicating potential complexity in how respondents perceive the social media marketing elements."
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// The three adequacy flags behind the conclusion paragraph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adequacies {
    /// Overall alpha is adequate.
    pub reliability: bool,
    /// Mean dimension correlation is adequate.
    pub validity: bool,
    /// Factor solution exists and aligns with the dimensions.
    pub factor: bool,
}

impl Adequacies {
    /// Derive the flags from validation results.
    pub fn of(results: &ValidationResults) -> Self {
        Self {
            reliability: results.reliability.overall.is_some_and(|alpha| alpha >= ADEQUATE_ALPHA),
            validity: results
                .validity
                .dimensions
                .as_ref()
                .and_then(CorrelationMatrix::mean_off_diagonal)
                .is_some_and(|mean| mean > ADEQUATE_MEAN_CORRELATION),
            factor: results
                .factor
                .analysis()
                .and_then(|analysis| analysis.kmo)
                .is_some_and(|kmo| kmo >= KMO_THRESHOLD),
        }
    }

    /// How many flags hold.
    pub fn count(self) -> usize {
        [self.reliability, self.validity, self.factor]
            .into_iter()
            .filter(|flag| *flag)
            .count()
    }
}

fn write_conclusion(out: &mut String, results: &ValidationResults) -> fmt::Result {
    writeln!(out, "## Conclusion")?;
    writeln!(out)?;
    let sentence = match Adequacies::of(results).count() {
        3 => {
            "The statistical validation provides strong support for the SICAS model as an effective framework for analyzing social media marketing effectiveness. The model demonstrates adequate reliability, construct validity, and structural integrity. The five dimensions (Sense, Interest, Communication, Action, Share) form a coherent framework that effectively captures key aspects of consumer engagement with brand social media."
        }
        2 => {
            "The statistical validation provides moderate support for the SICAS model. While some aspects of the validation are strong, others suggest areas for refinement. The current implementation of the model is adequate for analysis purposes, but future research should consider enhancing the measurement instrument with additional items per dimension to strengthen the model's statistical properties."
        }
        _ => {
            "The statistical validation results suggest that the current implementation of the SICAS model has limitations. While the theoretical framework is sound, the measurement instrument may benefit from significant refinement. Future research should consider developing more robust multi-item scales for each dimension and validating them with larger sample sizes. Despite these limitations, the model still provides useful insights into social media marketing effectiveness when interpreted cautiously."
        }
    };
    writeln!(out, "{sentence}")?;
    writeln!(out)?;

    writeln!(out, "### Recommendations for Future Research")?;
    writeln!(out)?;
    for (idx, (title, body)) in FUTURE_RESEARCH.iter().enumerate() {
        writeln!(out, "{}. **{title}**: {body}", idx + 1)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Reliability table, correlation validity, factor analysis and conclusion.
pub fn validation_report(results: &ValidationResults, plots_dir: &Path) -> Result<String, SurveyError> {
    assemble(VALIDATION_REPORT, |out| {
        writeln!(out, "# SICAS Model Statistical Validation")?;
        writeln!(out)?;
        writeln!(out, "## Introduction")?;
        writeln!(out)?;
        writeln!(
            out,
            "This report presents the statistical validation of the SICAS model used in the analysis of Arc'teryx's social media marketing effectiveness. The validation includes reliability tests (Cronbach's alpha), validity assessments, and factor analysis to verify that the survey instrument properly measures the five SICAS dimensions (Sense, Interest, Communication, Action, Share)."
        )?;
        writeln!(out)?;
        write_reliability(out, results)?;
        write_validity(out, results, plots_dir)?;
        write_factor(out, results, plots_dir)?;
        write_conclusion(out, results)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SurveyTable;
    use crate::stats::validate;

    #[test]
    fn small_sample_reports_factor_placeholder() {
        let table = SurveyTable::new(vec!["unrelated".to_string()], vec![vec!["x"]]);
        let results = validate(&table);
        let report = validation_report(&results, Path::new("validation_plots")).unwrap();
        assert!(report.contains("| Sense (Awareness) | Single item | Cannot calculate (single item) |"));
        assert!(report.contains("**Note**: Not enough items for factor analysis."));
        assert!(report.contains("1. **Expanded Measurement Scales**"));
        assert!(!report.contains("### 3.1 Sampling Adequacy"));
    }

    #[test]
    fn no_adequacy_flags_yield_limitations_conclusion() {
        let table = SurveyTable::new(vec!["unrelated".to_string()], vec![vec!["x"]]);
        let results = validate(&table);
        assert_eq!(Adequacies::of(&results).count(), 0);
        let report = validation_report(&results, Path::new("validation_plots")).unwrap();
        assert!(report.contains("has limitations"));
    }
}
