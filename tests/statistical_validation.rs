use std::fs;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sicas::constants::columns;
use sicas::{
    AnalysisConfig, Dimension, InMemorySource, Reliability, SurveyTable, run_statistical_validation,
};
use tempfile::tempdir;

const AWARENESS: [&str; 4] = ["完全不了解", "不太了解", "略有了解", "非常了解"];
const ATTRACTION: [&str; 5] = ["完全不吸引", "不太吸引", "一般", "比较吸引", "非常吸引"];
const INTERACTION: [&str; 4] = ["从未互动", "很少互动", "偶尔互动", "经常互动(点赞、评论、分享等)"];
const EXPERIENCE: [&str; 5] = ["非常差", "较差", "一般", "比较好", "非常好"];
const SATISFACTION: [&str; 5] = ["非常不满意", "不太满意", "一般", "比较满意", "非常满意"];

fn header() -> Vec<String> {
    [
        columns::AWARENESS,
        columns::ATTRACTION,
        columns::INTERACTION,
        columns::INTERACTION_EXPERIENCE,
        columns::PURCHASE,
        columns::SATISFACTION,
    ]
    .iter()
    .map(|column| column.to_string())
    .collect()
}

fn pick<'a>(scale: &[&'a str], level: i64) -> &'a str {
    scale[level.clamp(0, scale.len() as i64 - 1) as usize]
}

/// Every item follows one latent engagement level plus a small jitter.
fn latent_rows(rng: &mut StdRng, n: usize) -> Vec<Vec<&'static str>> {
    (0..n)
        .map(|_| {
            let latent: i64 = rng.random_range(0..5);
            let mut jitter = || latent + rng.random_range(-1..=1);
            let purchase = if jitter() >= 3 { "是" } else { "否" };
            vec![
                pick(&AWARENESS, jitter() - 1),
                pick(&ATTRACTION, jitter()),
                pick(&INTERACTION, jitter() - 1),
                pick(&EXPERIENCE, jitter()),
                purchase,
                pick(&SATISFACTION, jitter()),
            ]
        })
        .collect()
}

/// Communication items answered independently of each other.
fn noise_rows(rng: &mut StdRng, n: usize) -> Vec<Vec<&'static str>> {
    (0..n)
        .map(|_| {
            vec![
                pick(&AWARENESS, rng.random_range(0..4)),
                pick(&ATTRACTION, rng.random_range(0..5)),
                pick(&INTERACTION, rng.random_range(0..4)),
                pick(&EXPERIENCE, rng.random_range(0..5)),
                if rng.random_bool(0.5) { "是" } else { "否" },
                pick(&SATISFACTION, rng.random_range(0..5)),
            ]
        })
        .collect()
}

#[test]
fn latent_engagement_is_reliable_and_factorable() {
    let mut rng = StdRng::seed_from_u64(7);
    let table = SurveyTable::new(header(), latent_rows(&mut rng, 200));
    let dir = tempdir().unwrap();
    let config = AnalysisConfig::default().with_output_root(dir.path());

    let outcome = run_statistical_validation(&InMemorySource::new("latent", table), &config).unwrap();

    let communication = outcome.results.reliability.dimensions[&Dimension::Communication];
    assert!(communication.alpha().unwrap() > 0.6, "{communication:?}");
    assert_eq!(
        outcome.results.reliability.dimensions[&Dimension::Sense],
        Reliability::SingleItem
    );
    assert!(outcome.results.validity.dimensions.is_some());

    let analysis = outcome.results.factor.analysis().unwrap();
    assert_eq!(analysis.codes, vec!["S1", "I1", "C1", "C2", "A1", "S2"]);
    assert!(analysis.kmo.unwrap() >= 0.5);
    assert!(analysis.bartlett.p_value < 0.05);
    assert!(analysis.is_factorable());
    assert!(analysis.extraction.is_some());

    let report = fs::read_to_string(&outcome.artifacts.report).unwrap();
    assert!(report.contains("## 1. Reliability Analysis (Cronbach's Alpha)"));
    assert!(report.contains("### 3.3 Factor Loadings"));
    assert!(report.contains("validation_plots/scree_plot.svg"));
    let plots = dir.path().join("validation_plots");
    for chart in ["dimension_correlations", "scree_plot", "factor_loadings", "pca_variance"] {
        assert!(plots.join(format!("{chart}.svg")).exists(), "{chart} missing");
    }
}

#[test]
fn independent_answers_have_alpha_near_zero() {
    let mut rng = StdRng::seed_from_u64(42);
    let table = SurveyTable::new(header(), noise_rows(&mut rng, 400));
    let dir = tempdir().unwrap();
    let config = AnalysisConfig::default().with_output_root(dir.path());

    let outcome = run_statistical_validation(&InMemorySource::new("noise", table), &config).unwrap();

    let alpha = outcome.results.reliability.dimensions[&Dimension::Communication]
        .alpha()
        .unwrap();
    assert!(alpha.abs() < 0.3, "alpha {alpha}");
    assert!(outcome.artifacts.report.exists());
}

#[test]
fn small_samples_explain_missing_factor_analysis() {
    let mut rng = StdRng::seed_from_u64(1);
    let table = SurveyTable::new(header(), latent_rows(&mut rng, 5));
    let dir = tempdir().unwrap();
    let config = AnalysisConfig::default().with_output_root(dir.path());

    let outcome = run_statistical_validation(&InMemorySource::new("small", table), &config).unwrap();

    assert!(outcome.results.factor.analysis().is_none());
    let report = fs::read_to_string(&outcome.artifacts.report).unwrap();
    assert!(report.contains("Factor analysis could not be performed due to insufficient data."));
    assert!(!dir.path().join("validation_plots").join("scree_plot.svg").exists());
}
