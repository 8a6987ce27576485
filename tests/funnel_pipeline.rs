use std::fs;
use std::path::Path;

use sicas::charts::{chart_path, names};
use sicas::constants::columns;
use sicas::{AnalysisConfig, CsvFileSource, Dimension, run_funnel_analysis, run_thesis_report};
use tempfile::tempdir;

const RESPONDENTS: usize = 50;

fn header() -> Vec<String> {
    [
        columns::GENDER,
        columns::AGE,
        columns::AWARENESS,
        columns::ATTRACTION,
        columns::INTERACTION,
        columns::PURCHASE,
        columns::SATISFACTION,
    ]
    .iter()
    .enumerate()
    .map(|(idx, question)| format!("{}、{question}", idx + 1))
    .collect()
}

/// Favourable shares: awareness 76%, attraction 40%, interaction 76%,
/// purchase 40%, satisfaction 70%.
fn response(idx: usize) -> Vec<&'static str> {
    let gender = if idx % 3 == 0 { "女" } else { "男" };
    let age = ["18-25岁", "26-35岁", "26-35岁", "36-45岁", "18-25岁"][idx % 5];
    let awareness = ["非常了解", "略有了解", "略有了解", "不太了解"][idx % 4];
    let attraction = ["非常吸引", "比较吸引", "一般", "不太吸引", "不太吸引"][idx % 5];
    let interaction = ["经常互动(点赞、评论、分享等)", "偶尔互动", "从未互动", "很少互动"][idx % 4];
    let purchase = if idx % 5 < 2 { "是" } else { "否" };
    let satisfaction = match idx {
        0..20 => "非常满意",
        20..35 => "比较满意",
        35..45 => "一般",
        _ => "不太满意",
    };
    vec![gender, age, awareness, attraction, interaction, purchase, satisfaction]
}

fn write_survey(path: &Path) {
    let mut writer = csv::Writer::from_path(path).unwrap();
    writer.write_record(header()).unwrap();
    for idx in 0..RESPONDENTS {
        writer.write_record(response(idx)).unwrap();
    }
    writer.flush().unwrap();
}

#[test]
fn funnel_analysis_writes_one_chart_per_table() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.csv");
    write_survey(&input);
    let config = AnalysisConfig::default()
        .with_input(&input)
        .with_output_root(dir.path());

    let outcome = run_funnel_analysis(&CsvFileSource::new(&input), &config).unwrap();

    for dimension in Dimension::ALL {
        let tables = outcome.results.stage(dimension).unwrap();
        assert_eq!(tables.len(), 1, "{dimension:?} should have its headline table only");
        assert!(tables.values().all(|table| table.total() == RESPONDENTS));
    }
    assert_eq!(outcome.demographics.len(), 2);
    assert_eq!(
        outcome.artifacts.charts.len(),
        outcome.results.table_count() + outcome.demographics.len() + 1
    );

    let plots = dir.path().join("plots");
    for (dimension, tables) in outcome.results.iter() {
        for key in tables.keys() {
            assert!(chart_path(&plots, &names::stage(dimension, key)).exists());
        }
    }
    assert!(chart_path(&plots, names::FUNNEL).exists());

    let satisfaction = outcome.rates.share.unwrap();
    assert!((satisfaction - 0.7).abs() < 1e-9);

    let report = fs::read_to_string(dir.path().join("sicas_analysis_report.md")).unwrap();
    assert!(report.contains("### Sense"));
    assert!(report.contains("#### Satisfaction"));
    assert!(report.contains("plots/sicas_funnel.svg"));
}

#[test]
fn thesis_findings_pick_the_band_of_each_stage() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.csv");
    write_survey(&input);
    let config = AnalysisConfig::default()
        .with_input(&input)
        .with_output_root(dir.path());

    let outcome = run_thesis_report(&CsvFileSource::new(&input), &config).unwrap();

    assert!(outcome.rates.is_complete());
    let finding = |heading: &str| {
        outcome
            .conclusions
            .iter()
            .find(|sentence| sentence.starts_with(heading))
            .unwrap_or_else(|| panic!("no {heading} finding"))
            .clone()
    };
    let awareness = finding("**Brand Awareness:**");
    assert!(awareness.contains("enjoys high brand recognition, with over 76.0%"), "{awareness}");
    let attraction = finding("**Content Attraction:**");
    assert!(
        attraction.contains("40.0% of respondents find Arc'teryx's social media content attractive, suggesting room"),
        "{attraction}"
    );
    let interaction = finding("**User Interaction:**");
    assert!(interaction.contains("With 76.0% of respondents engaging"), "{interaction}");
    let purchase = finding("**Purchase Conversion:**");
    assert!(purchase.contains("The 40.0% conversion rate") && purchase.contains("strong return on investment"), "{purchase}");
    let satisfaction = finding("**User Satisfaction:**");
    assert!(satisfaction.contains("remarkably high satisfaction rate (70.0%)"), "{satisfaction}");

    let report = fs::read_to_string(&outcome.artifacts.report).unwrap();
    for sentence in [awareness, attraction, interaction, purchase, satisfaction] {
        assert!(report.contains(&sentence));
    }
}

#[test]
fn missing_columns_are_skipped_not_fatal() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.csv");
    fs::write(&input, format!("1、{}\n男\n女\n", columns::GENDER)).unwrap();
    let config = AnalysisConfig::default()
        .with_input(&input)
        .with_output_root(dir.path());

    let outcome = run_funnel_analysis(&CsvFileSource::new(&input), &config).unwrap();

    assert_eq!(outcome.results.table_count(), 0);
    assert!(outcome.rates.available().is_empty());
    assert!(!chart_path(&dir.path().join("plots"), names::FUNNEL).exists());
    assert!(outcome.artifacts.report.exists());
}
