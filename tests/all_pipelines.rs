use std::fs;
use std::path::Path;

use sicas::apps::run_sicas;
use sicas::constants::columns;
use tempfile::tempdir;

const QUESTIONS: [&str; 10] = [
    columns::GENDER,
    columns::AGE,
    columns::AWARENESS,
    columns::ATTRACTION,
    columns::INTERACTION,
    columns::INTERACTION_EXPERIENCE,
    columns::PURCHASE,
    columns::SATISFACTION,
    columns::CONTACT_CHANNELS,
    columns::INCREASED_UNDERSTANDING,
];

const ANSWERS: [[&str; 10]; 4] = [
    ["男", "18-25岁", "非常了解", "非常吸引", "经常互动(点赞、评论、分享等)", "非常好", "是", "非常满意", "微博┋小红书", "很多"],
    ["女", "26-35岁", "略有了解", "比较吸引", "偶尔互动", "比较好", "否", "比较满意", "小红书", "一些"],
    ["女", "26-35岁", "不太了解", "一般", "很少互动", "一般", "是", "一般", "抖音┋小红书", "较少"],
    ["男", "36-45岁", "完全不了解", "不太吸引", "从未互动", "较差", "否", "不太满意", "朋友推荐", "完全没有"],
];

fn write_survey(path: &Path, repeats: usize) {
    let mut writer = csv::Writer::from_path(path).unwrap();
    writer
        .write_record(QUESTIONS.iter().enumerate().map(|(idx, q)| format!("{}、{q}", idx + 1)))
        .unwrap();
    for _ in 0..repeats {
        for row in ANSWERS {
            writer.write_record(row).unwrap();
        }
    }
    writer.flush().unwrap();
}

fn args(items: &[&str]) -> impl Iterator<Item = String> {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .into_iter()
}

#[test]
fn all_subcommand_writes_every_report_and_summary() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("survey.csv");
    let summary = dir.path().join("summary.json");
    write_survey(&input, 5);

    run_sicas(args(&[
        "all",
        "--input",
        input.to_str().unwrap(),
        "--output-root",
        dir.path().to_str().unwrap(),
        "--summary-json",
        summary.to_str().unwrap(),
    ]))
    .unwrap();

    for report in [
        "sicas_analysis_report.md",
        "statistical_validation_report.md",
        "thesis_report.md",
        "additional_analysis_report.md",
    ] {
        assert!(dir.path().join(report).exists(), "{report} missing");
    }
    for plots in ["plots", "validation_plots", "thesis_plots", "additional_plots"] {
        assert!(dir.path().join(plots).is_dir(), "{plots} missing");
    }

    let additional = dir.path().join("additional_plots");
    assert!(additional.join("brand_contact_channels.svg").exists());
    assert!(additional.join("understanding_vs_purchase.svg").exists());
    assert!(additional.join("experience_vs_satisfaction.svg").exists());

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
    for key in ["funnel", "validation", "thesis", "supplementary"] {
        assert!(json.get(key).is_some(), "{key} missing from summary");
    }
    let channels = &json["supplementary"]["results"]["contact_channels"];
    assert!(channels.is_object(), "{channels}");

    let report = fs::read_to_string(dir.path().join("additional_analysis_report.md")).unwrap();
    assert!(report.contains("additional_plots/understanding_vs_purchase.svg"));
}

#[test]
fn help_and_unknown_subcommands() {
    assert!(run_sicas(args(&["all", "--help"])).is_ok());
    assert!(run_sicas(args(&["report"])).is_err());
}
