#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Frequency tables per funnel stage, demographics and supplementary questions.
pub mod analysis;
/// Command-line runners shared by the binaries.
pub mod apps;
/// SVG chart rendering.
pub mod charts;
/// Pipeline configuration.
pub mod config;
/// Centralized constants: columns, answers, thresholds, output names.
pub mod constants;
/// The five funnel stages and their survey items.
pub mod dimension;
/// Display translations of raw answer labels.
pub mod labels;
/// Frequency tables and cross-tabulations.
pub mod metrics;
/// Threshold ladders and narrative sentences.
pub mod narrative;
/// End-to-end pipelines.
pub mod pipeline;
/// Markdown report generators.
pub mod report;
/// Survey sources and the in-memory response table.
pub mod source;
/// Reliability, validity and factor analysis.
pub mod stats;
/// Output files and optional version-control sync.
pub mod transport;
/// Shared type aliases.
pub mod types;
/// Text formatting helpers.
pub mod utils;

mod errors;

pub use analysis::{FunnelRates, FunnelResults, SupplementaryResults, Tables};
pub use config::AnalysisConfig;
pub use dimension::Dimension;
pub use errors::SurveyError;
pub use metrics::{CrossTab, FrequencyTable};
pub use pipeline::{
    run_all, run_funnel_analysis, run_statistical_validation, run_supplementary_analysis,
    run_thesis_report,
};
pub use source::{CsvFileSource, InMemorySource, SurveySource, SurveyTable, load_survey};
pub use stats::{FactorOutcome, Reliability, ValidationResults, validate};
pub use types::{CategoryLabel, ColumnName, DisplayLabel, EncodingName, ItemCode, Sentence, TableKey};
