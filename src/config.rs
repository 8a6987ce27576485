use std::path::PathBuf;

use crate::constants::loader::DEFAULT_INPUT_FILE;
use crate::transport::OutputLayout;

/// Settings shared by every pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Survey export to load.
    pub input: PathBuf,
    /// Directory receiving reports and chart directories.
    pub output_root: PathBuf,
    /// Stage, commit and push outputs with `git` after the validation and
    /// supplementary pipelines.
    pub sync: bool,
    /// Optional path for a JSON dump of the computed statistics.
    pub summary_json: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            output_root: PathBuf::from("."),
            sync: false,
            summary_json: None,
        }
    }
}

impl AnalysisConfig {
    /// Override the survey input path.
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Override the output root.
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Enable or disable `git` sync.
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Write a JSON summary to `path`.
    pub fn with_summary_json(mut self, path: impl Into<PathBuf>) -> Self {
        self.summary_json = Some(path.into());
        self
    }

    /// Output layout rooted at [`Self::output_root`].
    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(&self.output_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standalone_binaries() {
        let config = AnalysisConfig::default();
        assert_eq!(config.input, PathBuf::from("data.csv"));
        assert_eq!(config.output_root, PathBuf::from("."));
        assert!(!config.sync);
        assert!(config.summary_json.is_none());
    }

    #[test]
    fn builders_override_fields() {
        let config = AnalysisConfig::default()
            .with_input("survey.csv")
            .with_output_root("out")
            .with_sync(true)
            .with_summary_json("out/summary.json");
        assert_eq!(config.input, PathBuf::from("survey.csv"));
        assert_eq!(config.layout().dir("plots"), PathBuf::from("out").join("plots"));
        assert!(config.sync);
        assert_eq!(config.summary_json, Some(PathBuf::from("out/summary.json")));
    }
}
