use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for loading, rendering, and report persistence failures.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// The input file could not be read or parsed under any encoding.
    #[error("survey input '{path}' is unreadable: {reason}")]
    UnreadableInput {
        /// Input file.
        path: PathBuf,
        /// Underlying I/O or parse error.
        reason: String,
    },
    /// A chart backend failed.
    #[error("chart '{name}' could not be rendered: {reason}")]
    Chart {
        /// Chart name.
        name: String,
        /// Backend error text.
        reason: String,
    },
    /// A report could not be assembled or written.
    #[error("report '{name}' could not be written: {reason}")]
    Report {
        /// Report name.
        name: String,
        /// Backend error text.
        reason: String,
    },
    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// CSV parse failure.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// JSON serialization failure.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    /// Invalid input shape or settings.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl SurveyError {
    /// Wrap a plotting backend failure for the chart identified by `name`.
    pub fn chart(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Chart {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Wrap a report assembly or persistence failure for `name`.
    pub fn report(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Report {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}
