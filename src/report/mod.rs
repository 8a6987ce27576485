//! Markdown report assembly.
//!
//! Each generator writes into a `String` with `std::fmt::Write`; chart links
//! are built from the same file stems the renderers use, relative to the
//! output root.

use std::fmt;

use crate::errors::SurveyError;

/// Funnel analysis report.
pub mod funnel;
/// Supplementary (non-funnel columns) report.
pub mod supplementary;
/// Thesis-ready report with key findings and figure gallery.
pub mod thesis;
/// Statistical validation report.
pub mod validation;

pub use funnel::funnel_report;
pub use supplementary::supplementary_report;
pub use thesis::thesis_report;
pub use validation::validation_report;

/// Run `write` into a fresh buffer, attributing formatting failures to `name`.
pub(crate) fn assemble<F>(name: &str, write: F) -> Result<String, SurveyError>
where
    F: FnOnce(&mut String) -> fmt::Result,
{
    let mut out = String::new();
    write(&mut out).map_err(|err| SurveyError::report(name, err))?;
    Ok(out)
}
