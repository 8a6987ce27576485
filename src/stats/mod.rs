//! Statistical validation of the funnel model.
//!
//! Encoding turns answers into ordinal codes; reliability, correlation and
//! factor analysis then run over that matrix. Small samples and missing
//! columns never fail: they surface as `None` or placeholder variants.

use serde::Serialize;

/// Correlations, dimension scores and validity summaries.
pub mod correlation;
/// Chi-square tail probabilities.
pub mod distribution;
/// Ordinal encoding of the dimension items.
pub mod encode;
/// Factor analysis and PCA.
pub mod factor;
/// Symmetric eigen decomposition and matrix inverse.
pub mod linalg;
/// Cronbach's alpha.
pub mod reliability;

pub use correlation::{CorrelationMatrix, ValidityReport, pearson, validity_analysis};
pub use encode::{EncodedMatrix, encode_dimensions};
pub use factor::{FactorAnalysis, FactorOutcome, Pca, factor_analysis};
pub use reliability::{Reliability, ReliabilityReport, cronbach_alpha, reliability_analysis};

use crate::source::SurveyTable;

/// All validation results for one dataset.
#[derive(Clone, Debug, Serialize)]
pub struct ValidationResults {
    /// Cronbach's alpha per dimension.
    pub reliability: ReliabilityReport,
    /// Correlation validity.
    pub validity: ValidityReport,
    /// Factor analysis and PCA.
    pub factor: FactorOutcome,
}

/// Encode `table` and run every validation stage.
pub fn validate(table: &SurveyTable) -> ValidationResults {
    let matrix = encode_dimensions(table);
    ValidationResults {
        reliability: reliability_analysis(&matrix),
        validity: validity_analysis(&matrix),
        factor: factor_analysis(&matrix),
    }
}
