use indexmap::IndexMap;
use ndarray::{Array2, ArrayView1, Axis};
use serde::Serialize;

use super::encode::EncodedMatrix;
use crate::constants::validation::{MIN_RELIABILITY_ITEMS, MIN_RELIABILITY_RESPONDENTS};
use crate::dimension::Dimension;
use crate::types::ItemCode;

/// Internal consistency of one dimension.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Reliability {
    /// Cronbach's alpha over the dimension's items.
    Alpha(f64),
    /// Only one item is declared, so alpha is undefined.
    SingleItem,
    /// Multiple items, but too few complete rows or no variance.
    NotComputable,
}

impl Reliability {
    /// Numeric alpha, when one was computed.
    pub fn alpha(self) -> Option<f64> {
        match self {
            Reliability::Alpha(alpha) => Some(alpha),
            _ => None,
        }
    }
}

/// Per-dimension reliability plus the pooled alpha.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ReliabilityReport {
    /// Reliability per dimension, in funnel order.
    pub dimensions: IndexMap<Dimension, Reliability>,
    /// Alpha over the items of every dimension with a numeric alpha.
    ///
    /// Present only when at least two such dimensions exist.
    pub overall: Option<f64>,
}

fn sample_variance(values: ArrayView1<'_, f64>) -> f64 {
    let n = values.len() as f64;
    let mean = values.sum() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
}

/// Cronbach's alpha of complete-case `items` (rows × items).
///
/// `None` with fewer than two items or rows, or when the summed scores have
/// zero variance.
pub fn cronbach_alpha(items: &Array2<f64>) -> Option<f64> {
    let (rows, k) = items.dim();
    if k < MIN_RELIABILITY_ITEMS || rows < MIN_RELIABILITY_RESPONDENTS {
        return None;
    }
    let item_variance: f64 = items.axis_iter(Axis(1)).map(sample_variance).sum();
    let totals = items.sum_axis(Axis(1));
    let total_variance = sample_variance(totals.view());
    if total_variance == 0.0 || !total_variance.is_finite() {
        return None;
    }
    let k = k as f64;
    Some((k / (k - 1.0)) * (1.0 - item_variance / total_variance))
}

/// Reliability of each dimension and of the pooled multi-item dimensions.
pub fn reliability_analysis(matrix: &EncodedMatrix) -> ReliabilityReport {
    let mut dimensions = IndexMap::new();
    for dimension in Dimension::ALL {
        let declared = dimension.items().len();
        let reliability = if declared < MIN_RELIABILITY_ITEMS {
            Reliability::SingleItem
        } else {
            let codes = matrix.dimension_codes(dimension);
            match alpha_of(matrix, &codes) {
                Some(alpha) => Reliability::Alpha(alpha),
                None => Reliability::NotComputable,
            }
        };
        dimensions.insert(dimension, reliability);
    }

    let scored: Vec<Dimension> = dimensions
        .iter()
        .filter(|(_, reliability)| reliability.alpha().is_some())
        .map(|(dimension, _)| *dimension)
        .collect();
    let overall = if scored.len() >= 2 {
        let codes: Vec<ItemCode> = scored
            .iter()
            .flat_map(|dimension| matrix.dimension_codes(*dimension))
            .collect();
        alpha_of(matrix, &codes)
    } else {
        None
    };

    ReliabilityReport {
        dimensions,
        overall,
    }
}

fn alpha_of(matrix: &EncodedMatrix, codes: &[ItemCode]) -> Option<f64> {
    if codes.len() < MIN_RELIABILITY_ITEMS {
        return None;
    }
    cronbach_alpha(&matrix.complete_cases(codes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::columns;
    use crate::source::SurveyTable;
    use crate::stats::encode::encode_dimensions;
    use ndarray::Array2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn perfectly_correlated_items_have_alpha_one() {
        let base = [1.0, 2.0, 3.0, 4.0, 5.0, 2.0, 3.0];
        let items = Array2::from_shape_fn((base.len(), 3), |(row, _)| base[row]);
        let alpha = cronbach_alpha(&items).unwrap();
        assert!((alpha - 1.0).abs() < 1e-12);
    }

    #[test]
    fn independent_noise_has_alpha_near_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        let items = Array2::from_shape_fn((2000, 4), |_| rng.random_range(1..=5) as f64);
        let alpha = cronbach_alpha(&items).unwrap();
        assert!(alpha.abs() < 0.15, "alpha was {alpha}");
    }

    #[test]
    fn too_few_items_or_rows_is_none() {
        assert!(cronbach_alpha(&Array2::zeros((10, 1))).is_none());
        assert!(cronbach_alpha(&Array2::ones((1, 3))).is_none());
        assert!(cronbach_alpha(&Array2::ones((5, 3))).is_none());
    }

    #[test]
    fn single_item_dimensions_are_flagged() {
        let table = SurveyTable::new(
            vec![
                columns::INTERACTION.to_string(),
                columns::INTERACTION_EXPERIENCE.to_string(),
                columns::AWARENESS.to_string(),
            ],
            vec![
                vec!["经常互动(点赞、评论、分享等)", "非常好", "非常了解"],
                vec!["偶尔互动", "比较好", "略有了解"],
                vec!["很少互动", "一般", "不太了解"],
                vec!["从未互动", "较差", "完全不了解"],
            ],
        );
        let report = reliability_analysis(&encode_dimensions(&table));
        assert_eq!(report.dimensions[&Dimension::Sense], Reliability::SingleItem);
        let alpha = report.dimensions[&Dimension::Communication].alpha().unwrap();
        assert!((alpha - 1.0).abs() < 1e-12);
        assert!(report.overall.is_none());
    }
}
