use ndarray::{Array1, Array2, ArrayView1};
use serde::Serialize;

use super::encode::EncodedMatrix;
use crate::dimension::Dimension;

/// Square correlation matrix with labelled rows and columns.
#[derive(Clone, Debug, Serialize)]
pub struct CorrelationMatrix<L> {
    /// Row and column labels.
    pub labels: Vec<L>,
    /// Square correlation values.
    #[serde(serialize_with = "serialize_matrix")]
    pub values: Array2<f64>,
}

pub(crate) fn serialize_matrix<S>(matrix: &Array2<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(matrix.nrows()))?;
    for row in matrix.rows() {
        seq.serialize_element(&row.to_vec())?;
    }
    seq.end()
}

impl<L: PartialEq + Copy> CorrelationMatrix<L> {
    /// Correlation between two labels.
    pub fn get(&self, a: L, b: L) -> Option<f64> {
        let i = self.labels.iter().position(|label| *label == a)?;
        let j = self.labels.iter().position(|label| *label == b)?;
        Some(self.values[[i, j]])
    }

    /// Off-diagonal pair with the largest correlation, ignoring `NaN`.
    pub fn strongest_pair(&self) -> Option<(L, L, f64)> {
        let n = self.labels.len();
        let mut best: Option<(L, L, f64)> = None;
        for i in 0..n {
            for j in (i + 1)..n {
                let r = self.values[[i, j]];
                if r.is_nan() {
                    continue;
                }
                if best.is_none_or(|(_, _, current)| r > current) {
                    best = Some((self.labels[i], self.labels[j], r));
                }
            }
        }
        best
    }

    /// Mean of all off-diagonal entries, ignoring `NaN`.
    pub fn mean_off_diagonal(&self) -> Option<f64> {
        let n = self.labels.len();
        let values: Vec<f64> = (0..n)
            .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
            .map(|(i, j)| self.values[[i, j]])
            .filter(|r| !r.is_nan())
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    }
}

/// Pearson correlation over rows where both values are present.
///
/// `NaN` with fewer than two shared rows or zero variance on either side.
pub fn pearson(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(a, b)| (*a, *b))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    sxy / (sxx * syy).sqrt()
}

/// Pairwise-deletion correlation matrix of the columns of `data`.
pub fn correlation_matrix(data: &Array2<f64>) -> Array2<f64> {
    let p = data.ncols();
    let mut out = Array2::<f64>::zeros((p, p));
    for i in 0..p {
        for j in i..p {
            let r = if i == j {
                let has_variance = !pearson(data.column(i), data.column(i)).is_nan();
                if has_variance { 1.0 } else { f64::NAN }
            } else {
                pearson(data.column(i), data.column(j))
            };
            out[[i, j]] = r;
            out[[j, i]] = r;
        }
    }
    out
}

/// Correlations among all encoded items.
pub fn item_correlations(matrix: &EncodedMatrix) -> CorrelationMatrix<&'static str> {
    CorrelationMatrix {
        labels: matrix.codes(),
        values: correlation_matrix(matrix.values()),
    }
}

/// Per-respondent dimension scores: the mean of available item codes.
///
/// Returns the dimensions that have at least one item column and a
/// respondents × dimensions matrix (`NaN` where no item was answered).
pub fn dimension_scores(matrix: &EncodedMatrix) -> (Vec<Dimension>, Array2<f64>) {
    let dimensions: Vec<Dimension> = Dimension::ALL
        .into_iter()
        .filter(|dimension| !matrix.dimension_codes(*dimension).is_empty())
        .collect();
    let mut scores = Array2::<f64>::from_elem((matrix.n_rows(), dimensions.len()), f64::NAN);
    for (col, dimension) in dimensions.iter().enumerate() {
        let columns: Vec<ArrayView1<'_, f64>> = matrix
            .dimension_codes(*dimension)
            .iter()
            .filter_map(|code| matrix.column(code))
            .collect();
        let score = Array1::from_iter((0..matrix.n_rows()).map(|row| {
            let present: Vec<f64> = columns
                .iter()
                .map(|column| column[row])
                .filter(|value| !value.is_nan())
                .collect();
            if present.is_empty() {
                f64::NAN
            } else {
                present.iter().sum::<f64>() / present.len() as f64
            }
        }));
        scores.column_mut(col).assign(&score);
    }
    (dimensions, scores)
}

/// Correlations between dimension scores; `None` with fewer than two dimensions.
pub fn dimension_correlations(matrix: &EncodedMatrix) -> Option<CorrelationMatrix<Dimension>> {
    let (dimensions, scores) = dimension_scores(matrix);
    if dimensions.len() < 2 {
        return None;
    }
    Some(CorrelationMatrix {
        labels: dimensions,
        values: correlation_matrix(&scores),
    })
}

/// Item and dimension-level correlation results.
#[derive(Clone, Debug, Serialize)]
pub struct ValidityReport {
    /// Item-level correlations.
    pub items: CorrelationMatrix<&'static str>,
    /// Dimension-score correlations; `None` with fewer than two dimensions.
    pub dimensions: Option<CorrelationMatrix<Dimension>>,
}

/// Compute item and dimension correlations.
pub fn validity_analysis(matrix: &EncodedMatrix) -> ValidityReport {
    ValidityReport {
        items: item_correlations(matrix),
        dimensions: dimension_correlations(matrix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn pearson_uses_pairwise_deletion() {
        let x = array![1.0, 2.0, f64::NAN, 4.0, 5.0];
        let y = array![2.0, 4.0, 100.0, 8.0, f64::NAN];
        let r = pearson(x.view(), y.view());
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_columns_correlate_as_nan() {
        let x = array![3.0, 3.0, 3.0];
        let y = array![1.0, 2.0, 3.0];
        assert!(pearson(x.view(), y.view()).is_nan());
    }

    #[test]
    fn strongest_pair_and_mean_skip_diagonal() {
        let m = CorrelationMatrix {
            labels: vec!["a", "b", "c"],
            values: array![[1.0, 0.2, 0.6], [0.2, 1.0, 0.1], [0.6, 0.1, 1.0]],
        };
        assert_eq!(m.strongest_pair(), Some(("a", "c", 0.6)));
        assert!((m.mean_off_diagonal().unwrap() - 0.3).abs() < 1e-12);
        assert_eq!(m.get("b", "c"), Some(0.1));
    }
}
