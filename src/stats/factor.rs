//! Exploratory factor analysis and principal components for the encoded items.
//!
//! The sample gate (item count and complete-case respondents) is checked
//! first; below it nothing is computed and the caller receives a diagnostic.
//! Above it, sampling adequacy (KMO) and Bartlett's sphericity test are
//! always reported, factors are extracted only when both pass, and PCA runs
//! regardless of the adequacy result.

use ndarray::{Array1, Array2, Axis, s};
use serde::Serialize;
use tracing::{debug, info};

use super::correlation::{correlation_matrix, serialize_matrix};
use super::distribution::chi_square_sf;
use super::encode::EncodedMatrix;
use super::linalg::{inverse, symmetric_determinant, symmetric_eigen};
use crate::constants::validation::{
    BARTLETT_SIGNIFICANCE, FACTOR_MAX_ITERATIONS, FACTOR_TOLERANCE, KMO_THRESHOLD, MAX_FACTORS,
    MIN_FACTOR_ITEMS, MIN_FACTOR_RESPONDENTS, PCA_VARIANCE_TARGET, SALIENT_LOADING,
    VARIMAX_MAX_ITERATIONS, VARIMAX_TOLERANCE,
};
use crate::dimension::Dimension;
use crate::types::ItemCode;

/// Bartlett's test of sphericity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bartlett {
    /// Test statistic.
    pub chi_square: f64,
    /// Degrees of freedom.
    pub df: f64,
    /// Upper-tail probability.
    pub p_value: f64,
}

/// Sum of squared loadings of one rotated factor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FactorVariance {
    /// Sum of squared loadings.
    pub ss_loadings: f64,
    /// Share of total item variance.
    pub proportion: f64,
    /// Running share up to this factor.
    pub cumulative: f64,
}

/// Rotated factor solution.
#[derive(Clone, Debug, Serialize)]
pub struct FactorExtraction {
    /// Factors extracted.
    pub n_factors: usize,
    /// Items × factors, varimax rotated.
    #[serde(serialize_with = "serialize_matrix")]
    pub loadings: Array2<f64>,
    /// Final communality per item.
    pub communalities: Vec<f64>,
    /// Eigenvalues of the item correlation matrix.
    pub original_eigenvalues: Vec<f64>,
    /// Eigenvalues of the reduced matrix with communalities on the diagonal.
    pub common_eigenvalues: Vec<f64>,
    /// Variance explained per factor.
    pub variance: Vec<FactorVariance>,
    /// Regression-method scores, respondents × factors.
    #[serde(skip)]
    pub scores: Option<Array2<f64>>,
    /// Whether communality iteration converged.
    pub converged: bool,
}

/// Explained variance of the principal components.
#[derive(Clone, Debug, Serialize)]
pub struct Pca {
    /// Explained variance ratio per component.
    pub variance_ratio: Vec<f64>,
    /// Cumulative explained variance.
    pub cumulative: Vec<f64>,
    /// Components needed to reach the cumulative variance target.
    pub components_for_target: usize,
}

/// Everything computed once the sample gate passes.
#[derive(Clone, Debug, Serialize)]
pub struct FactorAnalysis {
    /// Item codes, in matrix order.
    pub codes: Vec<ItemCode>,
    /// Dimension of each item.
    pub dimensions: Vec<Dimension>,
    /// Complete-case respondents used.
    pub n_respondents: usize,
    /// Eigenvalues of the item correlation matrix, for the scree plot.
    pub eigenvalues: Vec<f64>,
    /// `None` when the correlation matrix is singular.
    pub kmo: Option<f64>,
    /// Bartlett's sphericity test.
    pub bartlett: Bartlett,
    /// `None` when the adequacy gate failed.
    pub extraction: Option<FactorExtraction>,
    /// Principal components; `None` when the covariance is degenerate.
    pub pca: Option<Pca>,
}

impl FactorAnalysis {
    /// True when KMO and Bartlett both allow factor extraction.
    pub fn is_factorable(&self) -> bool {
        passes_adequacy(self.kmo, &self.bartlett)
    }

    /// True when no rotated factor has salient loadings from two dimensions.
    pub fn aligns_with_dimensions(&self) -> Option<bool> {
        let extraction = self.extraction.as_ref()?;
        let aligned = extraction.loadings.axis_iter(Axis(1)).all(|factor| {
            let mut salient = factor
                .iter()
                .zip(&self.dimensions)
                .filter(|(loading, _)| **loading > SALIENT_LOADING)
                .map(|(_, dimension)| *dimension);
            match salient.next() {
                Some(first) => salient.all(|dimension| dimension == first),
                None => true,
            }
        });
        Some(aligned)
    }
}

/// Result of the factor-analysis stage.
#[derive(Clone, Debug, Serialize)]
pub enum FactorOutcome {
    /// The sample gate failed; the message explains why.
    Insufficient(String),
    /// The sample gate passed.
    Analyzed(Box<FactorAnalysis>),
}

impl FactorOutcome {
    /// The analysis, when the sample gate passed.
    pub fn analysis(&self) -> Option<&FactorAnalysis> {
        match self {
            FactorOutcome::Analyzed(analysis) => Some(analysis),
            FactorOutcome::Insufficient(_) => None,
        }
    }
}

fn passes_adequacy(kmo: Option<f64>, bartlett: &Bartlett) -> bool {
    kmo.is_some_and(|kmo| kmo >= KMO_THRESHOLD) && bartlett.p_value < BARTLETT_SIGNIFICANCE
}

/// Run the full factor stage over every encoded item.
pub fn factor_analysis(matrix: &EncodedMatrix) -> FactorOutcome {
    let codes = matrix.codes();
    if codes.len() < MIN_FACTOR_ITEMS {
        return FactorOutcome::Insufficient("Not enough items for factor analysis".to_string());
    }
    let data = matrix.complete_cases(&codes);
    if data.nrows() < MIN_FACTOR_RESPONDENTS {
        return FactorOutcome::Insufficient(
            "Not enough data points for factor analysis".to_string(),
        );
    }
    let r = correlation_matrix(&data);
    if r.iter().any(|value| value.is_nan()) {
        return FactorOutcome::Insufficient(
            "Some items have no variance among complete responses".to_string(),
        );
    }

    let n = data.nrows();
    let eigenvalues = symmetric_eigen(&r).values.to_vec();
    let kmo = kmo(&r);
    let bartlett = bartlett_sphericity(&r, n);
    debug!(
        "[sicas:stats] kmo={:?} chi2={:.3} p={:.4} over {} respondents",
        kmo, bartlett.chi_square, bartlett.p_value, n
    );

    let extraction = if passes_adequacy(kmo, &bartlett) {
        let n_factors = MAX_FACTORS.min(codes.len());
        Some(extract_factors(&data, &r, n_factors))
    } else {
        info!("[sicas:stats] data not factorable; skipping extraction");
        None
    };

    let dimensions = codes
        .iter()
        .filter_map(|code| matrix.dimension_of(code))
        .collect();
    FactorOutcome::Analyzed(Box::new(FactorAnalysis {
        codes,
        dimensions,
        n_respondents: n,
        eigenvalues,
        kmo,
        bartlett,
        extraction,
        pca: pca(&data),
    }))
}

/// Overall Kaiser-Meyer-Olkin measure from anti-image correlations.
pub fn kmo(r: &Array2<f64>) -> Option<f64> {
    let inv = inverse(r)?;
    let p = r.nrows();
    let (mut r2, mut a2) = (0.0, 0.0);
    for i in 0..p {
        for j in 0..p {
            if i == j {
                continue;
            }
            let partial = -inv[[i, j]] / (inv[[i, i]] * inv[[j, j]]).sqrt();
            r2 += r[[i, j]].powi(2);
            a2 += partial.powi(2);
        }
    }
    if r2 + a2 == 0.0 {
        return None;
    }
    Some(r2 / (r2 + a2))
}

/// Bartlett's sphericity test of correlation matrix `r` over `n` respondents.
pub fn bartlett_sphericity(r: &Array2<f64>, n: usize) -> Bartlett {
    let p = r.nrows() as f64;
    let det = symmetric_determinant(r);
    let chi_square = if det > 0.0 {
        -((n as f64 - 1.0) - (2.0 * p + 5.0) / 6.0) * det.ln()
    } else {
        f64::INFINITY
    };
    let df = p * (p - 1.0) / 2.0;
    Bartlett {
        chi_square,
        df,
        p_value: chi_square_sf(chi_square, df),
    }
}

fn squared_multiple_correlations(r: &Array2<f64>) -> Array1<f64> {
    match inverse(r) {
        Some(inv) => inv.diag().mapv(|d| (1.0 - 1.0 / d).clamp(0.0, 1.0)),
        None => {
            let p = r.nrows();
            Array1::from_iter((0..p).map(|i| {
                (0..p)
                    .filter(|&j| j != i)
                    .map(|j| r[[i, j]].abs())
                    .fold(0.0, f64::max)
            }))
        }
    }
}

fn loadings_from_reduced(reduced: &Array2<f64>, n_factors: usize) -> Array2<f64> {
    let eig = symmetric_eigen(reduced);
    let mut loadings = eig.vectors.slice(s![.., ..n_factors]).to_owned();
    for (mut column, value) in loadings.axis_iter_mut(Axis(1)).zip(eig.values.iter()) {
        column.mapv_inplace(|v| v * value.max(0.0).sqrt());
    }
    loadings
}

fn with_diagonal(r: &Array2<f64>, diagonal: &Array1<f64>) -> Array2<f64> {
    let mut reduced = r.clone();
    reduced.diag_mut().assign(diagonal);
    reduced
}

/// Iterated principal-axis factoring followed by varimax rotation.
fn extract_factors(data: &Array2<f64>, r: &Array2<f64>, n_factors: usize) -> FactorExtraction {
    let mut communalities = squared_multiple_correlations(r);
    let mut loadings = loadings_from_reduced(&with_diagonal(r, &communalities), n_factors);
    let mut converged = false;
    for _ in 0..FACTOR_MAX_ITERATIONS {
        let next = loadings
            .map_axis(Axis(1), |row| row.mapv(|v| v * v).sum())
            .mapv(|h| h.min(1.0));
        let delta = (&next - &communalities)
            .iter()
            .fold(0.0_f64, |acc, d| acc.max(d.abs()));
        communalities = next;
        loadings = loadings_from_reduced(&with_diagonal(r, &communalities), n_factors);
        if delta < FACTOR_TOLERANCE {
            converged = true;
            break;
        }
    }

    let rotated = varimax(&loadings);
    let communalities = rotated.map_axis(Axis(1), |row| row.mapv(|v| v * v).sum());
    let common_eigenvalues = symmetric_eigen(&with_diagonal(r, &communalities))
        .values
        .to_vec();
    let p = r.nrows() as f64;
    let mut cumulative = 0.0;
    let variance = rotated
        .axis_iter(Axis(1))
        .map(|factor| {
            let ss_loadings = factor.mapv(|v| v * v).sum();
            let proportion = ss_loadings / p;
            cumulative += proportion;
            FactorVariance {
                ss_loadings,
                proportion,
                cumulative,
            }
        })
        .collect();

    FactorExtraction {
        n_factors,
        scores: regression_scores(data, r, &rotated),
        loadings: rotated,
        communalities: communalities.to_vec(),
        original_eigenvalues: symmetric_eigen(r).values.to_vec(),
        common_eigenvalues,
        variance,
        converged,
    }
}

/// Varimax rotation with Kaiser normalization, by pairwise planar rotations.
pub fn varimax(loadings: &Array2<f64>) -> Array2<f64> {
    let (p, k) = loadings.dim();
    if k < 2 || p == 0 {
        return loadings.clone();
    }
    let norms = loadings.map_axis(Axis(1), |row| row.mapv(|v| v * v).sum().sqrt());
    let mut x = loadings.clone();
    for (mut row, norm) in x.axis_iter_mut(Axis(0)).zip(norms.iter()) {
        if *norm > 0.0 {
            row.mapv_inplace(|v| v / norm);
        }
    }

    let n = p as f64;
    for _ in 0..VARIMAX_MAX_ITERATIONS {
        let mut largest_angle = 0.0_f64;
        for a in 0..k {
            for b in (a + 1)..k {
                let (mut sum_u, mut sum_v, mut sum_c, mut sum_d) = (0.0, 0.0, 0.0, 0.0);
                for i in 0..p {
                    let (xa, xb) = (x[[i, a]], x[[i, b]]);
                    let u = xa * xa - xb * xb;
                    let v = 2.0 * xa * xb;
                    sum_u += u;
                    sum_v += v;
                    sum_c += u * u - v * v;
                    sum_d += 2.0 * u * v;
                }
                let numerator = sum_d - 2.0 * sum_u * sum_v / n;
                let denominator = sum_c - (sum_u * sum_u - sum_v * sum_v) / n;
                let phi = numerator.atan2(denominator) / 4.0;
                largest_angle = largest_angle.max(phi.abs());
                let (sin, cos) = phi.sin_cos();
                for i in 0..p {
                    let (xa, xb) = (x[[i, a]], x[[i, b]]);
                    x[[i, a]] = cos * xa + sin * xb;
                    x[[i, b]] = -sin * xa + cos * xb;
                }
            }
        }
        if largest_angle < VARIMAX_TOLERANCE {
            break;
        }
    }

    for (mut row, norm) in x.axis_iter_mut(Axis(0)).zip(norms.iter()) {
        row.mapv_inplace(|v| v * norm);
    }
    x
}

fn standardize(data: &Array2<f64>) -> Array2<f64> {
    let mut z = data.clone();
    for mut column in z.axis_iter_mut(Axis(1)) {
        let n = column.len() as f64;
        let mean = column.sum() / n;
        let sd = (column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
        column.mapv_inplace(|v| if sd > 0.0 { (v - mean) / sd } else { 0.0 });
    }
    z
}

fn regression_scores(
    data: &Array2<f64>,
    r: &Array2<f64>,
    loadings: &Array2<f64>,
) -> Option<Array2<f64>> {
    let weights = inverse(r)?.dot(loadings);
    Some(standardize(data).dot(&weights))
}

/// Principal components of the covariance matrix of complete cases.
pub fn pca(data: &Array2<f64>) -> Option<Pca> {
    let (n, p) = data.dim();
    if n < 2 || p == 0 {
        return None;
    }
    let means = data.mean_axis(Axis(0))?;
    let centered = data - &means;
    let covariance = centered.t().dot(&centered) / (n as f64 - 1.0);
    let eigenvalues: Vec<f64> = symmetric_eigen(&covariance)
        .values
        .iter()
        .map(|value| value.max(0.0))
        .collect();
    let total: f64 = eigenvalues.iter().sum();
    if total <= 0.0 {
        return None;
    }
    let variance_ratio: Vec<f64> = eigenvalues.iter().map(|value| value / total).collect();
    let cumulative: Vec<f64> = variance_ratio
        .iter()
        .scan(0.0, |acc, ratio| {
            *acc += ratio;
            Some(*acc)
        })
        .collect();
    let components_for_target = cumulative
        .iter()
        .position(|value| *value >= PCA_VARIANCE_TARGET - 1e-12)
        .map_or(cumulative.len(), |idx| idx + 1);
    Some(Pca {
        variance_ratio,
        cumulative,
        components_for_target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::columns;
    use crate::source::SurveyTable;
    use crate::stats::encode::encode_dimensions;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const AWARE: [&str; 4] = ["完全不了解", "不太了解", "略有了解", "非常了解"];
    const ATTRACT: [&str; 5] = ["完全不吸引", "不太吸引", "一般", "比较吸引", "非常吸引"];
    const SATISFY: [&str; 5] = ["非常不满意", "不太满意", "一般", "比较满意", "非常满意"];

    fn survey(rows: usize, seed: u64) -> SurveyTable {
        let mut rng = StdRng::seed_from_u64(seed);
        let data = (0..rows)
            .map(|_| {
                let latent: usize = rng.random_range(0..4);
                let jitter = |rng: &mut StdRng, len: usize| {
                    (latent + rng.random_range(0..2)).min(len - 1)
                };
                vec![
                    AWARE[jitter(&mut rng, 4)],
                    ATTRACT[jitter(&mut rng, 5)],
                    SATISFY[jitter(&mut rng, 5)],
                ]
            })
            .collect();
        SurveyTable::new(
            vec![
                columns::AWARENESS.to_string(),
                columns::ATTRACTION.to_string(),
                columns::SATISFACTION.to_string(),
            ],
            data,
        )
    }

    #[test]
    fn small_samples_get_a_placeholder() {
        let outcome = factor_analysis(&encode_dimensions(&survey(9, 1)));
        match outcome {
            FactorOutcome::Insufficient(reason) => assert!(reason.contains("data points")),
            FactorOutcome::Analyzed(_) => panic!("expected insufficient sample"),
        }
    }

    #[test]
    fn too_few_items_get_a_placeholder() {
        let table = SurveyTable::new(
            vec![columns::AWARENESS.to_string()],
            (0..20).map(|i| vec![AWARE[i % 4]]).collect(),
        );
        assert!(factor_analysis(&encode_dimensions(&table)).analysis().is_none());
    }

    #[test]
    fn correlated_items_are_factorable() {
        let outcome = factor_analysis(&encode_dimensions(&survey(200, 3)));
        let analysis = outcome.analysis().unwrap();
        assert_eq!(analysis.codes, vec!["S1", "I1", "S2"]);
        assert!(analysis.kmo.unwrap() > 0.5);
        assert!(analysis.bartlett.p_value < 0.05);
        assert!(analysis.is_factorable());
        let extraction = analysis.extraction.as_ref().unwrap();
        assert_eq!(extraction.n_factors, 3);
        assert_eq!(extraction.loadings.dim(), (3, 3));
        assert_eq!(extraction.communalities.len(), 3);
        assert!(extraction.communalities.iter().all(|h| h.is_finite() && *h > 0.0));
        assert_eq!(extraction.scores.as_ref().unwrap().nrows(), 200);
        let pca = analysis.pca.as_ref().unwrap();
        let total: f64 = pca.variance_ratio.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(pca.components_for_target <= 3);
    }

    #[test]
    fn kmo_of_equicorrelated_matrix() {
        // For an equicorrelation matrix the closed form is known.
        let rho: f64 = 0.5;
        let r = array![[1.0, rho, rho], [rho, 1.0, rho], [rho, rho, 1.0]];
        // partial correlation for p=3: rho / (1 + rho)
        let partial = rho / (1.0 + rho);
        let expected = (6.0 * rho * rho) / (6.0 * rho * rho + 6.0 * partial * partial);
        assert!((kmo(&r).unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn bartlett_on_identity_is_not_significant() {
        let r = Array2::<f64>::eye(4);
        let test = bartlett_sphericity(&r, 100);
        assert!(test.chi_square.abs() < 1e-9);
        assert_eq!(test.df, 6.0);
        assert!((test.p_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn varimax_preserves_communalities() {
        let loadings = array![[0.8, 0.3], [0.7, 0.4], [0.2, 0.9], [0.3, 0.6], [0.5, 0.5]];
        let rotated = varimax(&loadings);
        for (before, after) in loadings.rows().into_iter().zip(rotated.rows()) {
            let h_before: f64 = before.iter().map(|v| v * v).sum();
            let h_after: f64 = after.iter().map(|v| v * v).sum();
            assert!((h_before - h_after).abs() < 1e-9);
        }
    }

    #[test]
    fn pca_ratios_sum_to_one() {
        let data = array![[1.0, 2.0, 0.5], [2.0, 1.0, 1.5], [3.0, 4.0, 2.0], [4.0, 3.0, 3.5]];
        let result = pca(&data).unwrap();
        assert!((result.variance_ratio.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!((result.cumulative.last().unwrap() - 1.0).abs() < 1e-9);
        assert!(result.variance_ratio.windows(2).all(|w| w[0] >= w[1]));
    }
}
