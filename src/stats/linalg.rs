//! Dense symmetric linear algebra over `ndarray`.
//!
//! Matrices here are at most a handful of survey items wide, so plain Jacobi
//! rotations and Gauss-Jordan elimination are accurate and fast enough.

use ndarray::{Array1, Array2};

use crate::constants::validation::JACOBI_MAX_SWEEPS;

/// Eigen decomposition of a symmetric matrix.
#[derive(Clone, Debug)]
pub struct SymmetricEigen {
    /// Eigenvalues in descending order.
    pub values: Array1<f64>,
    /// Unit eigenvectors as columns, matching `values`.
    pub vectors: Array2<f64>,
}

/// Eigen-decompose a symmetric matrix with cyclic Jacobi rotations.
pub fn symmetric_eigen(matrix: &Array2<f64>) -> SymmetricEigen {
    let n = matrix.nrows();
    let mut a = matrix.clone();
    let mut v = Array2::<f64>::eye(n);

    for _ in 0..JACOBI_MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
            .map(|(i, j)| a[[i, j]] * a[[i, j]])
            .sum();
        if off < 1e-22 {
            break;
        }
        for p in 0..n {
            for q in (p + 1)..n {
                if a[[p, q]].abs() < 1e-300 {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * a[[p, q]]);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;
                rotate(&mut a, &mut v, p, q, c, s);
            }
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| a[[j, j]].total_cmp(&a[[i, i]]));
    let values = Array1::from_iter(order.iter().map(|&i| a[[i, i]]));
    let mut vectors = Array2::<f64>::zeros((n, n));
    for (col, &src) in order.iter().enumerate() {
        vectors.column_mut(col).assign(&v.column(src));
    }
    SymmetricEigen { values, vectors }
}

fn rotate(a: &mut Array2<f64>, v: &mut Array2<f64>, p: usize, q: usize, c: f64, s: f64) {
    let n = a.nrows();
    for k in 0..n {
        let akp = a[[k, p]];
        let akq = a[[k, q]];
        a[[k, p]] = c * akp - s * akq;
        a[[k, q]] = s * akp + c * akq;
    }
    for k in 0..n {
        let apk = a[[p, k]];
        let aqk = a[[q, k]];
        a[[p, k]] = c * apk - s * aqk;
        a[[q, k]] = s * apk + c * aqk;
    }
    for k in 0..n {
        let vkp = v[[k, p]];
        let vkq = v[[k, q]];
        v[[k, p]] = c * vkp - s * vkq;
        v[[k, q]] = s * vkp + c * vkq;
    }
}

/// Inverse by Gauss-Jordan elimination with partial pivoting.
///
/// `None` when the matrix is singular to working precision.
pub fn inverse(matrix: &Array2<f64>) -> Option<Array2<f64>> {
    let n = matrix.nrows();
    let mut a = matrix.clone();
    let mut inv = Array2::<f64>::eye(n);
    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))?;
        if a[[pivot, col]].abs() < 1e-12 {
            return None;
        }
        if pivot != col {
            swap_rows(&mut a, pivot, col);
            swap_rows(&mut inv, pivot, col);
        }
        let d = a[[col, col]];
        for k in 0..n {
            a[[col, k]] /= d;
            inv[[col, k]] /= d;
        }
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for k in 0..n {
                a[[row, k]] -= factor * a[[col, k]];
                inv[[row, k]] -= factor * inv[[col, k]];
            }
        }
    }
    Some(inv)
}

fn swap_rows(m: &mut Array2<f64>, a: usize, b: usize) {
    for k in 0..m.ncols() {
        m.swap([a, k], [b, k]);
    }
}

/// Determinant of a symmetric matrix as the product of its eigenvalues.
pub fn symmetric_determinant(matrix: &Array2<f64>) -> f64 {
    symmetric_eigen(matrix).values.iter().product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn eigen_of_diagonal_is_sorted_descending() {
        let m = array![[1.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 2.0]];
        let eig = symmetric_eigen(&m);
        assert_eq!(eig.values.to_vec(), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn eigen_reconstructs_matrix() {
        let m = array![[2.0, 1.0, 0.5], [1.0, 3.0, 0.2], [0.5, 0.2, 1.5]];
        let eig = symmetric_eigen(&m);
        let lambda = Array2::from_diag(&eig.values);
        let rebuilt = eig.vectors.dot(&lambda).dot(&eig.vectors.t());
        for (a, b) in rebuilt.iter().zip(m.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let m = array![[4.0, 7.0], [2.0, 6.0]];
        let inv = inverse(&m).unwrap();
        let id = m.dot(&inv);
        assert!((id[[0, 0]] - 1.0).abs() < 1e-12);
        assert!(id[[0, 1]].abs() < 1e-12);
        assert!((id[[1, 1]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let m = array![[1.0, 2.0], [2.0, 4.0]];
        assert!(inverse(&m).is_none());
    }

    #[test]
    fn determinant_matches_closed_form() {
        let m = array![[2.0, 1.0], [1.0, 2.0]];
        assert!((symmetric_determinant(&m) - 3.0).abs() < 1e-12);
    }
}
