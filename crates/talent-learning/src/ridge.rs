//! Ridge regression on three standardized features.
//!
//! Features are standardized (zero-variance columns keep std 1, so they
//! contribute nothing), the target is centred, and
//! `(ZᵀZ + αI) β = Zᵀy` is solved by Gaussian elimination with partial
//! pivoting. Coefficients are reported in standardized units, which makes
//! them comparable as importances.

use talent_core::errors::LearningError;

const DIM: usize = 3;
const PIVOT_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RidgeFit {
    pub coefficients: [f64; DIM],
    pub intercept: f64,
    /// Coefficient of determination on the training data. May be negative.
    pub r2: f64,
}

pub fn fit(features: &[[f64; DIM]], targets: &[f64], alpha: f64) -> Result<RidgeFit, LearningError> {
    let n = features.len();
    if n == 0 || n != targets.len() {
        return Err(LearningError::OptimizerFailure {
            reason: format!("{n} feature rows for {} targets", targets.len()),
        });
    }
    if !(alpha.is_finite() && alpha > 0.0) {
        return Err(LearningError::OptimizerFailure {
            reason: format!("ridge alpha must be positive, got {alpha}"),
        });
    }
    let nf = n as f64;

    let mut mean = [0.0; DIM];
    for row in features {
        for j in 0..DIM {
            mean[j] += row[j] / nf;
        }
    }
    let mut std = [0.0; DIM];
    for row in features {
        for j in 0..DIM {
            std[j] += (row[j] - mean[j]).powi(2) / nf;
        }
    }
    for s in &mut std {
        *s = s.sqrt();
        if *s < PIVOT_EPSILON {
            *s = 1.0;
        }
    }
    let y_mean = targets.iter().sum::<f64>() / nf;

    let z: Vec<[f64; DIM]> = features
        .iter()
        .map(|row| {
            let mut out = [0.0; DIM];
            for j in 0..DIM {
                out[j] = (row[j] - mean[j]) / std[j];
            }
            out
        })
        .collect();

    let mut a = [[0.0; DIM]; DIM];
    let mut b = [0.0; DIM];
    for (row, y) in z.iter().zip(targets) {
        let yc = y - y_mean;
        for i in 0..DIM {
            b[i] += row[i] * yc;
            for j in 0..DIM {
                a[i][j] += row[i] * row[j];
            }
        }
    }
    for (i, row) in a.iter_mut().enumerate() {
        row[i] += alpha;
    }

    let beta = solve(a, b)?;
    if beta.iter().any(|v| !v.is_finite()) {
        return Err(LearningError::OptimizerFailure {
            reason: "non-finite solution".to_string(),
        });
    }

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (row, y) in z.iter().zip(targets) {
        let pred = y_mean + (0..DIM).map(|j| beta[j] * row[j]).sum::<f64>();
        ss_res += (y - pred).powi(2);
        ss_tot += (y - y_mean).powi(2);
    }
    let r2 = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };

    Ok(RidgeFit {
        coefficients: beta,
        intercept: y_mean,
        r2,
    })
}

/// Solve `a x = b` in place.
fn solve(mut a: [[f64; DIM]; DIM], mut b: [f64; DIM]) -> Result<[f64; DIM], LearningError> {
    for col in 0..DIM {
        let pivot = (col..DIM)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < PIVOT_EPSILON {
            return Err(LearningError::OptimizerFailure {
                reason: "singular normal matrix".to_string(),
            });
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in col + 1..DIM {
            let factor = a[row][col] / a[col][col];
            for k in col..DIM {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }
    let mut x = [0.0; DIM];
    for row in (0..DIM).rev() {
        let tail: f64 = (row + 1..DIM).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}
