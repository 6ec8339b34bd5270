//! Hodrick-Prescott Filter Module
//! Separates a series into a smooth trend and a residual cycle by solving
//! the penalized least-squares problem
//! `min_tau sum((y - tau)^2) + lambda * sum((tau[t+1] - 2*tau[t] + tau[t-1])^2)`.
//!
//! The first-order condition reduces to the linear system
//! `(I + lambda * D'D) * tau = y`, where `D` is the (T-2)xT second-difference
//! operator. `I + lambda * D'D` is symmetric positive definite with bandwidth
//! 2, so the solve is a banded LDL^T factorization rather than a dense one.

use thiserror::Error;

/// Conventional smoothing weight for quarterly data.
pub const LAMBDA_QUARTERLY: f64 = 1600.0;
/// Conventional smoothing weight for monthly data.
pub const LAMBDA_MONTHLY: f64 = 129_600.0;
/// Conventional smoothing weight for annual data.
pub const LAMBDA_ANNUAL: f64 = 6.25;

/// Minimum series length for the second-difference operator to be defined.
const MIN_OBSERVATIONS: usize = 4;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("invalid lambda {0}: must be finite and non-negative")]
    InvalidLambda(f64),
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },
    #[error("log transform requires strictly positive values (found {0})")]
    NonPositiveValue(f64),
}

/// Trend/cycle decomposition of a single series.
///
/// Satisfies `observed[t] = trend[t] + cycle[t]` for every `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub observed: Vec<f64>,
    pub trend: Vec<f64>,
    pub cycle: Vec<f64>,
}

/// Hodrick-Prescott filter with a fixed smoothing weight.
///
/// Larger lambda yields a smoother (more rigid) trend; lambda = 0 reproduces
/// the input exactly.
#[derive(Debug, Clone)]
pub struct HpFilter {
    lambda: f64,
}

impl HpFilter {
    pub fn new(lambda: f64) -> Result<Self, FilterError> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(FilterError::InvalidLambda(lambda));
        }
        Ok(Self { lambda })
    }

    /// Filter configured for quarterly data (lambda = 1600).
    pub fn quarterly() -> Self {
        Self {
            lambda: LAMBDA_QUARTERLY,
        }
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Extract the trend component of `y`.
    pub fn trend(&self, y: &[f64]) -> Result<Vec<f64>, FilterError> {
        let n = y.len();
        if n < MIN_OBSERVATIONS {
            return Err(FilterError::InsufficientData {
                needed: MIN_OBSERVATIONS,
                got: n,
            });
        }

        // Accumulate the five bands of A = I + lambda * D'D from the
        // second-difference stencil [1, -2, 1] placed at each row of D.
        let mut diag = vec![1.0; n];
        let mut off1 = vec![0.0; n - 1];
        let mut off2 = vec![0.0; n - 2];

        const STENCIL: [f64; 3] = [1.0, -2.0, 1.0];
        for t in 0..n - 2 {
            for (a, &wa) in STENCIL.iter().enumerate() {
                diag[t + a] += self.lambda * wa * wa;
                if a + 1 < 3 {
                    off1[t + a] += self.lambda * wa * STENCIL[a + 1];
                }
            }
            off2[t] += self.lambda * STENCIL[0] * STENCIL[2];
        }

        Ok(solve_pentadiagonal(&diag, &off1, &off2, y))
    }

    /// Decompose `y` into trend and cycle, with `cycle = y - trend`.
    ///
    /// Applied independently per series; the filter never couples inputs.
    pub fn decompose(&self, y: &[f64]) -> Result<Decomposition, FilterError> {
        let trend = self.trend(y)?;
        let cycle: Vec<f64> = y.iter().zip(trend.iter()).map(|(&v, &t)| v - t).collect();
        Ok(Decomposition {
            observed: y.to_vec(),
            trend,
            cycle,
        })
    }

    /// Log-transform `raw` and decompose the result.
    ///
    /// Rejects non-positive inputs eagerly instead of letting `ln` produce
    /// NaN inside the solve.
    pub fn decompose_log(&self, raw: &[f64]) -> Result<Decomposition, FilterError> {
        if let Some(&bad) = raw.iter().find(|v| **v <= 0.0 || !v.is_finite()) {
            return Err(FilterError::NonPositiveValue(bad));
        }
        let logged: Vec<f64> = raw.iter().map(|v| v.ln()).collect();
        self.decompose(&logged)
    }
}

/// Solve `A x = y` for a symmetric positive definite pentadiagonal `A`
/// given by its main diagonal and first/second superdiagonals.
///
/// LDL^T factorization with bandwidth 2: O(n) time, O(n) space.
fn solve_pentadiagonal(diag: &[f64], off1: &[f64], off2: &[f64], y: &[f64]) -> Vec<f64> {
    let n = diag.len();
    debug_assert!(n >= 3);
    debug_assert_eq!(off1.len(), n - 1);
    debug_assert_eq!(off2.len(), n - 2);
    debug_assert_eq!(y.len(), n);

    // d: diagonal of D; l1, l2: first and second subdiagonals of unit L.
    let mut d = vec![0.0; n];
    let mut l1 = vec![0.0; n - 1];
    let mut l2 = vec![0.0; n - 2];

    d[0] = diag[0];
    l1[0] = off1[0] / d[0];
    l2[0] = off2[0] / d[0];

    d[1] = diag[1] - l1[0] * l1[0] * d[0];
    if n > 2 {
        l1[1] = (off1[1] - l2[0] * l1[0] * d[0]) / d[1];
    }
    if n > 3 {
        l2[1] = off2[1] / d[1];
    }

    for i in 2..n {
        d[i] = diag[i] - l1[i - 1] * l1[i - 1] * d[i - 1] - l2[i - 2] * l2[i - 2] * d[i - 2];
        if i < n - 1 {
            l1[i] = (off1[i] - l2[i - 1] * l1[i - 1] * d[i - 1]) / d[i];
        }
        if i < n - 2 {
            l2[i] = off2[i] / d[i];
        }
    }

    // Forward substitution: L z = y.
    let mut z = vec![0.0; n];
    z[0] = y[0];
    z[1] = y[1] - l1[0] * z[0];
    for i in 2..n {
        z[i] = y[i] - l1[i - 1] * z[i - 1] - l2[i - 2] * z[i - 2];
    }

    // Diagonal scaling, then back substitution: L^T x = D^{-1} z.
    let mut x = vec![0.0; n];
    x[n - 1] = z[n - 1] / d[n - 1];
    x[n - 2] = z[n - 2] / d[n - 2] - l1[n - 2] * x[n - 1];
    for i in (0..n - 2).rev() {
        x[i] = z[i] / d[i] - l1[i] * x[i + 1] - l2[i] * x[i + 2];
    }

    x
}
