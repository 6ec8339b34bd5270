//! Statistics Calculator Module
//! Scalar and rolling statistics over cycle series: volatility, Pearson
//! correlation, lag-1 autocorrelation and rolling-window correlation.

use statrs::statistics::Statistics;
use thiserror::Error;

/// Variance below this threshold is treated as zero for correlation purposes.
const VARIANCE_EPS: f64 = 1e-12;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },
    #[error("window {window} exceeds series length {len}")]
    WindowTooLarge { window: usize, len: usize },
    #[error("window must span at least 2 observations, got {0}")]
    WindowTooSmall(usize),
    #[error("zero variance in correlation input")]
    ZeroVariance,
}

/// Statistical computations over cycle series.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Cycle volatility: sample standard deviation scaled by 100.
    ///
    /// For log-deviation cycles this reads as percent deviation from trend.
    /// A constant series has volatility 0.
    pub fn volatility(values: &[f64]) -> Result<f64, StatsError> {
        if values.len() < 2 {
            return Err(StatsError::InsufficientData {
                needed: 2,
                got: values.len(),
            });
        }
        Ok(values.std_dev() * 100.0)
    }

    /// Pearson correlation over all paired points.
    ///
    /// Zero variance on either side is an explicit error, never a silent NaN.
    pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64, StatsError> {
        if x.len() != y.len() {
            return Err(StatsError::LengthMismatch {
                left: x.len(),
                right: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(StatsError::InsufficientData {
                needed: 2,
                got: x.len(),
            });
        }

        let n = x.len() as f64;
        let mean_x = x.mean();
        let mean_y = y.mean();

        let mut cov = 0.0;
        let mut var_x = 0.0;
        let mut var_y = 0.0;
        for (xi, yi) in x.iter().zip(y.iter()) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            cov += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }

        if var_x / n < VARIANCE_EPS || var_y / n < VARIANCE_EPS {
            return Err(StatsError::ZeroVariance);
        }

        Ok(cov / (var_x * var_y).sqrt())
    }

    /// Correlation between the series and itself shifted by one period.
    pub fn lag1_autocorrelation(values: &[f64]) -> Result<f64, StatsError> {
        if values.len() < 2 {
            return Err(StatsError::InsufficientData {
                needed: 2,
                got: values.len(),
            });
        }
        Self::pearson(&values[1..], &values[..values.len() - 1])
    }

    /// Pearson correlation over a sliding window of size `window`.
    ///
    /// Produces `T - window + 1` values. Element `i` covers rows
    /// `[i, i + window - 1]`; callers plotting against the source series
    /// must offset by `window - 1` (window-end alignment).
    pub fn rolling_correlation(
        c1: &[f64],
        c2: &[f64],
        window: usize,
    ) -> Result<Vec<f64>, StatsError> {
        if c1.len() != c2.len() {
            return Err(StatsError::LengthMismatch {
                left: c1.len(),
                right: c2.len(),
            });
        }
        if window < 2 {
            return Err(StatsError::WindowTooSmall(window));
        }
        if window > c1.len() {
            return Err(StatsError::WindowTooLarge {
                window,
                len: c1.len(),
            });
        }

        (0..=c1.len() - window)
            .map(|i| Self::pearson(&c1[i..i + window], &c2[i..i + window]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(n: usize, scale: f64, phase: f64) -> Vec<f64> {
        (0..n)
            .map(|i| scale * (i as f64 * 0.4 + phase).sin())
            .collect()
    }

    #[test]
    fn volatility_scales_std_dev_by_100() {
        let values = [0.01, -0.01, 0.02, -0.02];
        let expected = values.as_slice().std_dev() * 100.0;
        assert!((StatsCalculator::volatility(&values).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn volatility_of_constant_series_is_zero() {
        let v = StatsCalculator::volatility(&[3.5; 10]).unwrap();
        assert_eq!(v, 0.0);
    }

    #[test]
    fn self_correlation_is_one() {
        let c = wave(30, 1.0, 0.0);
        let r = StatsCalculator::pearson(&c, &c).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn negated_series_correlates_at_minus_one() {
        let c = wave(30, 1.0, 0.0);
        let neg: Vec<f64> = c.iter().map(|v| -v).collect();
        let r = StatsCalculator::pearson(&c, &neg).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_series_yields_zero_variance_error() {
        let c = wave(10, 1.0, 0.0);
        let flat = [2.0; 10];
        assert_eq!(
            StatsCalculator::pearson(&c, &flat),
            Err(StatsError::ZeroVariance)
        );
        assert_eq!(
            StatsCalculator::lag1_autocorrelation(&flat),
            Err(StatsError::ZeroVariance)
        );
    }

    #[test]
    fn length_mismatch_is_rejected() {
        assert_eq!(
            StatsCalculator::pearson(&[1.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(StatsError::LengthMismatch { left: 2, right: 3 })
        );
    }

    #[test]
    fn lag1_autocorrelation_is_bounded() {
        let c = wave(40, 0.05, 0.3);
        let r = StatsCalculator::lag1_autocorrelation(&c).unwrap();
        assert!((-1.0..=1.0).contains(&r));
        // A slowly varying sine is strongly positively autocorrelated.
        assert!(r > 0.5);
    }

    #[test]
    fn rolling_correlation_length_is_t_minus_w_plus_1() {
        let c1 = wave(123, 1.0, 0.0);
        let c2 = wave(123, 1.0, 0.7);

        let r5 = StatsCalculator::rolling_correlation(&c1, &c2, 5).unwrap();
        assert_eq!(r5.len(), 119);

        let r20 = StatsCalculator::rolling_correlation(&c1, &c2, 20).unwrap();
        assert_eq!(r20.len(), 104);
    }

    #[test]
    fn rolling_correlation_window_bounds() {
        let c = wave(10, 1.0, 0.0);
        assert_eq!(
            StatsCalculator::rolling_correlation(&c, &c, 11),
            Err(StatsError::WindowTooLarge {
                window: 11,
                len: 10
            })
        );
        assert_eq!(
            StatsCalculator::rolling_correlation(&c, &c, 1),
            Err(StatsError::WindowTooSmall(1))
        );
        // w == T is the degenerate single-window case and is allowed.
        let full = StatsCalculator::rolling_correlation(&c, &c, 10).unwrap();
        assert_eq!(full.len(), 1);
        assert!((full[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rolling_correlation_flags_zero_variance_windows() {
        let mut c1 = wave(20, 1.0, 0.0);
        let c2 = wave(20, 1.0, 0.5);
        for v in c1.iter_mut().take(6) {
            *v = 1.0;
        }
        assert_eq!(
            StatsCalculator::rolling_correlation(&c1, &c2, 5),
            Err(StatsError::ZeroVariance)
        );
    }
}
