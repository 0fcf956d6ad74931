//! Rolling-window stability index.
//!
//! Combines three signals over a sliding window: how low the rolling
//! coefficient of variation runs, how consistent that CV stays from window
//! to window, and how consistently the short-term trend keeps its direction.
//! The product is clamped to [0, 1]; higher means more predictable demand.

use serde::Serialize;

use crate::stats;
use crate::thresholds::VOLATILITY_CAP;
use crate::trend::fit_trend;

/// Stability summary for one series.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct StabilityAnalysis {
    /// Composite index in [0, 1]; 0.0 when there is not enough data.
    pub index: f64,
    pub mean_rolling_cv: f64,
    /// 1 / (1 + std of rolling CVs): how steady the volatility itself is.
    pub cv_consistency: f64,
    /// 1 minus the fraction of sign flips between consecutive rolling slopes.
    pub trend_consistency: f64,
    /// False when the series is shorter than two full windows.
    pub sufficient_data: bool,
}

impl StabilityAnalysis {
    fn insufficient() -> Self {
        Self {
            index: 0.0,
            mean_rolling_cv: 0.0,
            cv_consistency: 0.0,
            trend_consistency: 0.0,
            sufficient_data: false,
        }
    }
}

/// Compute the stability index with the given rolling window width.
///
/// Requires at least `2 * window` points; anything shorter reports
/// insufficient data with a zero index.
pub fn stability_index(values: &[f64], window: usize) -> StabilityAnalysis {
    let n = values.len();
    if window < 2 || n < 2 * window {
        return StabilityAnalysis::insufficient();
    }

    let mut rolling_cvs = Vec::with_capacity(n - window + 1);
    let mut rolling_slopes = Vec::with_capacity(n - window + 1);
    for start in 0..=(n - window) {
        let chunk = &values[start..start + window];
        let mean = stats::mean(chunk);
        let cv = if mean == 0.0 {
            0.0
        } else {
            stats::std_dev(chunk) / mean
        };
        rolling_cvs.push(cv);
        rolling_slopes.push(fit_trend(chunk).slope);
    }

    let mean_rolling_cv = stats::mean(&rolling_cvs);
    let normalized_cv = mean_rolling_cv.min(VOLATILITY_CAP) / VOLATILITY_CAP;

    let cv_consistency = 1.0 / (1.0 + stats::std_dev(&rolling_cvs));

    let sign_changes = rolling_slopes
        .windows(2)
        .filter(|pair| pair[0].signum() != pair[1].signum())
        .count();
    let trend_consistency = 1.0 - sign_changes as f64 / (rolling_slopes.len() - 1) as f64;

    let index = ((1.0 - normalized_cv) * cv_consistency * trend_consistency).clamp(0.0, 1.0);

    StabilityAnalysis {
        index,
        mean_rolling_cv,
        cv_consistency,
        trend_consistency,
        sufficient_data: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_series_is_maximally_stable() {
        let analysis = stability_index(&[100.0; 40], 7);
        assert!(analysis.sufficient_data);
        assert!((analysis.index - 1.0).abs() < 1e-9);
        assert_eq!(analysis.mean_rolling_cv, 0.0);
        assert!((analysis.trend_consistency - 1.0).abs() < 1e-12);
    }

    #[test]
    fn smooth_ramp_keeps_trend_consistency() {
        let values: Vec<f64> = (0..40).map(|i| 50.0 + 2.0 * i as f64).collect();
        let analysis = stability_index(&values, 7);
        assert!(analysis.sufficient_data);
        // Every rolling slope is the same positive number: no sign flips.
        assert!((analysis.trend_consistency - 1.0).abs() < 1e-12);
        assert!(analysis.index > 0.5);
    }

    #[test]
    fn sawtooth_series_scores_low() {
        let values: Vec<f64> = (0..40)
            .map(|i| if i % 2 == 0 { 10.0 } else { 190.0 })
            .collect();
        let analysis = stability_index(&values, 7);
        assert!(analysis.sufficient_data);
        assert!(analysis.index < 0.4, "index was {}", analysis.index);
    }

    #[test]
    fn short_series_reports_insufficient_data() {
        let analysis = stability_index(&[1.0; 13], 7);
        assert!(!analysis.sufficient_data);
        assert_eq!(analysis.index, 0.0);
    }

    #[test]
    fn index_stays_in_unit_interval() {
        let values: Vec<f64> = (0..60)
            .map(|i| (i as f64 * 0.7).sin().abs() * 300.0 + 10.0)
            .collect();
        let analysis = stability_index(&values, 7);
        assert!(analysis.index >= 0.0 && analysis.index <= 1.0);
    }
}
