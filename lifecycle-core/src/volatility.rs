//! Volatility scoring.
//!
//! The coefficient of variation (population std / mean) is the raw volatility
//! measure; the score clamps pathological series so a single erratic SKU
//! cannot dominate downstream weighting.

use serde::Serialize;

use crate::stats;
use crate::thresholds::VOLATILITY_CAP;

/// Volatility summary for one series.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct VolatilityProfile {
    pub mean: f64,
    pub std_dev: f64,
    /// std / mean; 0.0 when the mean is 0.
    pub coefficient_of_variation: f64,
    /// min(CV, cap) / cap, in [0, 1].
    pub volatility_score: f64,
}

/// Compute the volatility profile of a series.
pub fn volatility_profile(values: &[f64]) -> VolatilityProfile {
    let mean = stats::mean(values);
    let std_dev = stats::std_dev(values);
    let coefficient_of_variation = if mean == 0.0 { 0.0 } else { std_dev / mean };
    let volatility_score = coefficient_of_variation.min(VOLATILITY_CAP) / VOLATILITY_CAP;

    VolatilityProfile {
        mean,
        std_dev,
        coefficient_of_variation,
        volatility_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_series_has_zero_volatility() {
        let profile = volatility_profile(&[100.0; 40]);
        assert_eq!(profile.coefficient_of_variation, 0.0);
        assert_eq!(profile.volatility_score, 0.0);
        assert_eq!(profile.mean, 100.0);
    }

    #[test]
    fn zero_mean_series_does_not_divide_by_zero() {
        let profile = volatility_profile(&[0.0; 10]);
        assert_eq!(profile.coefficient_of_variation, 0.0);
        assert_eq!(profile.volatility_score, 0.0);
    }

    #[test]
    fn known_cv_is_computed() {
        // mean 5, population std 2 -> CV 0.4, score 0.2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let profile = volatility_profile(&values);
        assert!((profile.coefficient_of_variation - 0.4).abs() < 1e-12);
        assert!((profile.volatility_score - 0.2).abs() < 1e-12);
    }

    #[test]
    fn pathological_series_saturates_at_one() {
        // Huge spread around a tiny mean pushes CV far past the cap.
        let values = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1000.0];
        let profile = volatility_profile(&values);
        assert!(profile.coefficient_of_variation > VOLATILITY_CAP);
        assert_eq!(profile.volatility_score, 1.0);
    }
}
