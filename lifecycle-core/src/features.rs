//! Feature extraction.
//!
//! `extract` runs every primitive once over a series and fills a fixed-shape
//! vector of 13 named scalars. No field is ever left unset and no computation
//! here can fail: every numeric edge case (short series, zero denominator)
//! degrades to 0.0 so the classifier stays total.

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::seasonality::{detect_seasonality, SeasonalityAnalysis};
use crate::series::DemandSeries;
use crate::stability::stability_index;
use crate::stats;
use crate::trend::fit_trend;
use crate::volatility::volatility_profile;

/// The fixed feature vector driving classification.
///
/// Every field defaults to 0.0 when its underlying computation cannot be
/// performed; fields are never NaN or infinite for a valid series.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct FeatureVector {
    /// OLS slope of demand against time index.
    pub trend_slope: f64,
    /// Goodness of fit of the trend line, in [0, 1].
    pub trend_r_squared: f64,
    /// Relative change of the last quarter's mean versus the first quarter's.
    pub growth_rate: f64,
    /// Population std / mean.
    pub coefficient_of_variation: f64,
    pub standard_deviation: f64,
    /// Fraction of spectral power at the dominant detected period.
    pub seasonality_strength: f64,
    /// Composite rolling stability in [0, 1].
    pub stability_index: f64,
    pub mean_volume: f64,
    /// Mean / max demand, in [0, 1].
    pub volume_ratio: f64,
    /// Fraction of points that are local peaks above the mean.
    pub peak_frequency: f64,
    /// Mean second difference of the series.
    pub acceleration: f64,
    /// Relative change of the last third's mean versus the first third's.
    pub recent_performance: f64,
    /// Relative change of the second half's mean versus the first half's.
    pub volume_growth_rate: f64,
}

/// Extract the full feature vector for a series.
pub fn extract(series: &DemandSeries, config: &AnalysisConfig) -> FeatureVector {
    let values = series.quantities();
    let seasonality = detect_seasonality(&values, config.min_pattern_strength);
    from_parts(&values, config, &seasonality)
}

/// Build the feature vector from raw values and a precomputed seasonality
/// analysis, so callers that also report the patterns run the FFT once.
pub(crate) fn from_parts(
    values: &[f64],
    config: &AnalysisConfig,
    seasonality: &SeasonalityAnalysis,
) -> FeatureVector {
    let n = values.len();
    let fit = fit_trend(values);
    let volatility = volatility_profile(values);
    let stability = stability_index(values, config.stability_window_days);

    let max = values.iter().cloned().fold(0.0, f64::max);
    let volume_ratio = if max > 0.0 { volatility.mean / max } else { 0.0 };

    FeatureVector {
        trend_slope: fit.slope,
        trend_r_squared: fit.r_squared,
        growth_rate: quarter_growth_rate(values),
        coefficient_of_variation: volatility.coefficient_of_variation,
        standard_deviation: volatility.std_dev,
        seasonality_strength: seasonality.dominant().map_or(0.0, |p| p.strength),
        stability_index: stability.index,
        mean_volume: volatility.mean,
        volume_ratio,
        peak_frequency: peak_frequency(values, volatility.mean),
        acceleration: acceleration(values),
        recent_performance: segment_change(values, 3),
        volume_growth_rate: segment_change(values, 2),
    }
}

/// Relative change between the first and last quarter means.
/// Requires at least 8 points; 0.0 on a non-positive denominator.
fn quarter_growth_rate(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 8 {
        return 0.0;
    }
    let q = n / 4;
    let first = stats::mean(&values[..q]);
    let last = stats::mean(&values[n - q..]);
    if first <= 0.0 {
        return 0.0;
    }
    (last - first) / first
}

/// Relative change between the first and last 1/`parts` segment means.
/// 0.0 when the series is too short for two-point segments or the first
/// segment mean is non-positive.
fn segment_change(values: &[f64], parts: usize) -> f64 {
    let n = values.len();
    if n < 2 * parts {
        return 0.0;
    }
    let seg = n / parts;
    let first = stats::mean(&values[..seg]);
    let last = stats::mean(&values[n - seg..]);
    if first <= 0.0 {
        return 0.0;
    }
    (last - first) / first
}

/// Fraction of points that are strict local peaks above the mean.
fn peak_frequency(values: &[f64], mean: f64) -> f64 {
    let n = values.len();
    if n < 3 {
        return 0.0;
    }
    let peaks = (1..n - 1)
        .filter(|&i| values[i] > values[i - 1] && values[i] > values[i + 1] && values[i] > mean)
        .count();
    peaks as f64 / n as f64
}

/// Mean of second finite differences. 0.0 below 3 points.
fn acceleration(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return 0.0;
    }
    let sum: f64 = (1..n - 1)
        .map(|i| values[i + 1] - 2.0 * values[i] + values[i - 1])
        .sum();
    sum / (n - 2) as f64
}
