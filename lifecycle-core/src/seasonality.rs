//! FFT-based periodicity detection.
//!
//! The series is detrended with an OLS line, transformed with a forward DFT,
//! and scanned for spectral peaks over the positive frequencies. Peaks that
//! explain enough of the total spectral power become seasonal patterns,
//! classified into calendar bands by their period.

use ndarray::Array1;
use num_complex::Complex64;
use rustfft::FftPlanner;
use serde::Serialize;

use crate::thresholds::{MIN_SEASONAL_PERIOD, SPECTRAL_PEAK_FLOOR, SPECTRAL_PEAK_SPACING};
use crate::trend::fit_trend;

/// Calendar band a detected period falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PeriodBand {
    Weekly,
    Monthly,
    Quarterly,
    Annual,
    Custom,
}

/// One detected seasonal pattern.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SeasonalPattern {
    /// Period in sample points (days for daily series).
    pub period: f64,
    /// Fraction of total spectral power at this period, in [0, 1].
    pub strength: f64,
    pub band: PeriodBand,
}

/// All seasonal patterns found in a series, strongest first.
///
/// An empty pattern list means no periodicity cleared the strength threshold.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SeasonalityAnalysis {
    pub patterns: Vec<SeasonalPattern>,
}

impl SeasonalityAnalysis {
    /// The strongest detected pattern, if any.
    pub fn dominant(&self) -> Option<&SeasonalPattern> {
        self.patterns.first()
    }

    pub fn is_seasonal(&self) -> bool {
        !self.patterns.is_empty()
    }
}

/// Spectral power too small to distinguish from detrending residue.
const POWER_FLOOR: f64 = 1e-10;

/// Minimum series length for a meaningful spectrum.
const MIN_SPECTRUM_POINTS: usize = 8;

/// Detect seasonal patterns in a series.
///
/// `min_strength` is the minimum fraction of total spectral power a period
/// must explain to be reported (see `AnalysisConfig::min_pattern_strength`).
pub fn detect_seasonality(values: &[f64], min_strength: f64) -> SeasonalityAnalysis {
    let n = values.len();
    if n < MIN_SPECTRUM_POINTS {
        return SeasonalityAnalysis::default();
    }

    // Remove the linear trend so slow drift does not masquerade as a
    // low-frequency cycle.
    let fit = fit_trend(values);
    let detrended: Array1<f64> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| v - (fit.intercept + fit.slope * i as f64))
        .collect();

    let mut buffer: Vec<Complex64> = detrended
        .iter()
        .map(|&v| Complex64::new(v, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    // Power spectrum over positive frequencies (bins 1..=n/2).
    let power: Vec<f64> = (1..=n / 2).map(|k| buffer[k].norm_sqr()).collect();
    let total_power: f64 = power.iter().sum();
    if total_power <= POWER_FLOOR {
        return SeasonalityAnalysis::default();
    }
    let max_power = power.iter().cloned().fold(0.0, f64::max);

    // Local maxima above the prominence floor, strongest first.
    let mut candidates: Vec<(usize, f64)> = (1..power.len().saturating_sub(1))
        .filter(|&i| {
            power[i] > power[i - 1]
                && power[i] > power[i + 1]
                && power[i] >= SPECTRAL_PEAK_FLOOR * max_power
        })
        .map(|i| (i + 1, power[i])) // i is an offset into `power`; bin index is i + 1
        .collect();
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    // Greedy spacing: keep a peak only if it sits far enough from every
    // stronger peak already kept.
    let mut kept_bins: Vec<usize> = Vec::new();
    let mut patterns: Vec<SeasonalPattern> = Vec::new();
    for (bin, peak_power) in candidates {
        if kept_bins
            .iter()
            .any(|&k| bin.abs_diff(k) < SPECTRAL_PEAK_SPACING)
        {
            continue;
        }
        kept_bins.push(bin);

        let period = n as f64 / bin as f64;
        if period < MIN_SEASONAL_PERIOD || period > n as f64 / 2.0 {
            continue;
        }

        let strength = peak_power / total_power;
        if strength < min_strength {
            continue;
        }

        patterns.push(SeasonalPattern {
            period,
            strength,
            band: classify_band(period),
        });
    }

    patterns.sort_by(|a, b| {
        b.strength
            .partial_cmp(&a.strength)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    SeasonalityAnalysis { patterns }
}

/// Map a period (in points) to its nearest calendar band.
fn classify_band(period: f64) -> PeriodBand {
    if (6.5..=7.5).contains(&period) {
        PeriodBand::Weekly
    } else if (28.0..=32.0).contains(&period) {
        PeriodBand::Monthly
    } else if (85.0..=95.0).contains(&period) {
        PeriodBand::Quarterly
    } else if (360.0..=370.0).contains(&period) {
        PeriodBand::Annual
    } else {
        PeriodBand::Custom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn weekly_cycle_is_detected() {
        // Seven-day cycle over ten weeks, amplitude 100 around a 200 baseline.
        let values: Vec<f64> = (0..70)
            .map(|t| 200.0 + 100.0 * (TAU * t as f64 / 7.0).sin())
            .collect();
        let analysis = detect_seasonality(&values, 0.3);
        let dominant = analysis.dominant().expect("weekly cycle not detected");
        assert_eq!(dominant.band, PeriodBand::Weekly);
        assert!((dominant.period - 7.0).abs() < 0.5);
        assert!(dominant.strength >= 0.3);
    }

    #[test]
    fn weekly_cycle_survives_noise() {
        // Deterministic jitter below 20% of the amplitude.
        let values: Vec<f64> = (0..70)
            .map(|t| {
                let noise = 15.0 * ((t * 7919 % 101) as f64 / 101.0 - 0.5);
                200.0 + 100.0 * (TAU * t as f64 / 7.0).sin() + noise
            })
            .collect();
        let analysis = detect_seasonality(&values, 0.3);
        let dominant = analysis.dominant().expect("weekly cycle not detected");
        assert_eq!(dominant.band, PeriodBand::Weekly);
        assert!(dominant.strength >= 0.3);
    }

    #[test]
    fn monthly_cycle_lands_in_monthly_band() {
        let values: Vec<f64> = (0..120)
            .map(|t| 500.0 + 80.0 * (TAU * t as f64 / 30.0).sin())
            .collect();
        let analysis = detect_seasonality(&values, 0.3);
        let dominant = analysis.dominant().expect("monthly cycle not detected");
        assert_eq!(dominant.band, PeriodBand::Monthly);
        assert!((dominant.period - 30.0).abs() < 2.0);
    }

    #[test]
    fn constant_series_has_no_seasonality() {
        let analysis = detect_seasonality(&[50.0; 60], 0.3);
        assert!(!analysis.is_seasonal());
    }

    #[test]
    fn pure_trend_has_no_seasonality() {
        let values: Vec<f64> = (0..60).map(|i| 10.0 + 2.0 * i as f64).collect();
        let analysis = detect_seasonality(&values, 0.3);
        assert!(!analysis.is_seasonal());
    }

    #[test]
    fn short_series_has_no_seasonality() {
        let analysis = detect_seasonality(&[1.0, 9.0, 1.0, 9.0, 1.0], 0.3);
        assert!(!analysis.is_seasonal());
    }

    #[test]
    fn off_calendar_period_is_custom() {
        // Period 12 sits in no calendar band.
        let values: Vec<f64> = (0..96)
            .map(|t| 300.0 + 60.0 * (TAU * t as f64 / 12.0).sin())
            .collect();
        let analysis = detect_seasonality(&values, 0.3);
        let dominant = analysis.dominant().expect("cycle not detected");
        assert_eq!(dominant.band, PeriodBand::Custom);
    }
}
