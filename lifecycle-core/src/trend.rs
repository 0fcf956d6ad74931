//! Linear trend estimation with slope significance and bootstrap interval.
//!
//! The trend is an ordinary-least-squares fit over (index, value) pairs.
//! Significance comes from a two-sided t-test on the slope coefficient with
//! n - 2 degrees of freedom. The bootstrap interval resamples observation
//! pairs with a seeded RNG so results are reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::stats;

/// Result of fitting a least-squares line to a series.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// Two-sided p-value of the slope t-test. 1.0 means no trend asserted.
    pub p_value: f64,
}

impl TrendFit {
    /// The no-trend fit returned for series too short to regress.
    fn none() -> Self {
        Self {
            slope: 0.0,
            intercept: 0.0,
            r_squared: 0.0,
            p_value: 1.0,
        }
    }
}

/// Fit an OLS line to `values` against their indices.
///
/// Fewer than 3 points: slope 0, R² 0, p-value 1.0 (no trend asserted).
pub fn fit_trend(values: &[f64]) -> TrendFit {
    let n = values.len();
    if n < 3 {
        return TrendFit::none();
    }

    let nf = n as f64;
    let mean_x = (nf - 1.0) / 2.0;
    let mean_y = stats::mean(values);

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let predicted = intercept + slope * i as f64;
        ss_res += (y - predicted).powi(2);
        ss_tot += (y - mean_y).powi(2);
    }

    if ss_tot == 0.0 {
        // Constant series: zero slope, nothing to explain.
        return TrendFit {
            slope: 0.0,
            intercept: mean_y,
            r_squared: 0.0,
            p_value: 1.0,
        };
    }

    let r_squared = (1.0 - ss_res / ss_tot).clamp(0.0, 1.0);

    let df = nf - 2.0;
    let se_slope = (ss_res / df / sxx).sqrt();
    let p_value = if se_slope == 0.0 {
        // Perfect fit: the slope is exact, not estimated.
        if slope.abs() > f64::EPSILON {
            0.0
        } else {
            1.0
        }
    } else {
        stats::student_t_two_sided_p(slope / se_slope, df)
    };

    TrendFit {
        slope,
        intercept,
        r_squared,
        p_value,
    }
}

/// Percentile bootstrap interval for the OLS slope.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SlopeInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Bootstrap a 95% percentile interval for the slope by resampling
/// observation pairs with replacement. Deterministic for a fixed seed.
///
/// Returns `None` for series too short to regress. Degenerate resamples
/// (all draws landing on one index) are skipped.
pub fn bootstrap_slope_interval(
    values: &[f64],
    iterations: usize,
    seed: u64,
) -> Option<SlopeInterval> {
    let n = values.len();
    if n < 3 || iterations == 0 {
        return None;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut slopes = Vec::with_capacity(iterations);

    for _ in 0..iterations {
        let mut sx = 0.0;
        let mut sy = 0.0;
        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for _ in 0..n {
            let idx = rng.gen_range(0..n);
            let x = idx as f64;
            let y = values[idx];
            sx += x;
            sy += y;
            sxx += x * x;
            sxy += x * y;
        }
        let nf = n as f64;
        let denom = nf * sxx - sx * sx;
        if denom.abs() < f64::EPSILON {
            continue;
        }
        slopes.push((nf * sxy - sx * sy) / denom);
    }

    if slopes.is_empty() {
        return None;
    }

    slopes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let lo_idx = ((slopes.len() as f64) * 0.025).floor() as usize;
    let hi_idx = (((slopes.len() as f64) * 0.975).ceil() as usize).min(slopes.len()) - 1;

    Some(SlopeInterval {
        lower: slopes[lo_idx],
        upper: slopes[hi_idx],
    })
}
