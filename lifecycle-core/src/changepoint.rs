//! Cumulative-deviation change-point detection.
//!
//! The series is z-normalized and cumulatively summed. Where the cumulative
//! sum bows away from the straight chord between its first and last values,
//! the underlying level has shifted. A point is flagged when its deviation
//! exceeds a sigma threshold AND it is the local deviation maximum, with a
//! minimum spacing enforced between flagged points.

use ndarray::Array1;
use serde::Serialize;

use crate::stats;
use crate::thresholds::{CHANGEPOINT_NEIGHBORHOOD, CHANGEPOINT_SIGMA};

/// One detected shift in the series' generative level.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ChangePoint {
    /// Index into the series where the shift is inferred.
    pub index: usize,
    /// Deviation magnitude from the cumulative-sum chord, in chord std units.
    pub deviation: f64,
}

/// Detect change points, keeping flagged points at least
/// `min_segment_length` apart.
pub fn detect_change_points(values: &[f64], min_segment_length: usize) -> Vec<ChangePoint> {
    let n = values.len();
    if n < 2 * CHANGEPOINT_NEIGHBORHOOD + 2 {
        return Vec::new();
    }

    let mean = stats::mean(values);
    let std = stats::std_dev(values);
    if std == 0.0 {
        return Vec::new();
    }

    // Cumulative sum of the z-normalized series.
    let mut acc = 0.0;
    let cumulative: Array1<f64> = values
        .iter()
        .map(|&v| {
            acc += (v - mean) / std;
            acc
        })
        .collect();

    let cum_std = stats::std_dev(cumulative.as_slice().expect("cumsum is contiguous"));
    if cum_std == 0.0 {
        return Vec::new();
    }

    // Deviation of each cumulative value from the first-to-last chord.
    let first = cumulative[0];
    let last = cumulative[n - 1];
    let deviations: Vec<f64> = cumulative
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let chord = first + (last - first) * i as f64 / (n - 1) as f64;
            (c - chord).abs()
        })
        .collect();

    let threshold = CHANGEPOINT_SIGMA * cum_std;

    let mut candidates: Vec<ChangePoint> = (CHANGEPOINT_NEIGHBORHOOD
        ..n - CHANGEPOINT_NEIGHBORHOOD)
        .filter(|&i| {
            deviations[i] > threshold
                && (i - CHANGEPOINT_NEIGHBORHOOD..=i + CHANGEPOINT_NEIGHBORHOOD)
                    .all(|j| deviations[j] <= deviations[i])
        })
        .map(|i| ChangePoint {
            index: i,
            deviation: deviations[i] / cum_std,
        })
        .collect();

    // Strongest first, then greedily enforce the minimum spacing.
    candidates.sort_by(|a, b| {
        b.deviation
            .partial_cmp(&a.deviation)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut kept: Vec<ChangePoint> = Vec::new();
    for candidate in candidates {
        if kept
            .iter()
            .all(|k| candidate.index.abs_diff(k.index) >= min_segment_length.max(1))
        {
            kept.push(candidate);
        }
    }
    kept.sort_by_key(|c| c.index);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_shift_is_flagged_near_the_step() {
        let mut values = vec![10.0; 50];
        values.extend(vec![50.0; 50]);
        let points = detect_change_points(&values, 5);
        assert!(!points.is_empty(), "no change point found");
        // The strongest deviation of a single step sits at the step itself.
        assert!(
            points.iter().any(|p| (45..=55).contains(&p.index)),
            "change points were {:?}",
            points
        );
    }

    #[test]
    fn constant_series_has_no_change_points() {
        assert!(detect_change_points(&[42.0; 80], 5).is_empty());
    }

    #[test]
    fn steady_noise_without_shift_is_quiet() {
        // Small alternation around a flat level never builds cumulative drift.
        let values: Vec<f64> = (0..80)
            .map(|i| 100.0 + if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        assert!(detect_change_points(&values, 5).is_empty());
    }

    #[test]
    fn minimum_spacing_collapses_adjacent_flags() {
        // A step at 50 with a two-point relapse at 52..54 produces two
        // deviation maxima four indices apart.
        let mut values = vec![10.0; 50];
        values.extend(vec![50.0; 50]);
        values[52] = 10.0;
        values[53] = 10.0;

        let tight = detect_change_points(&values, 1);
        let spaced = detect_change_points(&values, 8);

        assert!(tight.len() >= 2, "expected both maxima, got {:?}", tight);
        assert!(spaced.len() < tight.len());
        for pair in spaced.windows(2) {
            assert!(pair[1].index - pair[0].index >= 8);
        }
    }

    #[test]
    fn short_series_yields_nothing() {
        assert!(detect_change_points(&[1.0, 9.0, 3.0], 2).is_empty());
    }
}
