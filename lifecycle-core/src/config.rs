//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::thresholds::{
    DEFAULT_MIN_DATA_POINTS, DEFAULT_MIN_SEGMENT_LENGTH, DEFAULT_MIN_PATTERN_STRENGTH,
    DEFAULT_STABILITY_WINDOW, HARD_FLOOR_POINTS,
};

/// Tunables recognized by the analysis entry points.
///
/// Unspecified fields take their defaults on deserialization, so partial
/// configuration records from the caller are accepted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum series length required for classification. Clamped to the
    /// hard floor of 10 points.
    pub min_data_points: usize,
    /// Minimum fraction of spectral power a seasonal period must explain.
    pub min_pattern_strength: f64,
    /// Rolling-window width (points) for the stability index.
    pub stability_window_days: usize,
    /// Whether to compute the next-stage transition distribution.
    pub include_transition_probabilities: bool,
    /// Minimum spacing between flagged change points.
    pub min_segment_length: usize,
    /// Bootstrap resampling iterations for the trend slope interval.
    pub bootstrap_iterations: usize,
    /// Seed for the bootstrap RNG; fixed so reruns are reproducible.
    pub bootstrap_seed: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_data_points: DEFAULT_MIN_DATA_POINTS,
            min_pattern_strength: DEFAULT_MIN_PATTERN_STRENGTH,
            stability_window_days: DEFAULT_STABILITY_WINDOW,
            include_transition_probabilities: true,
            min_segment_length: DEFAULT_MIN_SEGMENT_LENGTH,
            bootstrap_iterations: 200,
            bootstrap_seed: 42,
        }
    }
}

impl AnalysisConfig {
    /// The configured minimum, never below the hard floor.
    pub fn effective_min_points(&self) -> usize {
        self.min_data_points.max(HARD_FLOOR_POINTS)
    }
}
