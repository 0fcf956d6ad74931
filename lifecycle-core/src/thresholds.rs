//! Centralized thresholds for lifecycle stage classification.
//!
//! These values are calibrated for SKU-level demand histories sampled daily.
//! Changing a threshold here affects BOTH the classifier rule table (in
//! `classifier.rs`) and the transition likelihood tables (in `transition.rs`).

/// Absolute minimum number of points a series must have to be classified.
/// Below this, classification is refused outright rather than degraded.
pub const HARD_FLOOR_POINTS: usize = 10;

/// Default configurable minimum series length for classification.
pub const DEFAULT_MIN_DATA_POINTS: usize = 30;

/// Default minimum fraction of spectral power a period must explain to
/// count as a seasonal pattern.
pub const DEFAULT_MIN_PATTERN_STRENGTH: f64 = 0.3;

/// Default rolling-window width (in points) for the stability index.
pub const DEFAULT_STABILITY_WINDOW: usize = 7;

/// Default minimum spacing between flagged change points.
pub const DEFAULT_MIN_SEGMENT_LENGTH: usize = 5;

/// Coefficient-of-variation ceiling used to normalize volatility scores.
/// Anything above this is treated as maximally volatile.
pub const VOLATILITY_CAP: f64 = 2.0;

/// Spectral peaks must rise above this fraction of the maximum power.
pub const SPECTRAL_PEAK_FLOOR: f64 = 0.10;

/// Minimum spacing (in frequency bins) between retained spectral peaks.
pub const SPECTRAL_PEAK_SPACING: usize = 3;

/// Shortest period (in points) a seasonal pattern may have.
pub const MIN_SEASONAL_PERIOD: f64 = 2.0;

/// Cumulative-sum deviations beyond this many standard deviations flag a
/// candidate change point.
pub const CHANGEPOINT_SIGMA: f64 = 2.0;

/// A change point must be the deviation maximum within this many points on
/// either side.
pub const CHANGEPOINT_NEIGHBORHOOD: usize = 3;

// ---------------------------------------------------------------------------
// Classifier rule thresholds
// ---------------------------------------------------------------------------

/// CV above which demand is considered highly volatile (Introduction rule).
pub const HIGH_CV_THRESHOLD: f64 = 0.6;

/// Stability index below which demand is considered unsettled.
pub const LOW_STABILITY_THRESHOLD: f64 = 0.4;

/// Growth rate above which a SKU is in strong growth (with acceleration).
pub const STRONG_GROWTH_RATE: f64 = 0.15;

/// Growth rate above which a SKU is in moderate growth.
pub const MODERATE_GROWTH_RATE: f64 = 0.05;

/// Growth rate below which a SKU is in decline.
pub const DECLINE_GROWTH_RATE: f64 = -0.1;

/// Acceleration below which a decline is considered steepening.
pub const STEEP_DECLINE_ACCELERATION: f64 = -0.05;

/// Growth rate below which a SKU is a phase-out candidate regardless of
/// other signals.
pub const PHASE_OUT_GROWTH_RATE: f64 = -0.25;

/// Volume ratio (mean/max) below which current volume is a small fraction
/// of historic peak demand.
pub const LOW_VOLUME_RATIO: f64 = 0.2;

/// Recent-performance change below which the last third of the series has
/// collapsed versus the first third.
pub const POOR_RECENT_PERFORMANCE: f64 = -0.3;

/// CV ceiling for the mature, steady-demand rule.
pub const MATURITY_CV_CEILING: f64 = 0.3;

/// Stability floor for the mature, steady-demand rule.
pub const MATURITY_STABILITY_FLOOR: f64 = 0.6;
