//! Per-SKU analysis entry points.
//!
//! `classify_series` is the minimal operation: features in, stage out.
//! `analyze` produces the full report a persistence or reporting layer would
//! store: classification, transition distribution, seasonal patterns, change
//! points, and the bootstrap slope interval.

use serde::Serialize;

use crate::changepoint::{detect_change_points, ChangePoint};
use crate::classifier::{classify, LifecycleClassification};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::features;
use crate::seasonality::{detect_seasonality, SeasonalityAnalysis};
use crate::series::DemandSeries;
use crate::transition::{transition_distribution, TransitionDistribution};
use crate::trend::{bootstrap_slope_interval, SlopeInterval};

/// The full per-SKU analysis report.
#[derive(Clone, Debug, Serialize)]
pub struct DemandAnalysis {
    pub classification: LifecycleClassification,
    /// Present unless disabled via `include_transition_probabilities`.
    pub transition: Option<TransitionDistribution>,
    pub seasonality: SeasonalityAnalysis,
    pub change_points: Vec<ChangePoint>,
    /// 95% bootstrap interval for the trend slope, when computable.
    pub slope_interval: Option<SlopeInterval>,
}

/// Classify one series into a lifecycle stage.
///
/// Fails only on precondition violations: the series construction already
/// rejected unordered or invalid points, so the single check left is length.
pub fn classify_series(
    series: &DemandSeries,
    config: &AnalysisConfig,
) -> Result<LifecycleClassification> {
    check_length(series, config)?;
    let features = features::extract(series, config);
    Ok(classify(&features))
}

/// Run the full analysis for one series.
pub fn analyze(series: &DemandSeries, config: &AnalysisConfig) -> Result<DemandAnalysis> {
    check_length(series, config)?;

    let values = series.quantities();
    let seasonality = detect_seasonality(&values, config.min_pattern_strength);
    let features = features::from_parts(&values, config, &seasonality);
    let classification = classify(&features);

    let transition = config
        .include_transition_probabilities
        .then(|| transition_distribution(classification.stage, &features));

    let change_points = detect_change_points(&values, config.min_segment_length);
    let slope_interval = bootstrap_slope_interval(
        &values,
        config.bootstrap_iterations,
        config.bootstrap_seed,
    );

    Ok(DemandAnalysis {
        classification,
        transition,
        seasonality,
        change_points,
        slope_interval,
    })
}

fn check_length(series: &DemandSeries, config: &AnalysisConfig) -> Result<()> {
    let required = config.effective_min_points();
    if series.len() < required {
        return Err(AnalysisError::TooFewPoints {
            actual: series.len(),
            required,
        });
    }
    Ok(())
}
