//! Demand lifecycle analytics core.
//!
//! Pure, synchronous feature extraction and lifecycle classification for
//! per-SKU demand series. Everything here is a deterministic function of its
//! inputs: no I/O, no shared state, no side effects. Batch orchestration and
//! portfolio aggregation live in the `lifecycle-portfolio` crate.

pub mod analysis;
pub mod changepoint;
pub mod classifier;
pub mod config;
pub mod error;
pub mod features;
pub mod seasonality;
pub mod series;
pub mod stability;
pub mod stats;
pub mod thresholds;
pub mod transition;
pub mod trend;
pub mod volatility;

pub use analysis::{analyze, classify_series, DemandAnalysis};
pub use changepoint::{detect_change_points, ChangePoint};
pub use classifier::{classify, LifecycleClassification, LifecycleStage};
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use features::{extract, FeatureVector};
pub use seasonality::{detect_seasonality, PeriodBand, SeasonalPattern, SeasonalityAnalysis};
pub use series::{DemandPoint, DemandSeries};
pub use stability::{stability_index, StabilityAnalysis};
pub use transition::{transition_distribution, TransitionDistribution};
pub use trend::{bootstrap_slope_interval, fit_trend, SlopeInterval, TrendFit};
pub use volatility::{volatility_profile, VolatilityProfile};
