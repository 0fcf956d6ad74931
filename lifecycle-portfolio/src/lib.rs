//! Batch lifecycle assessment and portfolio aggregation.
//!
//! This crate is the caller-side layer around `lifecycle-core`: it loads
//! demand histories from CSV, fans per-SKU analysis out across Rayon
//! workers, and folds the results into portfolio-level summaries and
//! recommendations. The numeric core stays pure; everything operational
//! (I/O, parallelism, logging) lives here.

pub mod batch;
pub mod demand_loader;
pub mod portfolio;
pub mod types;

pub use batch::assess_portfolio;
pub use demand_loader::{group_into_series, load_demand, load_demand_file, DemandRecord};
pub use portfolio::{
    summarize_portfolio, CategoryRollup, PortfolioRecommendation, PortfolioSummary,
    StageDistribution,
};
pub use types::{AssessmentOutcome, PortfolioEntry, SkuAssessment};
