//! Classification error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors. The
//! numeric primitives themselves are total (they degrade to defined default
//! values); only caller-level precondition violations surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Series too short to classify: {actual} points, need at least {required}")]
    TooFewPoints { actual: usize, required: usize },

    #[error("Timestamps must be strictly increasing: violation at index {index}")]
    NonChronological { index: usize },

    #[error("Demand values must be non-negative finite numbers: got {value} at index {index}")]
    InvalidQuantity { index: usize, value: f64 },
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
