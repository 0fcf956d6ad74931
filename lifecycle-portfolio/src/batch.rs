//! Parallel batch assessment.
//!
//! Each SKU's analysis is a pure function of its own series, so the batch
//! parallelizes embarrassingly across Rayon workers with zero coordination.

use rayon::prelude::*;

use lifecycle_core::{analyze, AnalysisConfig};

use crate::types::{AssessmentOutcome, PortfolioEntry, SkuAssessment};

/// Assess every entry in the portfolio.
///
/// Output order matches input order. Per-SKU precondition failures become
/// `CannotClassify` outcomes carrying the reason string.
pub fn assess_portfolio(
    entries: &[PortfolioEntry],
    config: &AnalysisConfig,
) -> Vec<SkuAssessment> {
    let assessments: Vec<SkuAssessment> = entries
        .par_iter()
        .map(|entry| {
            let outcome = match analyze(&entry.series, config) {
                Ok(analysis) => AssessmentOutcome::Classified(analysis),
                Err(err) => AssessmentOutcome::CannotClassify {
                    reason: err.to_string(),
                },
            };
            SkuAssessment {
                sku_id: entry.sku_id.clone(),
                outcome,
            }
        })
        .collect();

    let refused = assessments
        .iter()
        .filter(|a| matches!(a.outcome, AssessmentOutcome::CannotClassify { .. }))
        .count();
    log::debug!(
        "assessed {} SKUs ({} could not be classified)",
        assessments.len(),
        refused
    );

    assessments
}
