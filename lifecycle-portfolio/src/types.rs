//! Portfolio-level types.

use serde::Serialize;

use lifecycle_core::{DemandAnalysis, DemandSeries, LifecycleStage};

/// One SKU's demand history queued for assessment.
#[derive(Clone, Debug)]
pub struct PortfolioEntry {
    pub sku_id: String,
    pub series: DemandSeries,
}

/// The assessment produced for one SKU.
#[derive(Clone, Debug, Serialize)]
pub struct SkuAssessment {
    pub sku_id: String,
    pub outcome: AssessmentOutcome,
}

/// Either a full analysis or a structured refusal. A SKU that cannot be
/// classified is reported with its reason, never dropped silently.
#[derive(Clone, Debug, Serialize)]
pub enum AssessmentOutcome {
    Classified(DemandAnalysis),
    CannotClassify { reason: String },
}

impl SkuAssessment {
    /// The classified stage, if the assessment succeeded.
    pub fn stage(&self) -> Option<LifecycleStage> {
        match &self.outcome {
            AssessmentOutcome::Classified(analysis) => Some(analysis.classification.stage),
            AssessmentOutcome::CannotClassify { .. } => None,
        }
    }

    /// The classification confidence, if the assessment succeeded.
    pub fn confidence(&self) -> Option<f64> {
        match &self.outcome {
            AssessmentOutcome::Classified(analysis) => {
                Some(analysis.classification.confidence)
            }
            AssessmentOutcome::CannotClassify { .. } => None,
        }
    }
}
