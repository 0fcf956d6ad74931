//! Lifecycle stage classification.
//!
//! The classifier is stateless: each call independently infers the most
//! likely current stage from the feature vector. Rules live in an ordered
//! table and are evaluated in sequence; the first rule whose predicate holds
//! wins and supplies the stage, the confidence formula, and the rationale.
//! Rule order is part of the contract: a series can satisfy several
//! predicates at once, and earlier rules deliberately shadow later ones.

use std::fmt;

use serde::Serialize;

use crate::features::FeatureVector;
use crate::thresholds::{
    DECLINE_GROWTH_RATE, HIGH_CV_THRESHOLD, LOW_STABILITY_THRESHOLD, LOW_VOLUME_RATIO,
    MATURITY_CV_CEILING, MATURITY_STABILITY_FLOOR, MODERATE_GROWTH_RATE, PHASE_OUT_GROWTH_RATE,
    POOR_RECENT_PERFORMANCE, STEEP_DECLINE_ACCELERATION, STRONG_GROWTH_RATE,
};

/// The five demand lifecycle stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LifecycleStage {
    Introduction,
    Growth,
    Maturity,
    Decline,
    PhaseOut,
}

impl LifecycleStage {
    /// All stage variants for iteration.
    pub const ALL: [LifecycleStage; 5] = [
        LifecycleStage::Introduction,
        LifecycleStage::Growth,
        LifecycleStage::Maturity,
        LifecycleStage::Decline,
        LifecycleStage::PhaseOut,
    ];

    /// Stable position of this stage in `ALL`.
    pub fn index(&self) -> usize {
        match self {
            LifecycleStage::Introduction => 0,
            LifecycleStage::Growth => 1,
            LifecycleStage::Maturity => 2,
            LifecycleStage::Decline => 3,
            LifecycleStage::PhaseOut => 4,
        }
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleStage::Introduction => write!(f, "Introduction"),
            LifecycleStage::Growth => write!(f, "Growth"),
            LifecycleStage::Maturity => write!(f, "Maturity"),
            LifecycleStage::Decline => write!(f, "Decline"),
            LifecycleStage::PhaseOut => write!(f, "Phase-Out"),
        }
    }
}

/// The outcome of classifying one feature vector.
#[derive(Clone, Debug, Serialize)]
pub struct LifecycleClassification {
    pub stage: LifecycleStage,
    /// Confidence in [0, 1], from the winning rule's formula.
    pub confidence: f64,
    /// One line stating which signals drove the decision.
    pub rationale: String,
    pub features: FeatureVector,
}

/// One entry of the ordered rule table.
struct StageRule {
    stage: LifecycleStage,
    applies: fn(&FeatureVector) -> bool,
    confidence: fn(&FeatureVector) -> f64,
    rationale: fn(&FeatureVector) -> String,
}

/// Rules in evaluation order. First match wins.
static RULES: [StageRule; 7] = [
    // High volatility with unsettled demand: a product finding its market.
    StageRule {
        stage: LifecycleStage::Introduction,
        applies: |f| {
            f.coefficient_of_variation > HIGH_CV_THRESHOLD
                && f.stability_index < LOW_STABILITY_THRESHOLD
        },
        confidence: |f| (f.coefficient_of_variation + (1.0 - f.stability_index)).min(0.9),
        rationale: |f| {
            format!(
                "high volatility (cv {:.2}) with low stability ({:.2}): demand pattern not yet established",
                f.coefficient_of_variation, f.stability_index
            )
        },
    },
    // Strong expansion: growing, trending up, and still accelerating.
    StageRule {
        stage: LifecycleStage::Growth,
        applies: |f| {
            f.growth_rate > STRONG_GROWTH_RATE && f.trend_slope > 0.0 && f.acceleration > 0.0
        },
        confidence: |f| (0.7 + f.growth_rate + f.trend_slope.signum()).min(0.95),
        rationale: |f| {
            format!(
                "strong growth ({:.0}% quarter over quarter) with a rising, accelerating trend",
                f.growth_rate * 100.0
            )
        },
    },
    // Moderate expansion: growing with a positive trend.
    StageRule {
        stage: LifecycleStage::Growth,
        applies: |f| f.growth_rate > MODERATE_GROWTH_RATE && f.trend_slope > 0.0,
        confidence: |f| (0.6 + f.growth_rate).min(0.8),
        rationale: |f| {
            format!(
                "moderate growth ({:.0}% quarter over quarter) with a positive trend slope",
                f.growth_rate * 100.0
            )
        },
    },
    // Steepening contraction: shrinking, trending down, and accelerating downward.
    StageRule {
        stage: LifecycleStage::Decline,
        applies: |f| {
            f.growth_rate < DECLINE_GROWTH_RATE
                && f.trend_slope < 0.0
                && f.acceleration < STEEP_DECLINE_ACCELERATION
        },
        confidence: |f| (0.7 + f.growth_rate.abs() + f.acceleration.abs()).min(0.9),
        rationale: |f| {
            format!(
                "contraction ({:.0}% quarter over quarter) with a falling, steepening trend",
                f.growth_rate * 100.0
            )
        },
    },
    // Plain contraction: shrinking with a negative trend.
    StageRule {
        stage: LifecycleStage::Decline,
        applies: |f| f.growth_rate < DECLINE_GROWTH_RATE && f.trend_slope < 0.0,
        confidence: |f| (0.6 + f.growth_rate.abs()).min(0.8),
        rationale: |f| {
            format!(
                "contraction ({:.0}% quarter over quarter) with a negative trend slope",
                f.growth_rate * 100.0
            )
        },
    },
    // End of life: steep collapse, or residual volume with recent performance gone.
    StageRule {
        stage: LifecycleStage::PhaseOut,
        applies: |f| {
            f.growth_rate < PHASE_OUT_GROWTH_RATE
                || (f.volume_ratio < LOW_VOLUME_RATIO
                    && f.recent_performance < POOR_RECENT_PERFORMANCE)
        },
        confidence: |f| {
            (0.7 + f.growth_rate.abs() + f.recent_performance.abs()).min(0.85)
        },
        rationale: |f| {
            format!(
                "demand collapse: growth {:.0}%, recent performance {:.0}% of early baseline",
                f.growth_rate * 100.0,
                f.recent_performance * 100.0
            )
        },
    },
    // Steady state: flat growth, low volatility, high stability.
    StageRule {
        stage: LifecycleStage::Maturity,
        applies: |f| {
            f.growth_rate.abs() < MODERATE_GROWTH_RATE
                && f.coefficient_of_variation < MATURITY_CV_CEILING
                && f.stability_index > MATURITY_STABILITY_FLOOR
        },
        confidence: |f| (f.stability_index + (1.0 - f.coefficient_of_variation)).min(0.85),
        rationale: |f| {
            format!(
                "steady demand: flat growth ({:.0}%), cv {:.2}, stability {:.2}",
                f.growth_rate * 100.0,
                f.coefficient_of_variation,
                f.stability_index
            )
        },
    },
];

/// Classify a feature vector into a lifecycle stage.
///
/// Falls through to Maturity at 0.5 confidence when no rule matches.
pub fn classify(features: &FeatureVector) -> LifecycleClassification {
    for rule in &RULES {
        if (rule.applies)(features) {
            return LifecycleClassification {
                stage: rule.stage,
                confidence: (rule.confidence)(features).clamp(0.0, 1.0),
                rationale: (rule.rationale)(features),
                features: *features,
            };
        }
    }

    LifecycleClassification {
        stage: LifecycleStage::Maturity,
        confidence: 0.5,
        rationale: "no strong lifecycle signal; defaulting to maturity".to_string(),
        features: *features,
    }
}
