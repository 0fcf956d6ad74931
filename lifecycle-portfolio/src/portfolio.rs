//! Portfolio aggregation.
//!
//! Folds per-SKU assessments into stage distribution counts, per-category
//! rollups, and derived recommendations. Category labels are resolved by the
//! caller (this layer has no notion of what a category is); SKUs without a
//! label fall into "uncategorized".

use std::collections::HashMap;

use serde::Serialize;

use lifecycle_core::LifecycleStage;

use crate::types::{AssessmentOutcome, SkuAssessment};

/// Label used for SKUs the caller did not categorize.
const UNCATEGORIZED: &str = "uncategorized";

/// Share of declining/phasing-out SKUs above which the portfolio is flagged.
const SUNSET_SHARE_ALERT: f64 = 0.3;

/// Share of introduction-stage SKUs above which the portfolio is flagged.
const UNPROVEN_SHARE_ALERT: f64 = 0.4;

/// Share of growth-stage SKUs above which supply risk is flagged.
const GROWTH_SHARE_ALERT: f64 = 0.4;

/// Share of unclassifiable SKUs above which data coverage is flagged.
const COVERAGE_ALERT: f64 = 0.2;

/// How many SKUs sit in each lifecycle stage.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct StageDistribution {
    pub introduction: usize,
    pub growth: usize,
    pub maturity: usize,
    pub decline: usize,
    pub phase_out: usize,
    /// SKUs that could not be classified.
    pub unclassified: usize,
}

impl StageDistribution {
    fn record(&mut self, stage: Option<LifecycleStage>) {
        match stage {
            Some(LifecycleStage::Introduction) => self.introduction += 1,
            Some(LifecycleStage::Growth) => self.growth += 1,
            Some(LifecycleStage::Maturity) => self.maturity += 1,
            Some(LifecycleStage::Decline) => self.decline += 1,
            Some(LifecycleStage::PhaseOut) => self.phase_out += 1,
            None => self.unclassified += 1,
        }
    }

    pub fn count(&self, stage: LifecycleStage) -> usize {
        match stage {
            LifecycleStage::Introduction => self.introduction,
            LifecycleStage::Growth => self.growth,
            LifecycleStage::Maturity => self.maturity,
            LifecycleStage::Decline => self.decline,
            LifecycleStage::PhaseOut => self.phase_out,
        }
    }

    /// Total SKUs, classified or not.
    pub fn total(&self) -> usize {
        self.classified() + self.unclassified
    }

    /// Successfully classified SKUs.
    pub fn classified(&self) -> usize {
        LifecycleStage::ALL.iter().map(|&s| self.count(s)).sum()
    }

    /// Fraction of classified SKUs in the given stage. 0.0 when nothing
    /// classified.
    pub fn share(&self, stage: LifecycleStage) -> f64 {
        let classified = self.classified();
        if classified == 0 {
            return 0.0;
        }
        self.count(stage) as f64 / classified as f64
    }

    /// The stage holding the most SKUs, ties resolving to the earlier stage.
    pub fn dominant_stage(&self) -> Option<LifecycleStage> {
        if self.classified() == 0 {
            return None;
        }
        let mut best = LifecycleStage::Introduction;
        for stage in LifecycleStage::ALL {
            if self.count(stage) > self.count(best) {
                best = stage;
            }
        }
        Some(best)
    }
}

/// Aggregate view of one externally defined category.
#[derive(Clone, Debug, Serialize)]
pub struct CategoryRollup {
    pub category: String,
    pub sku_count: usize,
    pub distribution: StageDistribution,
    pub dominant_stage: Option<LifecycleStage>,
    /// Mean classification confidence across classified SKUs; 0.0 if none.
    pub mean_confidence: f64,
}

/// A derived, severity-tagged portfolio recommendation.
#[derive(Clone, Debug, Serialize)]
pub struct PortfolioRecommendation {
    pub severity: &'static str,
    pub message: String,
}

/// The aggregated portfolio report.
#[derive(Clone, Debug, Serialize)]
pub struct PortfolioSummary {
    pub distribution: StageDistribution,
    pub categories: Vec<CategoryRollup>,
    pub recommendations: Vec<PortfolioRecommendation>,
}

/// Fold per-SKU assessments into a portfolio summary.
///
/// `categories` maps SKU id to an externally resolved category label.
pub fn summarize_portfolio(
    assessments: &[SkuAssessment],
    categories: &HashMap<String, String>,
) -> PortfolioSummary {
    let mut distribution = StageDistribution::default();
    for assessment in assessments {
        distribution.record(assessment.stage());
    }

    PortfolioSummary {
        distribution,
        categories: rollup_categories(assessments, categories),
        recommendations: derive_recommendations(&distribution),
    }
}

fn rollup_categories(
    assessments: &[SkuAssessment],
    categories: &HashMap<String, String>,
) -> Vec<CategoryRollup> {
    let mut groups: HashMap<&str, Vec<&SkuAssessment>> = HashMap::new();
    for assessment in assessments {
        let label = categories
            .get(&assessment.sku_id)
            .map_or(UNCATEGORIZED, String::as_str);
        groups.entry(label).or_default().push(assessment);
    }

    let mut rollups: Vec<CategoryRollup> = groups
        .into_iter()
        .map(|(category, members)| {
            let mut distribution = StageDistribution::default();
            let mut confidence_sum = 0.0;
            let mut classified = 0usize;
            for member in &members {
                distribution.record(member.stage());
                if let AssessmentOutcome::Classified(analysis) = &member.outcome {
                    confidence_sum += analysis.classification.confidence;
                    classified += 1;
                }
            }
            let mean_confidence = if classified > 0 {
                confidence_sum / classified as f64
            } else {
                0.0
            };
            CategoryRollup {
                category: category.to_string(),
                sku_count: members.len(),
                dominant_stage: distribution.dominant_stage(),
                distribution,
                mean_confidence,
            }
        })
        .collect();
    rollups.sort_by(|a, b| a.category.cmp(&b.category));
    rollups
}

fn derive_recommendations(distribution: &StageDistribution) -> Vec<PortfolioRecommendation> {
    let mut recommendations = Vec::new();
    if distribution.total() == 0 {
        return recommendations;
    }

    let sunset_share = distribution.share(LifecycleStage::Decline)
        + distribution.share(LifecycleStage::PhaseOut);
    if sunset_share > SUNSET_SHARE_ALERT {
        recommendations.push(PortfolioRecommendation {
            severity: "high",
            message: format!(
                "{:.0}% of classified SKUs are declining or phasing out; review the assortment and plan run-out inventory",
                sunset_share * 100.0
            ),
        });
    }

    if distribution.share(LifecycleStage::Introduction) > UNPROVEN_SHARE_ALERT {
        recommendations.push(PortfolioRecommendation {
            severity: "medium",
            message: format!(
                "{:.0}% of classified SKUs are still in introduction; the portfolio leans on unproven products",
                distribution.share(LifecycleStage::Introduction) * 100.0
            ),
        });
    }

    if distribution.share(LifecycleStage::Growth) > GROWTH_SHARE_ALERT {
        recommendations.push(PortfolioRecommendation {
            severity: "medium",
            message: format!(
                "{:.0}% of classified SKUs are in growth; secure supply commitments for ramping demand",
                distribution.share(LifecycleStage::Growth) * 100.0
            ),
        });
    }

    let coverage_gap = distribution.unclassified as f64 / distribution.total() as f64;
    if coverage_gap > COVERAGE_ALERT {
        recommendations.push(PortfolioRecommendation {
            severity: "medium",
            message: format!(
                "{} of {} SKUs could not be classified; check demand history coverage",
                distribution.unclassified,
                distribution.total()
            ),
        });
    }

    recommendations
}
