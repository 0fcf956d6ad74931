//! Next-stage transition model.
//!
//! Each current stage has a likelihood table over the five target stages,
//! conditioned on a handful of feature signals. The tables are hand-tuned
//! policy constants (carried over for behavioral compatibility, not derived
//! from calibration data); the shape is fixed, the numbers are adjustable.
//! Likelihoods are normalized into a probability distribution; a degenerate
//! all-zero table falls back to uniform.

use serde::Serialize;

use crate::classifier::LifecycleStage;
use crate::features::FeatureVector;
use crate::thresholds::{HIGH_CV_THRESHOLD, MODERATE_GROWTH_RATE, PHASE_OUT_GROWTH_RATE};

/// Probability of each stage being next, summing to 1.0.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TransitionDistribution {
    pub introduction: f64,
    pub growth: f64,
    pub maturity: f64,
    pub decline: f64,
    pub phase_out: f64,
}

impl TransitionDistribution {
    pub fn probability(&self, stage: LifecycleStage) -> f64 {
        match stage {
            LifecycleStage::Introduction => self.introduction,
            LifecycleStage::Growth => self.growth,
            LifecycleStage::Maturity => self.maturity,
            LifecycleStage::Decline => self.decline,
            LifecycleStage::PhaseOut => self.phase_out,
        }
    }

    /// The most probable next stage. Ties resolve to the earlier stage in
    /// `LifecycleStage::ALL` order.
    pub fn most_likely(&self) -> LifecycleStage {
        let mut best = LifecycleStage::Introduction;
        let mut best_p = self.probability(best);
        for stage in LifecycleStage::ALL {
            let p = self.probability(stage);
            if p > best_p {
                best = stage;
                best_p = p;
            }
        }
        best
    }

    fn from_likelihoods(likelihoods: [f64; 5]) -> Self {
        let sum: f64 = likelihoods.iter().sum();
        let normalized = if sum > 0.0 {
            likelihoods.map(|l| l / sum)
        } else {
            // Degenerate input: nothing to prefer.
            [0.2; 5]
        };
        Self {
            introduction: normalized[0],
            growth: normalized[1],
            maturity: normalized[2],
            decline: normalized[3],
            phase_out: normalized[4],
        }
    }
}

/// Predict the distribution over next stages given the current stage.
pub fn transition_distribution(
    current: LifecycleStage,
    features: &FeatureVector,
) -> TransitionDistribution {
    // Likelihood order: [Introduction, Growth, Maturity, Decline, PhaseOut].
    let likelihoods = match current {
        LifecycleStage::Introduction => [
            if features.coefficient_of_variation > HIGH_CV_THRESHOLD { 0.3 } else { 0.2 },
            if features.growth_rate > 0.1 { 0.5 } else { 0.3 },
            if features.stability_index > 0.5 { 0.2 } else { 0.1 },
            if features.recent_performance < -0.05 { 0.1 } else { 0.05 },
            0.02,
        ],
        LifecycleStage::Growth => [
            0.0,
            if features.growth_rate > MODERATE_GROWTH_RATE { 0.3 } else { 0.1 },
            if features.stability_index > 0.5 { 0.6 } else { 0.4 },
            if features.recent_performance < -0.05 { 0.2 } else { 0.05 },
            0.02,
        ],
        LifecycleStage::Maturity => [
            0.0,
            if features.growth_rate > MODERATE_GROWTH_RATE { 0.15 } else { 0.05 },
            if features.stability_index > 0.6 { 0.6 } else { 0.4 },
            if features.growth_rate < -MODERATE_GROWTH_RATE { 0.3 } else { 0.15 },
            if features.volume_ratio < 0.3 { 0.05 } else { 0.02 },
        ],
        LifecycleStage::Decline => [
            0.0,
            if features.recent_performance > 0.1 { 0.05 } else { 0.02 },
            if features.stability_index > 0.5 { 0.2 } else { 0.1 },
            if features.trend_slope < 0.0 { 0.5 } else { 0.3 },
            if features.growth_rate < PHASE_OUT_GROWTH_RATE || features.volume_ratio < 0.2 {
                0.3
            } else {
                0.15
            },
        ],
        // Phase-out is near-absorbing: products occasionally get a reprieve
        // back into managed decline, nothing else.
        LifecycleStage::PhaseOut => [0.0, 0.0, 0.0, 0.1, 0.9],
    };

    TransitionDistribution::from_likelihoods(likelihoods)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vectors() -> Vec<FeatureVector> {
        vec![
            FeatureVector::default(),
            FeatureVector {
                growth_rate: 0.3,
                trend_slope: 2.0,
                stability_index: 0.7,
                ..FeatureVector::default()
            },
            FeatureVector {
                growth_rate: -0.4,
                trend_slope: -1.0,
                volume_ratio: 0.1,
                recent_performance: -0.6,
                coefficient_of_variation: 0.9,
                ..FeatureVector::default()
            },
        ]
    }

    #[test]
    fn distributions_are_valid_for_every_stage_and_vector() {
        for features in &sample_vectors() {
            for stage in LifecycleStage::ALL {
                let dist = transition_distribution(stage, features);
                let mut sum = 0.0;
                for target in LifecycleStage::ALL {
                    let p = dist.probability(target);
                    assert!((0.0..=1.0).contains(&p), "p out of range: {}", p);
                    sum += p;
                }
                assert!(
                    (sum - 1.0).abs() < 1e-6,
                    "probabilities for {:?} sum to {}",
                    stage,
                    sum
                );
            }
        }
    }

    #[test]
    fn phase_out_is_near_absorbing() {
        let dist = transition_distribution(LifecycleStage::PhaseOut, &FeatureVector::default());
        assert!((dist.phase_out - 0.9).abs() < 1e-12);
        assert!((dist.decline - 0.1).abs() < 1e-12);
        assert_eq!(dist.introduction, 0.0);
        assert_eq!(dist.growth, 0.0);
        assert_eq!(dist.maturity, 0.0);
    }

    #[test]
    fn stable_growth_most_likely_matures() {
        let features = FeatureVector {
            growth_rate: 0.02,
            stability_index: 0.8,
            ..FeatureVector::default()
        };
        let dist = transition_distribution(LifecycleStage::Growth, &features);
        assert_eq!(dist.most_likely(), LifecycleStage::Maturity);
        // 0.6 / (0.1 + 0.6 + 0.05 + 0.02)
        assert!((dist.maturity - 0.6 / 0.77).abs() < 1e-9);
    }

    #[test]
    fn hot_growth_self_transition_strengthens() {
        let cool = transition_distribution(
            LifecycleStage::Growth,
            &FeatureVector {
                growth_rate: 0.01,
                ..FeatureVector::default()
            },
        );
        let hot = transition_distribution(
            LifecycleStage::Growth,
            &FeatureVector {
                growth_rate: 0.2,
                ..FeatureVector::default()
            },
        );
        assert!(hot.growth > cool.growth);
    }

    #[test]
    fn collapsing_decline_leans_into_phase_out() {
        let features = FeatureVector {
            growth_rate: -0.4,
            trend_slope: -2.0,
            volume_ratio: 0.1,
            ..FeatureVector::default()
        };
        let dist = transition_distribution(LifecycleStage::Decline, &features);
        assert!(dist.phase_out > 0.25);
        assert_eq!(dist.most_likely(), LifecycleStage::Decline);
    }

    #[test]
    fn growing_introduction_heads_for_growth() {
        let features = FeatureVector {
            growth_rate: 0.25,
            coefficient_of_variation: 0.7,
            ..FeatureVector::default()
        };
        let dist = transition_distribution(LifecycleStage::Introduction, &features);
        assert_eq!(dist.most_likely(), LifecycleStage::Growth);
    }

    #[test]
    fn degenerate_likelihoods_fall_back_to_uniform() {
        let dist = TransitionDistribution::from_likelihoods([0.0; 5]);
        for stage in LifecycleStage::ALL {
            assert!((dist.probability(stage) - 0.2).abs() < 1e-12);
        }
    }

    #[test]
    fn introduction_never_reappears_from_later_stages() {
        for stage in [
            LifecycleStage::Growth,
            LifecycleStage::Maturity,
            LifecycleStage::Decline,
            LifecycleStage::PhaseOut,
        ] {
            let dist = transition_distribution(stage, &FeatureVector::default());
            assert_eq!(dist.probability(LifecycleStage::Introduction), 0.0);
        }
    }
}
