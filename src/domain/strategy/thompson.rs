//! Thompson Sampling over Beta posteriors
//!
//! Each arm's posterior is `Beta(1 + successes, 1 + failures)`, where the
//! success/failure split comes straight from the arm's reward mass. At
//! decision time one sample is drawn per arm and the highest sample wins.
//! The draw order is fixed by arm insertion order, which keeps seeded
//! selection reproducible.

use crate::domain::experiment::{ArmId, ArmStatistics};
use crate::domain::DomainError;

use super::rng::BanditRng;
use super::selection::{ArmStatsSnapshot, SelectionStrategy};

/// Beta-Bernoulli Thompson Sampling
#[derive(Debug, Clone, Copy, Default)]
pub struct ThompsonSamplingStrategy;

impl ThompsonSamplingStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Posterior shape parameters for one arm; both stay >= 1 because the
    /// prior is Beta(1, 1) and reward mass is non-negative.
    fn posterior(stats: &ArmStatistics) -> (f64, f64) {
        (1.0 + stats.successes(), 1.0 + stats.failures())
    }
}

impl SelectionStrategy for ThompsonSamplingStrategy {
    fn name(&self) -> &'static str {
        "thompson"
    }

    fn select(
        &self,
        snapshot: &ArmStatsSnapshot,
        rng: &mut dyn BanditRng,
    ) -> Result<ArmId, DomainError> {
        let Some(((first_arm, first_stats), rest)) = snapshot.split_first() else {
            return Err(DomainError::empty_arm_set(
                "Thompson selection requires at least one arm",
            ));
        };

        let (alpha, beta) = Self::posterior(first_stats);
        let mut best_arm = first_arm;
        let mut best_sample = rng.sample_beta(alpha, beta);

        for (arm_id, stats) in rest {
            let (alpha, beta) = Self::posterior(stats);
            let sample = rng.sample_beta(alpha, beta);

            // Exact ties are broken by the PRNG
            if sample > best_sample || (sample == best_sample && rng.next_unit() < 0.5) {
                best_sample = sample;
                best_arm = arm_id;
            }
        }

        Ok(best_arm.clone())
    }
}
