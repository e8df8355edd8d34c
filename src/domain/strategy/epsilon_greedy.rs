//! Epsilon-Greedy with configurable exploration rate
//!
//! With probability epsilon a uniformly random arm is chosen; otherwise the
//! arm with the highest empirical mean wins. Untried arms rank above any
//! measured mean in the greedy branch, so a new arm is always exploited
//! before the incumbent best.

use crate::domain::experiment::{ArmId, ArmStatistics};
use crate::domain::DomainError;

use super::config::EpsilonGreedyParams;
use super::rng::BanditRng;
use super::selection::{ArmStatsSnapshot, SelectionStrategy};

/// Classic Epsilon-Greedy selection
#[derive(Debug, Clone, Copy)]
pub struct EpsilonGreedyStrategy {
    epsilon: f64,
}

impl EpsilonGreedyStrategy {
    pub fn new(params: EpsilonGreedyParams) -> Self {
        Self {
            epsilon: params.epsilon,
        }
    }

    fn greedy_rank(stats: &ArmStatistics) -> f64 {
        // Untried arms outrank every measured mean
        stats.mean_reward().unwrap_or(f64::INFINITY)
    }
}

impl SelectionStrategy for EpsilonGreedyStrategy {
    fn name(&self) -> &'static str {
        "epsilon_greedy"
    }

    fn select(
        &self,
        snapshot: &ArmStatsSnapshot,
        rng: &mut dyn BanditRng,
    ) -> Result<ArmId, DomainError> {
        let Some(((first_arm, first_stats), rest)) = snapshot.split_first() else {
            return Err(DomainError::empty_arm_set(
                "Epsilon-Greedy selection requires at least one arm",
            ));
        };

        // Explore
        if rng.next_unit() < self.epsilon {
            let index = rng.pick_index(snapshot.len());
            return Ok(snapshot[index].0.clone());
        }

        // Exploit: highest empirical mean, ties resolved by insertion order
        let mut best_arm = first_arm;
        let mut best_rank = Self::greedy_rank(first_stats);

        for (arm_id, stats) in rest {
            let rank = Self::greedy_rank(stats);
            if rank > best_rank {
                best_rank = rank;
                best_arm = arm_id;
            }
        }

        Ok(best_arm.clone())
    }
}
