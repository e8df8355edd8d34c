//! UCB1 (Auer et al., 2002)
//!
//! Score: `mean + exploration_weight * sqrt(2 ln(total_pulls) / pulls)`.
//! Untried arms short-circuit scoring entirely: the first arm with zero
//! pulls, in insertion order, is selected outright.

use crate::domain::experiment::ArmId;
use crate::domain::DomainError;

use super::config::Ucb1Params;
use super::rng::BanditRng;
use super::selection::{ArmStatsSnapshot, SelectionStrategy};

/// Upper-confidence-bound selection
#[derive(Debug, Clone, Copy)]
pub struct Ucb1Strategy {
    exploration_weight: f64,
    random_tie_break: bool,
}

impl Ucb1Strategy {
    pub fn new(params: Ucb1Params) -> Self {
        Self {
            exploration_weight: params.exploration_weight,
            // Without a seed, ties resolve to the first arm reaching the max
            random_tie_break: params.seed.is_some(),
        }
    }
}

impl SelectionStrategy for Ucb1Strategy {
    fn name(&self) -> &'static str {
        "ucb1"
    }

    fn select(
        &self,
        snapshot: &ArmStatsSnapshot,
        rng: &mut dyn BanditRng,
    ) -> Result<ArmId, DomainError> {
        if snapshot.is_empty() {
            return Err(DomainError::empty_arm_set(
                "UCB1 selection requires at least one arm",
            ));
        }

        // Cold start: every arm is played once before any arm is scored
        if let Some((arm_id, _)) = snapshot.iter().find(|(_, stats)| stats.is_untried()) {
            return Ok(arm_id.clone());
        }

        let total_pulls: u64 = snapshot.iter().map(|(_, stats)| stats.pulls).sum();
        let log_total = (total_pulls as f64).ln();

        let mut best_score = f64::NEG_INFINITY;
        let mut best_indexes: Vec<usize> = Vec::new();

        for (index, (_, stats)) in snapshot.iter().enumerate() {
            let mean = stats.mean_reward().unwrap_or(0.0);
            let bonus = self.exploration_weight * (2.0 * log_total / stats.pulls as f64).sqrt();
            let score = mean + bonus;

            if score > best_score {
                best_score = score;
                best_indexes.clear();
                best_indexes.push(index);
            } else if score == best_score {
                best_indexes.push(index);
            }
        }

        let winner = if self.random_tie_break && best_indexes.len() > 1 {
            best_indexes[rng.pick_index(best_indexes.len())]
        } else {
            best_indexes[0]
        };

        Ok(snapshot[winner].0.clone())
    }
}
