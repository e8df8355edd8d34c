//! Synthetic Bernoulli environment for exercising strategies end to end
//!
//! Simulates arms with fixed but hidden conversion rates, so convergence and
//! regret behavior can be checked without any live traffic.

use crate::domain::experiment::{ArmId, ArmStatistics};
use crate::domain::strategy::{BanditRng, SelectionStrategy};
use crate::domain::DomainError;

/// A set of arms with fixed true conversion rates
#[derive(Debug)]
pub struct BernoulliEnv {
    arms: Vec<(ArmId, f64)>,
    best_rate: f64,
}

impl BernoulliEnv {
    /// Create an environment from `(arm_id, true_rate)` pairs
    pub fn new(arm_rates: Vec<(ArmId, f64)>) -> Self {
        let best_rate = arm_rates.iter().map(|(_, r)| *r).fold(0.0, f64::max);
        Self {
            arms: arm_rates,
            best_rate,
        }
    }

    /// The arm IDs in insertion order
    pub fn arm_ids(&self) -> Vec<ArmId> {
        self.arms.iter().map(|(id, _)| id.clone()).collect()
    }

    /// The arm with the highest true rate
    pub fn best_arm(&self) -> Option<&ArmId> {
        self.arms
            .iter()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(id, _)| id)
    }

    /// Draw a Bernoulli reward (0.0 or 1.0) for the given arm
    pub fn pull(&self, arm_id: &ArmId, rng: &mut dyn BanditRng) -> Result<f64, DomainError> {
        let rate = self.rate(arm_id)?;
        Ok(if rng.next_unit() < rate { 1.0 } else { 0.0 })
    }

    /// Instantaneous regret from choosing `arm_id` instead of the best arm
    pub fn regret(&self, arm_id: &ArmId) -> Result<f64, DomainError> {
        Ok(self.best_rate - self.rate(arm_id)?)
    }

    fn rate(&self, arm_id: &ArmId) -> Result<f64, DomainError> {
        self.arms
            .iter()
            .find(|(id, _)| id == arm_id)
            .map(|(_, rate)| *rate)
            .ok_or_else(|| DomainError::unknown_arm("synthetic-env", arm_id.as_str()))
    }
}

/// Result of one simulation run
#[derive(Debug)]
pub struct SimulationRun {
    /// Arm chosen in each round, in order
    pub choices: Vec<ArmId>,
    /// Cumulative regret after each round
    pub cumulative_regrets: Vec<f64>,
    /// Total reward collected
    pub total_reward: f64,
}

impl SimulationRun {
    /// Fraction of the last `window` rounds spent on the given arm
    pub fn trailing_share(&self, arm_id: &ArmId, window: usize) -> f64 {
        let tail = &self.choices[self.choices.len().saturating_sub(window)..];
        if tail.is_empty() {
            return 0.0;
        }
        tail.iter().filter(|c| *c == arm_id).count() as f64 / tail.len() as f64
    }
}

/// Run a strategy against a synthetic environment for `rounds` rounds.
///
/// Statistics accumulate locally, one `observe` per round, exactly as the
/// engine would apply them through the state store.
pub fn run_simulation(
    strategy: &dyn SelectionStrategy,
    env: &BernoulliEnv,
    rng: &mut dyn BanditRng,
    rounds: usize,
) -> Result<SimulationRun, DomainError> {
    let mut snapshot: Vec<(ArmId, ArmStatistics)> = env
        .arm_ids()
        .into_iter()
        .map(|id| (id, ArmStatistics::default()))
        .collect();

    let mut choices = Vec::with_capacity(rounds);
    let mut cumulative_regrets = Vec::with_capacity(rounds);
    let mut cumulative_regret = 0.0;
    let mut total_reward = 0.0;

    for _ in 0..rounds {
        let chosen = strategy.select(&snapshot, rng)?;
        let reward = env.pull(&chosen, rng)?;

        let entry = snapshot
            .iter_mut()
            .find(|(id, _)| *id == chosen)
            .ok_or_else(|| DomainError::unknown_arm("synthetic-env", chosen.as_str()))?;
        entry.1 = entry.1.observe(reward)?;

        cumulative_regret += env.regret(&chosen)?;
        cumulative_regrets.push(cumulative_regret);
        total_reward += reward;
        choices.push(chosen);
    }

    Ok(SimulationRun {
        choices,
        cumulative_regrets,
        total_reward,
    })
}
