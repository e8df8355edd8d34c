//! In-memory store implementations
//!
//! The experiment store serializes per-experiment mutations under a write
//! lock, so readers never observe a partially extended arm list or a
//! half-applied strategy swap. Arm statistics live in a sharded map keyed by
//! `(experiment_id, arm_id)`: updates to one key are atomic, and updates to
//! different keys never contend on a store-wide lock.

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::experiment::{
    ArmId, ArmStateStore, ArmStatistics, Experiment, ExperimentId, ExperimentStore,
    ExperimentValidationError,
};
use crate::domain::strategy::StrategyConfig;
use crate::domain::DomainError;

type StateKey = (String, String);

// ============================================================================
// InMemoryExperimentStore
// ============================================================================

/// In-memory experiment definition store
#[derive(Debug, Default)]
pub struct InMemoryExperimentStore {
    experiments: RwLock<HashMap<String, Experiment>>,
}

impl InMemoryExperimentStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with experiments
    pub fn with_experiments(experiments: Vec<Experiment>) -> Self {
        let store = Self::new();
        {
            let mut map = store.experiments.write().unwrap();

            for experiment in experiments {
                map.insert(experiment.id().as_str().to_string(), experiment);
            }
        }
        store
    }
}

fn append_error(id: &ExperimentId, error: ExperimentValidationError) -> DomainError {
    match error {
        ExperimentValidationError::DuplicateArmId(arm) => DomainError::duplicate_arm(id, arm),
        other => DomainError::validation(other.to_string()),
    }
}

#[async_trait]
impl ExperimentStore for InMemoryExperimentStore {
    async fn create_if_absent(&self, experiment: Experiment) -> Result<bool, DomainError> {
        let id = experiment.id().as_str().to_string();
        let mut experiments = self
            .experiments
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {e}")))?;

        if experiments.contains_key(&id) {
            return Ok(false);
        }

        experiments.insert(id, experiment);
        Ok(true)
    }

    async fn get(&self, id: &ExperimentId) -> Result<Option<Experiment>, DomainError> {
        let experiments = self
            .experiments
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {e}")))?;

        Ok(experiments.get(id.as_str()).cloned())
    }

    async fn append_arms(
        &self,
        id: &ExperimentId,
        new_arms: &[ArmId],
    ) -> Result<Experiment, DomainError> {
        let mut experiments = self
            .experiments
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {e}")))?;

        let experiment = experiments
            .get_mut(id.as_str())
            .ok_or_else(|| DomainError::not_found(format!("Experiment '{id}' was not found")))?;

        experiment
            .append_arms(new_arms)
            .map_err(|e| append_error(id, e))?;

        Ok(experiment.clone())
    }

    async fn update_strategy(
        &self,
        id: &ExperimentId,
        strategy: StrategyConfig,
    ) -> Result<Experiment, DomainError> {
        let mut experiments = self
            .experiments
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {e}")))?;

        let experiment = experiments
            .get_mut(id.as_str())
            .ok_or_else(|| DomainError::not_found(format!("Experiment '{id}' was not found")))?;

        experiment.set_strategy(strategy);
        Ok(experiment.clone())
    }

    async fn delete(&self, id: &ExperimentId) -> Result<bool, DomainError> {
        let mut experiments = self
            .experiments
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {e}")))?;

        Ok(experiments.remove(id.as_str()).is_some())
    }

    async fn list(&self) -> Result<Vec<Experiment>, DomainError> {
        let experiments = self
            .experiments
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {e}")))?;

        let mut results: Vec<_> = experiments.values().cloned().collect();
        results.sort_by(|a, b| a.id().as_str().cmp(b.id().as_str()));
        Ok(results)
    }
}

// ============================================================================
// InMemoryArmStateStore
// ============================================================================

/// In-memory per-arm statistics store.
///
/// Backed by a `DashMap` keyed by `(experiment_id, arm_id)`: the entry API
/// gives each reward update exclusive access to exactly one key, which is
/// what makes concurrent rewards to the same arm lose no updates while
/// rewards to other arms proceed in parallel.
#[derive(Debug, Default)]
pub struct InMemoryArmStateStore {
    stats: DashMap<StateKey, ArmStatistics>,
}

impl InMemoryArmStateStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn key(experiment_id: &ExperimentId, arm_id: &ArmId) -> StateKey {
        (
            experiment_id.as_str().to_string(),
            arm_id.as_str().to_string(),
        )
    }
}

#[async_trait]
impl ArmStateStore for InMemoryArmStateStore {
    async fn snapshot(
        &self,
        experiment_id: &ExperimentId,
        arms: &[ArmId],
    ) -> Result<Vec<(ArmId, ArmStatistics)>, DomainError> {
        Ok(arms
            .iter()
            .map(|arm| {
                let stats = self
                    .stats
                    .get(&Self::key(experiment_id, arm))
                    .map(|entry| *entry.value())
                    .unwrap_or_default();
                (arm.clone(), stats)
            })
            .collect())
    }

    async fn apply_reward(
        &self,
        experiment_id: &ExperimentId,
        arm_id: &ArmId,
        reward: f64,
    ) -> Result<ArmStatistics, DomainError> {
        let mut entry = self
            .stats
            .entry(Self::key(experiment_id, arm_id))
            .or_default();

        // observe is pure: a rejected reward leaves the entry untouched
        let next = entry.observe(reward)?;
        *entry = next;
        Ok(next)
    }

    async fn initialize_arms(
        &self,
        experiment_id: &ExperimentId,
        arms: &[ArmId],
    ) -> Result<(), DomainError> {
        for arm in arms {
            self.stats.entry(Self::key(experiment_id, arm)).or_default();
        }

        Ok(())
    }

    async fn reset(&self, experiment_id: &ExperimentId) -> Result<(), DomainError> {
        self.stats
            .retain(|(exp, _), _| exp != experiment_id.as_str());
        Ok(())
    }
}
