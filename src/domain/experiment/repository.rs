//! Store traits for experiment metadata and per-arm state
//!
//! Two contracts, mirroring the split between experiment definitions and
//! bandit arm state: any backend with atomic check-and-set and per-key
//! atomic increments can implement them (an in-memory map with locks, a
//! transactional key-value store, a Redis hash per arm, ...).

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{ArmId, Experiment, ExperimentId};
use super::stats::ArmStatistics;
use crate::domain::strategy::StrategyConfig;
use crate::domain::DomainError;

// ============================================================================
// ExperimentStore
// ============================================================================

/// Store for experiment definitions (arm set + active strategy).
///
/// All calls are async and cancel-safe: dropping an in-flight call (for
/// example under `tokio::time::timeout`) must never leave a partial write
/// behind.
#[async_trait]
pub trait ExperimentStore: Send + Sync + Debug {
    /// Atomically create the experiment if its ID is not already present.
    ///
    /// Returns `false`, without mutating anything, when the ID exists. This
    /// is the primitive that makes concurrent "create on first request"
    /// race-safe.
    async fn create_if_absent(&self, experiment: Experiment) -> Result<bool, DomainError>;

    /// Get an experiment by ID
    async fn get(&self, id: &ExperimentId) -> Result<Option<Experiment>, DomainError>;

    /// Append new arms to an experiment, atomically with respect to
    /// concurrent reads: a reader sees either the old arm list or the new
    /// one, never a partially extended one.
    async fn append_arms(
        &self,
        id: &ExperimentId,
        new_arms: &[ArmId],
    ) -> Result<Experiment, DomainError>;

    /// Replace the experiment's strategy configuration in place.
    ///
    /// The configuration is a single value, so a reader can never observe a
    /// strategy paired with another strategy's parameters.
    async fn update_strategy(
        &self,
        id: &ExperimentId,
        strategy: StrategyConfig,
    ) -> Result<Experiment, DomainError>;

    /// Delete an experiment definition, returns true if it existed
    async fn delete(&self, id: &ExperimentId) -> Result<bool, DomainError>;

    /// List all experiment definitions
    async fn list(&self) -> Result<Vec<Experiment>, DomainError>;

    /// Check if an experiment exists
    async fn exists(&self, id: &ExperimentId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}

// ============================================================================
// ArmStateStore
// ============================================================================

/// Store for per-arm statistics, keyed by `(experiment_id, arm_id)`.
#[async_trait]
pub trait ArmStateStore: Send + Sync + Debug {
    /// Read the statistics for the requested arms, in the order given.
    ///
    /// Arms without recorded state read as zero statistics.
    async fn snapshot(
        &self,
        experiment_id: &ExperimentId,
        arms: &[ArmId],
    ) -> Result<Vec<(ArmId, ArmStatistics)>, DomainError>;

    /// Atomically observe one reward for one arm and return the new state.
    ///
    /// Must be linearizable per `(experiment_id, arm_id)` key: concurrent
    /// rewards for the same arm never lose updates, while rewards for
    /// different arms or experiments proceed independently.
    async fn apply_reward(
        &self,
        experiment_id: &ExperimentId,
        arm_id: &ArmId,
        reward: f64,
    ) -> Result<ArmStatistics, DomainError>;

    /// Create zero-statistics entries for arms that have none yet.
    ///
    /// Existing entries are left untouched, so a reward that raced ahead of
    /// initialization is never reset.
    async fn initialize_arms(
        &self,
        experiment_id: &ExperimentId,
        arms: &[ArmId],
    ) -> Result<(), DomainError>;

    /// Drop all state recorded for the given experiment
    async fn reset(&self, experiment_id: &ExperimentId) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    //! Mock store implementations for testing

    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Mock experiment store with an error-injection switch
    #[derive(Debug, Default)]
    pub struct MockExperimentStore {
        experiments: RwLock<HashMap<String, Experiment>>,
        should_fail: RwLock<bool>,
    }

    impl MockExperimentStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_error(self) -> Self {
            *self.should_fail.write().unwrap() = true;
            self
        }

        fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().unwrap() {
                Err(DomainError::storage("Mock store unavailable"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl ExperimentStore for MockExperimentStore {
        async fn create_if_absent(&self, experiment: Experiment) -> Result<bool, DomainError> {
            self.check_should_fail()?;
            let id = experiment.id().as_str().to_string();
            let mut experiments = self.experiments.write().unwrap();

            if experiments.contains_key(&id) {
                return Ok(false);
            }

            experiments.insert(id, experiment);
            Ok(true)
        }

        async fn get(&self, id: &ExperimentId) -> Result<Option<Experiment>, DomainError> {
            self.check_should_fail()?;
            Ok(self.experiments.read().unwrap().get(id.as_str()).cloned())
        }

        async fn append_arms(
            &self,
            id: &ExperimentId,
            new_arms: &[ArmId],
        ) -> Result<Experiment, DomainError> {
            self.check_should_fail()?;
            let mut experiments = self.experiments.write().unwrap();

            let experiment = experiments.get_mut(id.as_str()).ok_or_else(|| {
                DomainError::not_found(format!("Experiment '{id}' was not found"))
            })?;

            experiment
                .append_arms(new_arms)
                .map_err(|e| DomainError::conflict(e.to_string()))?;

            Ok(experiment.clone())
        }

        async fn update_strategy(
            &self,
            id: &ExperimentId,
            strategy: StrategyConfig,
        ) -> Result<Experiment, DomainError> {
            self.check_should_fail()?;
            let mut experiments = self.experiments.write().unwrap();

            let experiment = experiments.get_mut(id.as_str()).ok_or_else(|| {
                DomainError::not_found(format!("Experiment '{id}' was not found"))
            })?;

            experiment.set_strategy(strategy);
            Ok(experiment.clone())
        }

        async fn delete(&self, id: &ExperimentId) -> Result<bool, DomainError> {
            self.check_should_fail()?;
            Ok(self
                .experiments
                .write()
                .unwrap()
                .remove(id.as_str())
                .is_some())
        }

        async fn list(&self) -> Result<Vec<Experiment>, DomainError> {
            self.check_should_fail()?;
            Ok(self.experiments.read().unwrap().values().cloned().collect())
        }
    }

    /// Mock arm state store with an error-injection switch
    #[derive(Debug, Default)]
    pub struct MockArmStateStore {
        stats: RwLock<HashMap<(String, String), ArmStatistics>>,
        should_fail: RwLock<bool>,
    }

    impl MockArmStateStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_error(self) -> Self {
            *self.should_fail.write().unwrap() = true;
            self
        }

        fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().unwrap() {
                Err(DomainError::storage("Mock store unavailable"))
            } else {
                Ok(())
            }
        }

        fn key(experiment_id: &ExperimentId, arm_id: &ArmId) -> (String, String) {
            (
                experiment_id.as_str().to_string(),
                arm_id.as_str().to_string(),
            )
        }
    }

    #[async_trait]
    impl ArmStateStore for MockArmStateStore {
        async fn snapshot(
            &self,
            experiment_id: &ExperimentId,
            arms: &[ArmId],
        ) -> Result<Vec<(ArmId, ArmStatistics)>, DomainError> {
            self.check_should_fail()?;
            let stats = self.stats.read().unwrap();

            Ok(arms
                .iter()
                .map(|arm| {
                    let entry = stats
                        .get(&Self::key(experiment_id, arm))
                        .copied()
                        .unwrap_or_default();
                    (arm.clone(), entry)
                })
                .collect())
        }

        async fn apply_reward(
            &self,
            experiment_id: &ExperimentId,
            arm_id: &ArmId,
            reward: f64,
        ) -> Result<ArmStatistics, DomainError> {
            self.check_should_fail()?;
            let mut stats = self.stats.write().unwrap();
            let entry = stats.entry(Self::key(experiment_id, arm_id)).or_default();
            *entry = entry.observe(reward)?;
            Ok(*entry)
        }

        async fn initialize_arms(
            &self,
            experiment_id: &ExperimentId,
            arms: &[ArmId],
        ) -> Result<(), DomainError> {
            self.check_should_fail()?;
            let mut stats = self.stats.write().unwrap();

            for arm in arms {
                stats.entry(Self::key(experiment_id, arm)).or_default();
            }

            Ok(())
        }

        async fn reset(&self, experiment_id: &ExperimentId) -> Result<(), DomainError> {
            self.check_should_fail()?;
            self.stats
                .write()
                .unwrap()
                .retain(|(exp, _), _| exp != experiment_id.as_str());
            Ok(())
        }
    }
}
