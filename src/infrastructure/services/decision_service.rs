//! Decision engine service
//!
//! Single entry point for the request-handling layer: experiment lifecycle,
//! arm selection and reward recording. Every operation is read-through —
//! experiment metadata and statistics are fetched from the stores per call,
//! never cached in the engine, so a decision always reflects the latest
//! hot-swap and the latest rewards.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::experiment::{
    validate_reward, ArmId, ArmStateStore, ArmStatistics, Experiment, ExperimentId,
    ExperimentStore,
};
use crate::domain::strategy::{SeededRng, StrategyConfig};
use crate::domain::DomainError;

// ============================================================================
// Request / Response Types
// ============================================================================

/// Request to create a new experiment
#[derive(Debug, Clone)]
pub struct CreateExperimentRequest {
    pub id: String,
    pub arm_ids: Vec<String>,
    /// Strategy name (e.g. "thompson", "UCB1", "epsilon-greedy"); the
    /// engine's default strategy is used when omitted
    pub strategy: Option<String>,
    /// Strategy-specific parameters as a JSON object
    pub strategy_params: Value,
}

impl CreateExperimentRequest {
    /// Create a request using the engine's default strategy
    pub fn new(id: impl Into<String>, arm_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            arm_ids,
            strategy: None,
            strategy_params: Value::Null,
        }
    }

    /// Set the strategy name
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Set the strategy parameters
    pub fn with_params(mut self, params: Value) -> Self {
        self.strategy_params = params;
        self
    }
}

/// Outcome of a decision request
#[derive(Debug, Clone, Serialize)]
pub struct Decision {
    pub experiment_id: String,
    pub arm_id: String,
    pub strategy: String,
    /// Full arm set at decision time, for observability
    pub arms: Vec<String>,
}

/// Outcome of a recorded reward
#[derive(Debug, Clone, Serialize)]
pub struct RewardReceipt {
    pub experiment_id: String,
    pub arm_id: String,
    pub strategy: String,
    /// Arm statistics after the reward was applied
    pub stats: ArmStatistics,
}

// ============================================================================
// DecisionEngine
// ============================================================================

/// Orchestrates experiment lookup, strategy invocation and reward updates.
///
/// Decisions do not record a pull: pulls increment only when a reward is
/// reported. Callers needing a deadline can wrap any call in
/// `tokio::time::timeout`; the stores guarantee a dropped call leaves no
/// partial write behind.
#[derive(Debug)]
pub struct DecisionEngine<E: ExperimentStore, S: ArmStateStore> {
    experiments: Arc<E>,
    arm_states: Arc<S>,
    default_strategy: StrategyConfig,
}

impl<E: ExperimentStore, S: ArmStateStore> DecisionEngine<E, S> {
    /// Create an engine over the given stores, defaulting to Thompson
    /// Sampling for experiments created without a strategy
    pub fn new(experiments: Arc<E>, arm_states: Arc<S>) -> Self {
        Self {
            experiments,
            arm_states,
            default_strategy: StrategyConfig::default(),
        }
    }

    /// Set the strategy used when a creation request names none
    pub fn with_default_strategy(mut self, strategy: StrategyConfig) -> Self {
        self.default_strategy = strategy;
        self
    }

    // ========================================================================
    // Experiment lifecycle
    // ========================================================================

    /// Create a new experiment.
    ///
    /// New arms start with zero statistics. Losing the create race surfaces
    /// as a conflict; the winning caller's experiment is left untouched.
    pub async fn create_experiment(
        &self,
        request: CreateExperimentRequest,
    ) -> Result<Experiment, DomainError> {
        debug!(experiment_id = %request.id, "Creating experiment");

        let id = self.parse_id(&request.id)?;
        let arms = self.parse_arms(&request.arm_ids)?;

        let strategy = match &request.strategy {
            Some(name) => StrategyConfig::from_name_and_params(name, &request.strategy_params)?,
            None => self.default_strategy,
        };

        let experiment = Experiment::new(id, arms, strategy)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if !self.experiments.create_if_absent(experiment.clone()).await? {
            return Err(DomainError::duplicate_experiment(experiment.id()));
        }

        self.arm_states
            .initialize_arms(experiment.id(), experiment.arms())
            .await?;

        info!(
            experiment_id = %experiment.id(),
            strategy = experiment.strategy().name(),
            arms = experiment.arms().len(),
            "Experiment created"
        );

        Ok(experiment)
    }

    /// Get an experiment by ID
    pub async fn get_experiment(&self, id: &str) -> Result<Experiment, DomainError> {
        let experiment_id = self.parse_id(id)?;

        self.experiments
            .get(&experiment_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Experiment '{id}' was not found")))
    }

    /// Append new arms to an experiment.
    ///
    /// New arms start at zero statistics; existing arms keep theirs.
    pub async fn add_arms(
        &self,
        id: &str,
        new_arm_ids: &[String],
    ) -> Result<Experiment, DomainError> {
        debug!(experiment_id = %id, count = new_arm_ids.len(), "Adding arms");

        if new_arm_ids.is_empty() {
            return Err(DomainError::validation("At least one arm ID is required"));
        }

        let experiment_id = self.parse_id(id)?;
        let arms = self.parse_arms(new_arm_ids)?;

        let updated = self.experiments.append_arms(&experiment_id, &arms).await?;
        self.arm_states
            .initialize_arms(&experiment_id, &arms)
            .await?;

        info!(experiment_id = %id, total_arms = updated.arms().len(), "Arms added");
        Ok(updated)
    }

    /// Replace an experiment's strategy in place (hot-swap).
    ///
    /// Accumulated statistics are not touched: the next decision runs the
    /// new strategy over the same per-arm counters.
    pub async fn set_strategy(
        &self,
        id: &str,
        strategy: &str,
        params: &Value,
    ) -> Result<Experiment, DomainError> {
        debug!(experiment_id = %id, strategy, "Updating strategy");

        let experiment_id = self.parse_id(id)?;
        let config = StrategyConfig::from_name_and_params(strategy, params)?;

        let updated = self
            .experiments
            .update_strategy(&experiment_id, config)
            .await?;

        info!(experiment_id = %id, strategy = config.name(), "Strategy updated");
        Ok(updated)
    }

    /// Delete an experiment and all of its recorded statistics
    pub async fn delete_experiment(&self, id: &str) -> Result<bool, DomainError> {
        let experiment_id = self.parse_id(id)?;
        let deleted = self.experiments.delete(&experiment_id).await?;

        if deleted {
            self.arm_states.reset(&experiment_id).await?;
            info!(experiment_id = %id, "Experiment deleted");
        }

        Ok(deleted)
    }

    /// List all experiments
    pub async fn list_experiments(&self) -> Result<Vec<Experiment>, DomainError> {
        self.experiments.list().await
    }

    // ========================================================================
    // Decisions and rewards
    // ========================================================================

    /// Select the arm to present for one request.
    ///
    /// Pure read: fetches the experiment and a statistics snapshot, runs the
    /// configured strategy and returns the chosen arm plus metadata.
    pub async fn decide(&self, id: &str) -> Result<Decision, DomainError> {
        let experiment = self.get_experiment(id).await?;
        let snapshot = self
            .arm_states
            .snapshot(experiment.id(), experiment.arms())
            .await?;

        let config = experiment.strategy();
        let strategy = config.build();
        let mut rng = SeededRng::from_optional_seed(config.seed());

        let arm_id = strategy.select(&snapshot, &mut rng)?;

        debug!(
            experiment_id = %id,
            arm_id = %arm_id,
            strategy = config.name(),
            "Decision made"
        );

        Ok(Decision {
            experiment_id: experiment.id().as_str().to_string(),
            arm_id: arm_id.as_str().to_string(),
            strategy: config.name().to_string(),
            arms: experiment
                .arms()
                .iter()
                .map(|a| a.as_str().to_string())
                .collect(),
        })
    }

    /// Record an observed reward for one arm.
    ///
    /// The arm must belong to the experiment; the update is linearizable per
    /// `(experiment, arm)` key and is never retried internally.
    pub async fn record_reward(
        &self,
        id: &str,
        arm: &str,
        reward: f64,
    ) -> Result<RewardReceipt, DomainError> {
        validate_reward(reward)?;

        let experiment = self.get_experiment(id).await?;
        let arm_id = ArmId::new(arm).map_err(|e| DomainError::validation(e.to_string()))?;

        if !experiment.contains_arm(&arm_id) {
            return Err(DomainError::unknown_arm(id, arm));
        }

        let stats = self
            .arm_states
            .apply_reward(experiment.id(), &arm_id, reward)
            .await?;

        debug!(
            experiment_id = %id,
            arm_id = %arm_id,
            reward,
            pulls = stats.pulls,
            "Reward recorded"
        );

        Ok(RewardReceipt {
            experiment_id: experiment.id().as_str().to_string(),
            arm_id: arm_id.as_str().to_string(),
            strategy: experiment.strategy().name().to_string(),
            stats,
        })
    }

    /// Run [`DecisionEngine::decide`] under a caller-supplied deadline.
    ///
    /// On timeout the in-flight call is dropped without side effects and a
    /// storage error is returned; nothing is retried.
    pub async fn decide_with_timeout(
        &self,
        id: &str,
        deadline: Duration,
    ) -> Result<Decision, DomainError> {
        tokio::time::timeout(deadline, self.decide(id))
            .await
            .map_err(|_| {
                DomainError::storage(format!(
                    "Decision for experiment '{id}' timed out after {deadline:?}"
                ))
            })?
    }

    /// Run [`DecisionEngine::record_reward`] under a caller-supplied deadline.
    ///
    /// Reward values carry no deduplication key, so a timed-out call is
    /// surfaced as an error for the caller to handle, never replayed.
    pub async fn record_reward_with_timeout(
        &self,
        id: &str,
        arm: &str,
        reward: f64,
        deadline: Duration,
    ) -> Result<RewardReceipt, DomainError> {
        tokio::time::timeout(deadline, self.record_reward(id, arm, reward))
            .await
            .map_err(|_| {
                DomainError::storage(format!(
                    "Reward for experiment '{id}' arm '{arm}' timed out after {deadline:?}"
                ))
            })?
    }

    /// Per-arm statistics snapshot for observability
    pub async fn arm_statistics(
        &self,
        id: &str,
    ) -> Result<Vec<(ArmId, ArmStatistics)>, DomainError> {
        let experiment = self.get_experiment(id).await?;
        self.arm_states
            .snapshot(experiment.id(), experiment.arms())
            .await
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    fn parse_id(&self, id: &str) -> Result<ExperimentId, DomainError> {
        ExperimentId::new(id).map_err(|e| DomainError::validation(e.to_string()))
    }

    fn parse_arms(&self, arm_ids: &[String]) -> Result<Vec<ArmId>, DomainError> {
        arm_ids
            .iter()
            .map(|id| ArmId::new(id).map_err(|e| DomainError::validation(e.to_string())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::experiment::{MockArmStateStore, MockExperimentStore};
    use crate::infrastructure::state::{InMemoryArmStateStore, InMemoryExperimentStore};
    use futures::future::join_all;
    use serde_json::json;

    type TestEngine = DecisionEngine<InMemoryExperimentStore, InMemoryArmStateStore>;

    fn create_engine() -> TestEngine {
        DecisionEngine::new(
            Arc::new(InMemoryExperimentStore::new()),
            Arc::new(InMemoryArmStateStore::new()),
        )
    }

    fn request(id: &str, arms: &[&str]) -> CreateExperimentRequest {
        CreateExperimentRequest::new(id, arms.iter().map(|a| a.to_string()).collect())
    }

    mod lifecycle {
        use super::*;

        #[tokio::test]
        async fn test_create_and_get() {
            let engine = create_engine();

            let created = engine
                .create_experiment(request("exp-1", &["a", "b"]))
                .await
                .unwrap();
            assert_eq!(created.strategy().name(), "thompson");

            let fetched = engine.get_experiment("exp-1").await.unwrap();
            assert_eq!(fetched.arms().len(), 2);
        }

        #[tokio::test]
        async fn test_create_with_explicit_strategy() {
            let engine = create_engine();

            let created = engine
                .create_experiment(
                    request("exp-1", &["a", "b"])
                        .with_strategy("EPSILON-GREEDY")
                        .with_params(json!({"epsilon": 0.25})),
                )
                .await
                .unwrap();

            assert_eq!(created.strategy().name(), "epsilon_greedy");
        }

        #[tokio::test]
        async fn test_create_duplicate_is_conflict() {
            let engine = create_engine();

            engine
                .create_experiment(request("exp-1", &["a", "b"]))
                .await
                .unwrap();
            let result = engine.create_experiment(request("exp-1", &["a", "b"])).await;

            assert!(matches!(result, Err(DomainError::Conflict { .. })));
        }

        #[tokio::test]
        async fn test_concurrent_create_has_one_winner_and_keeps_stats() {
            let engine = Arc::new(create_engine());

            // Seed the experiment and some statistics
            engine
                .create_experiment(request("raced", &["a", "b"]))
                .await
                .unwrap();
            engine.record_reward("raced", "a", 1.0).await.unwrap();

            // A burst of duplicate creations all lose without resetting state
            let tasks: Vec<_> = (0..8)
                .map(|_| {
                    let engine = engine.clone();
                    tokio::spawn(
                        async move { engine.create_experiment(request("raced", &["a", "b"])).await },
                    )
                })
                .collect();

            for result in join_all(tasks).await {
                assert!(matches!(result.unwrap(), Err(DomainError::Conflict { .. })));
            }

            let stats = engine.arm_statistics("raced").await.unwrap();
            assert_eq!(stats[0].1.pulls, 1);
        }

        #[tokio::test]
        async fn test_create_requires_two_arms() {
            let engine = create_engine();
            let result = engine.create_experiment(request("exp-1", &["only"])).await;
            assert!(matches!(result, Err(DomainError::Validation { .. })));
        }

        #[tokio::test]
        async fn test_create_rejects_unknown_strategy() {
            let engine = create_engine();
            let result = engine
                .create_experiment(request("exp-1", &["a", "b"]).with_strategy("softmax"))
                .await;
            assert!(matches!(result, Err(DomainError::Validation { .. })));
        }

        #[tokio::test]
        async fn test_get_unknown_experiment_is_not_found() {
            let engine = create_engine();
            let result = engine.get_experiment("missing").await;
            assert!(matches!(result, Err(DomainError::NotFound { .. })));
        }

        #[tokio::test]
        async fn test_default_strategy_is_materialized_at_creation() {
            let experiments = Arc::new(InMemoryExperimentStore::new());
            let arm_states = Arc::new(InMemoryArmStateStore::new());
            let engine = DecisionEngine::new(experiments, arm_states)
                .with_default_strategy(StrategyConfig::from_name("ucb1").unwrap());

            let created = engine
                .create_experiment(request("exp-1", &["a", "b"]))
                .await
                .unwrap();
            assert_eq!(created.strategy().name(), "ucb1");
        }

        #[tokio::test]
        async fn test_delete_removes_metadata_and_stats() {
            let engine = create_engine();

            engine
                .create_experiment(request("exp-1", &["a", "b"]))
                .await
                .unwrap();
            engine.record_reward("exp-1", "a", 1.0).await.unwrap();

            assert!(engine.delete_experiment("exp-1").await.unwrap());
            assert!(matches!(
                engine.get_experiment("exp-1").await,
                Err(DomainError::NotFound { .. })
            ));

            // Re-creating starts from clean statistics
            engine
                .create_experiment(request("exp-1", &["a", "b"]))
                .await
                .unwrap();
            let stats = engine.arm_statistics("exp-1").await.unwrap();
            assert!(stats.iter().all(|(_, s)| s.is_untried()));
        }

        #[tokio::test]
        async fn test_store_failure_propagates() {
            let engine = DecisionEngine::new(
                Arc::new(MockExperimentStore::new().with_error()),
                Arc::new(MockArmStateStore::new()),
            );

            let result = engine.get_experiment("exp-1").await;
            assert!(matches!(result, Err(DomainError::Storage { .. })));
        }
    }

    mod arms {
        use super::*;

        #[tokio::test]
        async fn test_add_arms_preserves_existing_stats() {
            let engine = create_engine();

            engine
                .create_experiment(request("exp-1", &["a", "b"]))
                .await
                .unwrap();
            engine.record_reward("exp-1", "a", 1.0).await.unwrap();
            engine.record_reward("exp-1", "a", 1.0).await.unwrap();

            let updated = engine
                .add_arms("exp-1", &["c".to_string(), "d".to_string()])
                .await
                .unwrap();
            assert_eq!(updated.arms().len(), 4);

            let stats = engine.arm_statistics("exp-1").await.unwrap();
            assert_eq!(stats[0].1.pulls, 2);
            assert!(stats[2].1.is_untried());
            assert!(stats[3].1.is_untried());
        }

        #[tokio::test]
        async fn test_add_duplicate_arm_is_conflict() {
            let engine = create_engine();

            engine
                .create_experiment(request("exp-1", &["a", "b"]))
                .await
                .unwrap();
            let result = engine.add_arms("exp-1", &["a".to_string()]).await;

            assert!(matches!(result, Err(DomainError::Conflict { .. })));
        }

        #[tokio::test]
        async fn test_add_arms_to_unknown_experiment() {
            let engine = create_engine();
            let result = engine.add_arms("missing", &["x".to_string()]).await;
            assert!(matches!(result, Err(DomainError::NotFound { .. })));
        }

        #[tokio::test]
        async fn test_add_arms_requires_at_least_one() {
            let engine = create_engine();
            let result = engine.add_arms("exp-1", &[]).await;
            assert!(matches!(result, Err(DomainError::Validation { .. })));
        }
    }

    mod strategy_swap {
        use super::*;

        #[tokio::test]
        async fn test_hot_swap_preserves_statistics() {
            let engine = create_engine();

            engine
                .create_experiment(request("exp-1", &["a", "b"]))
                .await
                .unwrap();

            for _ in 0..5 {
                engine.record_reward("exp-1", "a", 1.0).await.unwrap();
            }

            let updated = engine
                .set_strategy("exp-1", "ucb1", &Value::Null)
                .await
                .unwrap();
            assert_eq!(updated.strategy().name(), "ucb1");

            let stats = engine.arm_statistics("exp-1").await.unwrap();
            assert_eq!(stats[0].1.pulls, 5);
            assert_eq!(stats[0].1.reward_sum, 5.0);

            // A decision straight after the swap runs UCB1 over the old
            // counters: arm b is still untried, so it is selected first
            let decision = engine.decide("exp-1").await.unwrap();
            assert_eq!(decision.strategy, "ucb1");
            assert_eq!(decision.arm_id, "b");
        }

        #[tokio::test]
        async fn test_set_strategy_validates_params() {
            let engine = create_engine();

            engine
                .create_experiment(request("exp-1", &["a", "b"]))
                .await
                .unwrap();
            let result = engine
                .set_strategy("exp-1", "epsilon_greedy", &json!({"epsilon": 7.0}))
                .await;

            assert!(matches!(result, Err(DomainError::Validation { .. })));
        }

        #[tokio::test]
        async fn test_set_strategy_unknown_experiment() {
            let engine = create_engine();
            let result = engine.set_strategy("missing", "ucb1", &Value::Null).await;
            assert!(matches!(result, Err(DomainError::NotFound { .. })));
        }
    }

    mod decisions {
        use super::*;
        use std::collections::HashSet;

        #[tokio::test]
        async fn test_decide_returns_arm_from_the_experiment() {
            let engine = create_engine();

            engine
                .create_experiment(request("exp-1", &["a", "b", "c"]))
                .await
                .unwrap();

            for _ in 0..50 {
                let decision = engine.decide("exp-1").await.unwrap();
                assert!(["a", "b", "c"].contains(&decision.arm_id.as_str()));
                assert_eq!(decision.arms, vec!["a", "b", "c"]);
            }
        }

        #[tokio::test]
        async fn test_decide_unknown_experiment() {
            let engine = create_engine();
            let result = engine.decide("missing").await;
            assert!(matches!(result, Err(DomainError::NotFound { .. })));
        }

        #[tokio::test]
        async fn test_decide_does_not_record_a_pull() {
            let engine = create_engine();

            engine
                .create_experiment(request("exp-1", &["a", "b"]))
                .await
                .unwrap();

            for _ in 0..20 {
                engine.decide("exp-1").await.unwrap();
            }

            let stats = engine.arm_statistics("exp-1").await.unwrap();
            assert!(stats.iter().all(|(_, s)| s.is_untried()));
        }

        #[tokio::test]
        async fn test_seeded_decisions_are_reproducible() {
            let engine = create_engine();

            engine
                .create_experiment(
                    request("exp-1", &["a", "b"])
                        .with_strategy("thompson")
                        .with_params(json!({"seed": 1234})),
                )
                .await
                .unwrap();
            engine.record_reward("exp-1", "a", 1.0).await.unwrap();
            engine.record_reward("exp-1", "b", 0.0).await.unwrap();

            let first = engine.decide("exp-1").await.unwrap();

            for _ in 0..10 {
                let next = engine.decide("exp-1").await.unwrap();
                assert_eq!(next.arm_id, first.arm_id);
            }
        }

        #[tokio::test]
        async fn test_cold_start_explores_then_converges() {
            let engine = create_engine();

            engine
                .create_experiment(request("exp-1", &["a", "b"]).with_strategy("thompson"))
                .await
                .unwrap();

            // Cold start: 100 decisions before any reward touch both arms
            let mut selected = HashSet::new();
            for _ in 0..100 {
                selected.insert(engine.decide("exp-1").await.unwrap().arm_id);
            }
            assert_eq!(selected.len(), 2);

            // 50 successes for a, 50 failures for b
            for _ in 0..50 {
                engine.record_reward("exp-1", "a", 1.0).await.unwrap();
                engine.record_reward("exp-1", "b", 0.0).await.unwrap();
            }

            // The posterior now heavily favors a
            let mut wins = 0;
            for _ in 0..200 {
                if engine.decide("exp-1").await.unwrap().arm_id == "a" {
                    wins += 1;
                }
            }

            assert!(wins > 160, "arm 'a' won only {wins}/200 decisions");
        }
    }

    mod rewards {
        use super::*;

        #[tokio::test]
        async fn test_record_reward_returns_updated_stats() {
            let engine = create_engine();

            engine
                .create_experiment(request("exp-1", &["a", "b"]))
                .await
                .unwrap();

            let receipt = engine.record_reward("exp-1", "a", 0.5).await.unwrap();
            assert_eq!(receipt.stats.pulls, 1);
            assert_eq!(receipt.stats.reward_sum, 0.5);
            assert_eq!(receipt.strategy, "thompson");
        }

        #[tokio::test]
        async fn test_reward_for_unknown_arm() {
            let engine = create_engine();

            engine
                .create_experiment(request("exp-1", &["a", "b"]))
                .await
                .unwrap();
            let result = engine.record_reward("exp-1", "z", 1.0).await;

            assert!(matches!(result, Err(DomainError::UnknownArm { .. })));
        }

        #[tokio::test]
        async fn test_reward_for_unknown_experiment() {
            let engine = create_engine();
            let result = engine.record_reward("missing", "a", 1.0).await;
            assert!(matches!(result, Err(DomainError::NotFound { .. })));
        }

        #[tokio::test]
        async fn test_invalid_reward_rejected_before_lookup() {
            let engine = create_engine();

            let result = engine.record_reward("missing", "a", 1.5).await;
            assert!(matches!(result, Err(DomainError::InvalidReward { .. })));

            let result = engine.record_reward("missing", "a", f64::NAN).await;
            assert!(matches!(result, Err(DomainError::InvalidReward { .. })));
        }

        #[tokio::test]
        async fn test_timeout_wrappers_complete_against_healthy_stores() {
            let engine = create_engine();

            engine
                .create_experiment(request("exp-1", &["a", "b"]))
                .await
                .unwrap();

            let decision = engine
                .decide_with_timeout("exp-1", Duration::from_secs(1))
                .await
                .unwrap();
            assert!(["a", "b"].contains(&decision.arm_id.as_str()));

            let receipt = engine
                .record_reward_with_timeout("exp-1", "a", 1.0, Duration::from_secs(1))
                .await
                .unwrap();
            assert_eq!(receipt.stats.pulls, 1);
        }

        #[tokio::test]
        async fn test_parallel_rewards_through_engine_lose_no_updates() {
            let engine = Arc::new(create_engine());

            engine
                .create_experiment(request("exp-1", &["a", "b"]))
                .await
                .unwrap();

            let writers: u64 = 50;
            let tasks: Vec<_> = (0..writers)
                .map(|_| {
                    let engine = engine.clone();
                    tokio::spawn(async move { engine.record_reward("exp-1", "a", 1.0).await })
                })
                .collect();

            for result in join_all(tasks).await {
                result.unwrap().unwrap();
            }

            let stats = engine.arm_statistics("exp-1").await.unwrap();
            assert_eq!(stats[0].1.pulls, writers);
            assert_eq!(stats[0].1.reward_sum, writers as f64);
        }
    }
}
