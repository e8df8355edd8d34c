//! Bandit Engine
//!
//! A multi-armed bandit decision engine with support for:
//! - Thompson Sampling, UCB1 and Epsilon-Greedy selection strategies
//! - Mid-flight strategy hot-swap without resetting statistics
//! - Arm addition without disturbing accumulated statistics
//! - Linearizable per-arm reward updates under concurrent traffic
//!
//! The request-handling layer above (HTTP routing, encoding) and the
//! persistence technology below are both pluggable: any store satisfying the
//! [`domain::experiment::ExperimentStore`] and
//! [`domain::experiment::ArmStateStore`] contracts works, and in-memory
//! implementations ship in [`infrastructure::state`].

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod sim;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

pub use domain::{
    ArmId, ArmStatistics, BanditRng, DomainError, Experiment, ExperimentId, SeededRng,
    SelectionStrategy, StrategyConfig,
};
pub use infrastructure::services::{
    CreateExperimentRequest, Decision, DecisionEngine, RewardReceipt,
};
pub use infrastructure::state::{InMemoryArmStateStore, InMemoryExperimentStore};

/// A decision engine wired to the in-memory stores
pub type InMemoryDecisionEngine = DecisionEngine<InMemoryExperimentStore, InMemoryArmStateStore>;

/// Create a decision engine backed by in-memory stores, using the configured
/// default strategy
pub fn create_engine(config: &AppConfig) -> anyhow::Result<InMemoryDecisionEngine> {
    let default_strategy = StrategyConfig::from_name(&config.engine.default_strategy)
        .map_err(|e| anyhow::anyhow!("Invalid default strategy: {e}"))?;

    info!(
        default_strategy = default_strategy.name(),
        "Creating decision engine with in-memory stores"
    );

    let experiments = Arc::new(InMemoryExperimentStore::new());
    let arm_states = Arc::new(InMemoryArmStateStore::new());

    Ok(DecisionEngine::new(experiments, arm_states).with_default_strategy(default_strategy))
}
