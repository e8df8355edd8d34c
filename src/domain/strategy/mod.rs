//! Bandit selection strategies
//!
//! Three algorithms behind one trait: Thompson Sampling, UCB1 and
//! Epsilon-Greedy. All randomness flows through the [`BanditRng`] seam so
//! selection is reproducible under a configured seed and strategies are
//! testable with scripted randomness.

mod config;
mod epsilon_greedy;
mod rng;
mod selection;
mod thompson;
mod ucb1;

// Re-export all public types
pub use config::{
    EpsilonGreedyParams, StrategyConfig, ThompsonParams, Ucb1Params, DEFAULT_EPSILON,
    DEFAULT_EXPLORATION_WEIGHT,
};
pub use epsilon_greedy::EpsilonGreedyStrategy;
pub use rng::{BanditRng, SeededRng};
pub use selection::{ArmStatsSnapshot, SelectionStrategy};
pub use thompson::ThompsonSamplingStrategy;
pub use ucb1::Ucb1Strategy;

#[cfg(test)]
pub use rng::script::ScriptedRng;
