//! Selection strategy contract

use crate::domain::experiment::{ArmId, ArmStatistics};
use crate::domain::DomainError;

use super::rng::BanditRng;

/// Per-arm statistics snapshot, in arm insertion order
pub type ArmStatsSnapshot = [(ArmId, ArmStatistics)];

/// A bandit selection algorithm.
///
/// Implementations pick exactly one arm from the snapshot's key set and must
/// be cold-start safe: an arm with zero pulls is always eligible. All
/// randomness flows through the supplied [`BanditRng`], so a seeded RNG makes
/// selection reproducible for a given snapshot.
pub trait SelectionStrategy: Send + Sync {
    /// Canonical strategy name, as stored in configuration
    fn name(&self) -> &'static str;

    /// Select one arm from the snapshot.
    ///
    /// Fails with [`DomainError::EmptyArmSet`] when the snapshot is empty.
    fn select(
        &self,
        snapshot: &ArmStatsSnapshot,
        rng: &mut dyn BanditRng,
    ) -> Result<ArmId, DomainError>;
}
