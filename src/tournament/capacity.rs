//! Capacity guard enforcing the tournament occupancy invariant.

use std::sync::Arc;

use uuid::Uuid;

use crate::db::repository::TournamentRepository;
use crate::errors::{EngineError, EngineResult};

/// Guards a tournament's occupancy counter.
///
/// Both operations are single conditional read-modify-writes scoped to one
/// tournament row, so concurrent calls against the same tournament
/// linearize: occupancy never exceeds capacity and never goes negative.
#[derive(Clone)]
pub struct CapacityGuard {
    tournaments: Arc<dyn TournamentRepository>,
}

impl CapacityGuard {
    /// Create a new capacity guard
    pub fn new(tournaments: Arc<dyn TournamentRepository>) -> Self {
        Self { tournaments }
    }

    /// Claim one slot.
    ///
    /// # Errors
    ///
    /// * `EngineError::CapacityExceeded` - The tournament is full
    /// * `EngineError::NotFound` - The tournament does not exist
    pub async fn try_reserve(&self, tournament_id: Uuid) -> EngineResult<()> {
        if self.tournaments.try_reserve_slot(tournament_id).await? {
            log::debug!("reserved slot in tournament {tournament_id}");
            Ok(())
        } else {
            Err(EngineError::CapacityExceeded { tournament_id })
        }
    }

    /// Release one slot. A no-op when occupancy is already zero.
    pub async fn release(&self, tournament_id: Uuid) -> EngineResult<()> {
        self.tournaments.release_slot(tournament_id).await?;
        log::debug!("released slot in tournament {tournament_id}");
        Ok(())
    }
}
