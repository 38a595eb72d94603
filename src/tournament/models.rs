//! Tournament and participation data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tournament.
///
/// Invariant: `0 <= current_players <= max_players` after every mutation.
/// Occupancy moves only through the capacity guard, one slot at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub public_id: Uuid,
    /// Unique tournament name.
    pub name: String,
    /// Maximum occupancy.
    pub max_players: i32,
    /// Current occupancy.
    pub current_players: i32,
    /// Game played in this tournament.
    pub game_id: Uuid,
    /// Organizing user; must hold the organizer or admin role.
    pub organizer_id: Uuid,
}

/// A player's membership in a tournament.
///
/// The (tournament, player) pair is unique; `joined_at` is set once at
/// enrollment and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participation {
    pub public_id: Uuid,
    pub tournament_id: Uuid,
    pub player_id: Uuid,
    pub joined_at: DateTime<Utc>,
    pub score: i32,
}
