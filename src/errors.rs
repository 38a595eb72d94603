//! Shared error taxonomy for the engine.
//!
//! Every precondition violation surfaces as a distinct, attributable variant;
//! nothing is retried internally and nothing is swallowed. Retry policy, if
//! any, belongs to the caller.

use thiserror::Error;
use uuid::Uuid;

use crate::users::UserRole;

/// Entity kinds named by [`EngineError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Game,
    Tournament,
    Participation,
    Match,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::User => "user",
            EntityKind::Game => "game",
            EntityKind::Tournament => "tournament",
            EntityKind::Participation => "participation",
            EntityKind::Match => "match",
        };
        f.write_str(name)
    }
}

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// The referenced entity does not exist.
    #[error("{kind} not found: {key}")]
    NotFound { kind: EntityKind, key: String },

    /// A uniqueness rule was violated (duplicate enrollment, duplicate
    /// game/platform pair, username taken, tournament name taken).
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// The tournament has no free slots.
    #[error("tournament {tournament_id} is full")]
    CapacityExceeded { tournament_id: Uuid },

    /// The user's role does not permit the operation.
    #[error("operation requires role {required}, but user has role {actual}")]
    InvalidRole {
        required: &'static str,
        actual: UserRole,
    },

    /// An entity referenced itself where two distinct parties are required.
    #[error("{reason}")]
    SelfReferential { reason: String },

    /// Storage-level failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
