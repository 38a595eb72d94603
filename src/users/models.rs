//! User data models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles supported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Player,
    Organizer,
}

impl UserRole {
    /// Storage token for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Player => "player",
            UserRole::Organizer => "organizer",
        }
    }

    /// Parse a storage token back into a role.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "player" => Some(UserRole::Player),
            "organizer" => Some(UserRole::Organizer),
            _ => None,
        }
    }

    /// Whether this role may enroll in tournaments as a player.
    pub fn can_compete(self) -> bool {
        matches!(self, UserRole::Player | UserRole::Admin)
    }

    /// Whether this role may organize tournaments.
    pub fn can_organize(self) -> bool {
        matches!(self, UserRole::Organizer | UserRole::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A platform account.
///
/// `public_id` is the stable identifier handed to callers; the storage
/// layer's own keys never leave the repositories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub public_id: Uuid,
    pub username: String,
    pub role: UserRole,
    /// Competitive ranking; never negative.
    pub ranking: i32,
}
