//! Match data models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Recorded outcome of a match.
///
/// `Pending` is the initial state. Any state may transition to any other;
/// results stay editable after being decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Player1Win,
    Player2Win,
    Draw,
    Pending,
}

impl MatchResult {
    /// Storage token for this result.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchResult::Player1Win => "player1_win",
            MatchResult::Player2Win => "player2_win",
            MatchResult::Draw => "draw",
            MatchResult::Pending => "pending",
        }
    }

    /// Parse a storage token back into a result.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "player1_win" => Some(MatchResult::Player1Win),
            "player2_win" => Some(MatchResult::Player2Win),
            "draw" => Some(MatchResult::Draw),
            "pending" => Some(MatchResult::Pending),
            _ => None,
        }
    }
}

impl Default for MatchResult {
    fn default() -> Self {
        MatchResult::Pending
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A match between two enrolled players.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub public_id: Uuid,
    pub tournament_id: Uuid,
    /// Round number, starting at 1.
    pub round: i32,
    pub player1_id: Uuid,
    pub player2_id: Uuid,
    pub result: MatchResult,
}
