//! Ranking policy applied on match outcome transitions.
//!
//! The policy is a pure function from a recorded outcome to a list of
//! per-user ranking deltas. The repository clamps stored rankings at zero,
//! so a loss can never drive a ranking negative.

use uuid::Uuid;

use super::models::MatchResult;

/// Points a winner gains.
pub const WIN_POINTS: i32 = 10;

/// Points a loser forfeits (floored at a ranking of zero).
pub const LOSS_PENALTY: i32 = 5;

/// Ranking deltas for a recorded outcome, winner first.
///
/// Pending and drawn matches adjust nobody.
pub fn ranking_adjustments(
    result: MatchResult,
    player1: Uuid,
    player2: Uuid,
) -> Vec<(Uuid, i32)> {
    match result {
        MatchResult::Player1Win => vec![(player1, WIN_POINTS), (player2, -LOSS_PENALTY)],
        MatchResult::Player2Win => vec![(player2, WIN_POINTS), (player1, -LOSS_PENALTY)],
        MatchResult::Draw | MatchResult::Pending => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player1_win_rewards_player1_first() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();

        let adjustments = ranking_adjustments(MatchResult::Player1Win, p1, p2);
        assert_eq!(adjustments, vec![(p1, WIN_POINTS), (p2, -LOSS_PENALTY)]);
    }

    #[test]
    fn test_player2_win_is_symmetric() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();

        let adjustments = ranking_adjustments(MatchResult::Player2Win, p1, p2);
        assert_eq!(adjustments, vec![(p2, WIN_POINTS), (p1, -LOSS_PENALTY)]);
    }

    #[test]
    fn test_draw_and_pending_adjust_nobody() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();

        assert!(ranking_adjustments(MatchResult::Draw, p1, p2).is_empty());
        assert!(ranking_adjustments(MatchResult::Pending, p1, p2).is_empty());
    }
}
