//! Property tests for the ranking policy and the standings sort.

use chrono::Utc;
use proptest::prelude::*;
use uuid::Uuid;

use tournament_engine::matches::{
    LOSS_PENALTY, MatchResult, WIN_POINTS, ranking_adjustments,
};
use tournament_engine::tournament::{Participation, sort_standings};

fn match_result() -> impl Strategy<Value = MatchResult> {
    prop_oneof![
        Just(MatchResult::Pending),
        Just(MatchResult::Player1Win),
        Just(MatchResult::Player2Win),
        Just(MatchResult::Draw),
    ]
}

fn participations(scores: Vec<i32>) -> Vec<Participation> {
    let tournament_id = Uuid::new_v4();
    scores
        .into_iter()
        .map(|score| Participation {
            public_id: Uuid::new_v4(),
            tournament_id,
            player_id: Uuid::new_v4(),
            joined_at: Utc::now(),
            score,
        })
        .collect()
}

proptest! {
    #[test]
    fn adjustments_touch_both_players_or_neither(result in match_result()) {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let adjustments = ranking_adjustments(result, p1, p2);

        match result {
            MatchResult::Pending | MatchResult::Draw => prop_assert!(adjustments.is_empty()),
            MatchResult::Player1Win | MatchResult::Player2Win => {
                prop_assert_eq!(adjustments.len(), 2);
                let users: Vec<Uuid> = adjustments.iter().map(|(u, _)| *u).collect();
                prop_assert!(users.contains(&p1));
                prop_assert!(users.contains(&p2));
            }
        }
    }

    #[test]
    fn decided_results_reward_winner_and_penalize_loser(result in match_result()) {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let adjustments = ranking_adjustments(result, p1, p2);

        let winner = match result {
            MatchResult::Player1Win => p1,
            MatchResult::Player2Win => p2,
            _ => return Ok(()),
        };
        for (user, delta) in adjustments {
            if user == winner {
                prop_assert_eq!(delta, WIN_POINTS);
            } else {
                prop_assert_eq!(delta, -LOSS_PENALTY);
            }
        }
    }

    #[test]
    fn sorted_standings_are_descending(scores in prop::collection::vec(-1000i32..1000, 0..50)) {
        let mut rows = participations(scores);
        sort_standings(&mut rows);

        for pair in rows.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn sorting_preserves_the_multiset_of_entries(scores in prop::collection::vec(-1000i32..1000, 0..50)) {
        let rows = participations(scores);
        let mut ids: Vec<Uuid> = rows.iter().map(|p| p.public_id).collect();
        ids.sort();

        let mut sorted = rows;
        sort_standings(&mut sorted);
        let mut sorted_ids: Vec<Uuid> = sorted.iter().map(|p| p.public_id).collect();
        sorted_ids.sort();

        prop_assert_eq!(ids, sorted_ids);
    }

    #[test]
    fn equal_scores_keep_their_original_order(scores in prop::collection::vec(-10i32..10, 0..50)) {
        let rows = participations(scores);
        let original: Vec<(Uuid, i32)> = rows.iter().map(|p| (p.public_id, p.score)).collect();

        let mut sorted = rows;
        sort_standings(&mut sorted);

        for (a, b) in sorted.iter().zip(sorted.iter().skip(1)) {
            if a.score == b.score {
                let pos_a = original.iter().position(|(id, _)| *id == a.public_id);
                let pos_b = original.iter().position(|(id, _)| *id == b.public_id);
                prop_assert!(pos_a < pos_b);
            }
        }
    }
}
