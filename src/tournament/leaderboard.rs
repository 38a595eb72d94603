//! Leaderboard projection over tournament participations.

use std::sync::Arc;

use super::models::Participation;
use crate::db::repository::{ParticipationRepository, TournamentRepository};
use crate::errors::{EngineError, EngineResult, EntityKind};

/// Order participations by score descending; equal scores keep their
/// relative (insertion) order.
pub fn sort_standings(rows: &mut [Participation]) {
    // sort_by is stable, which is what carries the tie-break contract.
    rows.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Leaderboard projector
///
/// A pure read over the participation store; the result is finite and
/// recomputable at any time.
#[derive(Clone)]
pub struct LeaderboardProjector {
    tournaments: Arc<dyn TournamentRepository>,
    participations: Arc<dyn ParticipationRepository>,
}

impl LeaderboardProjector {
    /// Create a new leaderboard projector
    pub fn new(
        tournaments: Arc<dyn TournamentRepository>,
        participations: Arc<dyn ParticipationRepository>,
    ) -> Self {
        Self {
            tournaments,
            participations,
        }
    }

    /// Current standings for a tournament.
    ///
    /// # Errors
    ///
    /// * `EngineError::NotFound` - No such tournament
    pub async fn standings(&self, tournament_name: &str) -> EngineResult<Vec<Participation>> {
        let tournament = self
            .tournaments
            .find_by_name(tournament_name)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::Tournament,
                key: tournament_name.to_string(),
            })?;

        let mut rows = self
            .participations
            .list_by_tournament(tournament.public_id)
            .await?;
        sort_standings(&mut rows);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn participation(score: i32) -> Participation {
        Participation {
            public_id: Uuid::new_v4(),
            tournament_id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            joined_at: Utc::now(),
            score,
        }
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let first_fifty = participation(50);
        let ninety = participation(90);
        let second_fifty = participation(50);
        let mut rows = vec![
            first_fifty.clone(),
            ninety.clone(),
            second_fifty.clone(),
        ];

        sort_standings(&mut rows);

        assert_eq!(rows[0].public_id, ninety.public_id);
        assert_eq!(rows[1].public_id, first_fifty.public_id);
        assert_eq!(rows[2].public_id, second_fifty.public_id);
    }

    #[test]
    fn test_empty_standings_stay_empty() {
        let mut rows: Vec<Participation> = Vec::new();
        sort_standings(&mut rows);
        assert!(rows.is_empty());
    }
}
