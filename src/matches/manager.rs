//! Match manager for creating matches and recording outcomes.

use std::sync::Arc;

use uuid::Uuid;

use super::models::{Match, MatchResult};
use super::ranking::ranking_adjustments;
use crate::db::repository::{
    MatchRepository, ParticipationRepository, TournamentRepository, UserRepository,
};
use crate::errors::{EngineError, EngineResult, EntityKind};

/// Match manager
#[derive(Clone)]
pub struct MatchManager {
    matches: Arc<dyn MatchRepository>,
    tournaments: Arc<dyn TournamentRepository>,
    users: Arc<dyn UserRepository>,
    participations: Arc<dyn ParticipationRepository>,
}

impl MatchManager {
    /// Create a new match manager
    pub fn new(
        matches: Arc<dyn MatchRepository>,
        tournaments: Arc<dyn TournamentRepository>,
        users: Arc<dyn UserRepository>,
        participations: Arc<dyn ParticipationRepository>,
    ) -> Self {
        Self {
            matches,
            tournaments,
            users,
            participations,
        }
    }

    /// Create a match between two players enrolled in a tournament.
    ///
    /// The result defaults to [`MatchResult::Pending`]. Creating a match
    /// with an explicit decided result records that result but applies no
    /// ranking adjustment; adjustments happen on result *changes* only.
    ///
    /// # Errors
    ///
    /// * `EngineError::NotFound` - Tournament or either player missing, or a
    ///   player has no participation in the tournament (one error per player)
    /// * `EngineError::SelfReferential` - Both player slots name one user
    pub async fn create_match(
        &self,
        tournament_name: &str,
        round: i32,
        player1_username: &str,
        player2_username: &str,
        result: Option<MatchResult>,
    ) -> EngineResult<Match> {
        let tournament = self
            .tournaments
            .find_by_name(tournament_name)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::Tournament,
                key: tournament_name.to_string(),
            })?;

        let player1 = self
            .users
            .find_by_username(player1_username)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::User,
                key: player1_username.to_string(),
            })?;

        let player2 = self
            .users
            .find_by_username(player2_username)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::User,
                key: player2_username.to_string(),
            })?;

        if player1.public_id == player2.public_id {
            return Err(EngineError::SelfReferential {
                reason: format!("a match needs two distinct players, got {player1_username} twice"),
            });
        }

        for (player, username) in [(&player1, player1_username), (&player2, player2_username)] {
            if !self
                .participations
                .exists(tournament.public_id, player.public_id)
                .await?
            {
                return Err(EngineError::NotFound {
                    kind: EntityKind::Participation,
                    key: format!("{username} in {tournament_name}"),
                });
            }
        }

        let m = Match {
            public_id: Uuid::new_v4(),
            tournament_id: tournament.public_id,
            round,
            player1_id: player1.public_id,
            player2_id: player2.public_id,
            result: result.unwrap_or_default(),
        };

        self.matches.insert(&m).await?;
        log::info!(
            "created round {round} match {player1_username} vs {player2_username} in {tournament_name}"
        );
        Ok(m)
    }

    /// Record a match result.
    ///
    /// The result is persisted, and if it differs from the stored one the
    /// ranking policy runs exactly once for this transition. Deltas from an
    /// earlier decided result stay in place; a re-edited outcome stacks a
    /// fresh adjustment on top of them rather than reversing the old one.
    ///
    /// # Errors
    ///
    /// * `EngineError::NotFound` - No such match
    pub async fn update_match_result(
        &self,
        match_id: Uuid,
        new_result: MatchResult,
    ) -> EngineResult<Match> {
        let current = self
            .matches
            .find_by_public_id(match_id)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::Match,
                key: match_id.to_string(),
            })?;

        let updated = self.matches.set_result(match_id, new_result).await?;

        if new_result != current.result {
            for (user_id, delta) in
                ranking_adjustments(new_result, updated.player1_id, updated.player2_id)
            {
                self.users.adjust_ranking(user_id, delta).await?;
            }
            log::info!(
                "match {match_id} result {} -> {}, rankings adjusted",
                current.result,
                new_result
            );
        }

        Ok(updated)
    }

    /// Look up a match by public id.
    pub async fn get_match(&self, match_id: Uuid) -> EngineResult<Match> {
        self.matches
            .find_by_public_id(match_id)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::Match,
                key: match_id.to_string(),
            })
    }

    /// Delete a match. Rankings already earned from it are untouched.
    ///
    /// # Errors
    ///
    /// * `EngineError::NotFound` - No such match
    pub async fn delete_match(&self, match_id: Uuid) -> EngineResult<()> {
        self.matches.delete(match_id).await?;
        log::info!("deleted match {match_id}");
        Ok(())
    }
}
