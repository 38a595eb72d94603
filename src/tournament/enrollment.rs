//! Enrollment of players into capacity-bounded tournaments.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::capacity::CapacityGuard;
use super::models::Participation;
use crate::db::repository::{ParticipationRepository, TournamentRepository, UserRepository};
use crate::errors::{EngineError, EngineResult, EntityKind};

/// Enrollment manager
///
/// The only writer of participations, and with it the only caller of the
/// capacity guard. Enrollment is check-first: every precondition that can be
/// verified without holding a slot runs before the reservation, and a
/// reservation that cannot be spent on an insert is released again.
#[derive(Clone)]
pub struct EnrollmentManager {
    tournaments: Arc<dyn TournamentRepository>,
    users: Arc<dyn UserRepository>,
    participations: Arc<dyn ParticipationRepository>,
    guard: CapacityGuard,
}

impl EnrollmentManager {
    /// Create a new enrollment manager
    pub fn new(
        tournaments: Arc<dyn TournamentRepository>,
        users: Arc<dyn UserRepository>,
        participations: Arc<dyn ParticipationRepository>,
    ) -> Self {
        let guard = CapacityGuard::new(tournaments.clone());
        Self {
            tournaments,
            users,
            participations,
            guard,
        }
    }

    /// Enroll a user into a tournament.
    ///
    /// The join timestamp is set once, here; the score starts at
    /// `initial_score` (zero when unspecified).
    ///
    /// # Errors
    ///
    /// * `EngineError::NotFound` - Tournament or user does not exist
    /// * `EngineError::InvalidRole` - Organizers cannot enroll as players
    /// * `EngineError::SelfReferential` - The user organizes this tournament
    /// * `EngineError::Conflict` - The user already participates
    /// * `EngineError::CapacityExceeded` - The tournament is full
    pub async fn enroll(
        &self,
        tournament_name: &str,
        username: &str,
        initial_score: Option<i32>,
    ) -> EngineResult<Participation> {
        let tournament = self
            .tournaments
            .find_by_name(tournament_name)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::Tournament,
                key: tournament_name.to_string(),
            })?;

        let player = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::User,
                key: username.to_string(),
            })?;

        if !player.role.can_compete() {
            return Err(EngineError::InvalidRole {
                required: "player or admin",
                actual: player.role,
            });
        }

        if tournament.organizer_id == player.public_id {
            return Err(EngineError::SelfReferential {
                reason: format!(
                    "organizer {username} cannot join their own tournament {tournament_name} as a player"
                ),
            });
        }

        // Duplicate check runs before the reservation so a rejected
        // enrollment never holds a slot.
        if self
            .participations
            .exists(tournament.public_id, player.public_id)
            .await?
        {
            return Err(EngineError::Conflict {
                reason: format!("{username} already participates in {tournament_name}"),
            });
        }

        self.guard.try_reserve(tournament.public_id).await?;

        let participation = Participation {
            public_id: Uuid::new_v4(),
            tournament_id: tournament.public_id,
            player_id: player.public_id,
            joined_at: Utc::now(),
            score: initial_score.unwrap_or(0),
        };

        if let Err(err) = self.participations.insert(&participation).await {
            // A concurrent enrollment can win the unique (tournament, player)
            // pair between the pre-check and the insert; the reserved slot
            // must not leak.
            log::warn!(
                "enrollment of {username} into {tournament_name} failed after reservation, releasing slot"
            );
            self.guard.release(tournament.public_id).await?;
            return Err(err);
        }

        log::info!("{username} enrolled in {tournament_name}");
        Ok(participation)
    }

    /// Withdraw a participation, releasing exactly one slot.
    ///
    /// # Errors
    ///
    /// * `EngineError::NotFound` - No such participation
    pub async fn withdraw(&self, participation_id: Uuid) -> EngineResult<()> {
        let participation = self.participations.delete(participation_id).await?;
        self.guard.release(participation.tournament_id).await?;
        log::info!(
            "participation {participation_id} withdrawn from tournament {}",
            participation.tournament_id
        );
        Ok(())
    }

    /// Overwrite a participation's score.
    ///
    /// The write is unconditional; no sign or bounds checks apply.
    ///
    /// # Errors
    ///
    /// * `EngineError::NotFound` - No such participation
    pub async fn update_score(
        &self,
        participation_id: Uuid,
        new_score: i32,
    ) -> EngineResult<Participation> {
        self.participations
            .set_score(participation_id, new_score)
            .await
    }

    /// Look up a participation by public id.
    pub async fn get_participation(&self, participation_id: Uuid) -> EngineResult<Participation> {
        self.participations
            .find_by_public_id(participation_id)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::Participation,
                key: participation_id.to_string(),
            })
    }
}
