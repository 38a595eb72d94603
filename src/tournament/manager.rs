//! Tournament manager for creating and deleting tournaments.

use std::sync::Arc;

use uuid::Uuid;

use super::models::Tournament;
use crate::db::repository::{GameRepository, TournamentRepository, UserRepository};
use crate::errors::{EngineError, EngineResult, EntityKind};

/// Tournament manager
#[derive(Clone)]
pub struct TournamentManager {
    tournaments: Arc<dyn TournamentRepository>,
    users: Arc<dyn UserRepository>,
    games: Arc<dyn GameRepository>,
}

impl TournamentManager {
    /// Create a new tournament manager
    pub fn new(
        tournaments: Arc<dyn TournamentRepository>,
        users: Arc<dyn UserRepository>,
        games: Arc<dyn GameRepository>,
    ) -> Self {
        Self {
            tournaments,
            users,
            games,
        }
    }

    /// Create a tournament with occupancy zero.
    ///
    /// # Errors
    ///
    /// * `EngineError::NotFound` - Organizer or game does not exist
    /// * `EngineError::InvalidRole` - Organizer lacks the organizer/admin role
    /// * `EngineError::Conflict` - Tournament name already taken
    pub async fn create_tournament(
        &self,
        name: &str,
        max_players: i32,
        game_title: &str,
        organizer_username: &str,
    ) -> EngineResult<Tournament> {
        let organizer = self
            .users
            .find_by_username(organizer_username)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::User,
                key: organizer_username.to_string(),
            })?;

        if !organizer.role.can_organize() {
            return Err(EngineError::InvalidRole {
                required: "organizer or admin",
                actual: organizer.role,
            });
        }

        let game = self
            .games
            .find_by_title(game_title)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::Game,
                key: game_title.to_string(),
            })?;

        let tournament = Tournament {
            public_id: Uuid::new_v4(),
            name: name.to_string(),
            max_players,
            current_players: 0,
            game_id: game.public_id,
            organizer_id: organizer.public_id,
        };

        self.tournaments.insert(&tournament).await?;
        log::info!(
            "created tournament {} (capacity {}) organized by {}",
            tournament.name,
            tournament.max_players,
            organizer_username
        );
        Ok(tournament)
    }

    /// Look up a tournament by name.
    pub async fn get_tournament_by_name(&self, name: &str) -> EngineResult<Tournament> {
        self.tournaments
            .find_by_name(name)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::Tournament,
                key: name.to_string(),
            })
    }

    /// Delete a tournament with its participations and matches.
    ///
    /// Children go first, then the parent, inside one transaction boundary.
    ///
    /// # Errors
    ///
    /// * `EngineError::NotFound` - No such tournament
    pub async fn delete_tournament(&self, public_id: Uuid) -> EngineResult<()> {
        self.tournaments.delete_cascade(public_id).await?;
        log::info!("deleted tournament {public_id} and its children");
        Ok(())
    }
}
