//! Game manager for catalogue entries.

use std::sync::Arc;

use uuid::Uuid;

use super::models::{Game, Platform};
use crate::db::repository::GameRepository;
use crate::errors::{EngineError, EngineResult, EntityKind};

/// Game manager
#[derive(Clone)]
pub struct GameManager {
    games: Arc<dyn GameRepository>,
}

impl GameManager {
    /// Create a new game manager
    pub fn new(games: Arc<dyn GameRepository>) -> Self {
        Self { games }
    }

    /// Add a game to the catalogue.
    ///
    /// # Errors
    ///
    /// * `EngineError::Conflict` - A game with the same title already exists
    ///   on the same platform
    pub async fn create_game(
        &self,
        title: &str,
        genre: &str,
        platform: Platform,
    ) -> EngineResult<Game> {
        let game = Game {
            public_id: Uuid::new_v4(),
            title: title.to_string(),
            genre: genre.to_string(),
            platform,
        };

        self.games.insert(&game).await?;
        log::info!("created game {} on {}", game.title, game.platform);
        Ok(game)
    }

    /// Look up a game by title.
    pub async fn get_game_by_title(&self, title: &str) -> EngineResult<Game> {
        self.games
            .find_by_title(title)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::Game,
                key: title.to_string(),
            })
    }
}
