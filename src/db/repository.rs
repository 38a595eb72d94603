//! Repository trait definitions with PostgreSQL and in-memory backends.
//!
//! The managers are written against these traits, enabling dependency
//! injection and testing without a live database. Two implementations are
//! provided: [`PgStore`] over a connection pool and [`MemoryStore`] over a
//! single mutex.
//!
//! Both backends uphold the engine's two per-entity critical sections:
//! slot reservation/release happens as one conditional read-modify-write on
//! the tournament row, and ranking adjustment as one clamped
//! read-modify-write on the user row.

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::errors::{EngineError, EngineResult, EntityKind};
use crate::games::{Game, Platform};
use crate::matches::{Match, MatchResult};
use crate::tournament::{Participation, Tournament};
use crate::users::{User, UserRole};

/// Trait for user repository operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; `Conflict` when the username is taken.
    async fn insert(&self, user: &User) -> EngineResult<()>;

    /// Find a user by public id
    async fn find_by_public_id(&self, public_id: Uuid) -> EngineResult<Option<User>>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> EngineResult<Option<User>>;

    /// Overwrite a user's ranking, clamped at zero.
    async fn set_ranking(&self, public_id: Uuid, ranking: i32) -> EngineResult<User>;

    /// Move a user's ranking by a signed delta, clamped at zero.
    ///
    /// One atomic read-modify-write per call; concurrent adjustments to the
    /// same user serialize.
    async fn adjust_ranking(&self, public_id: Uuid, delta: i32) -> EngineResult<User>;
}

/// Trait for game repository operations
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Insert a game; `Conflict` when the (title, platform) pair exists.
    async fn insert(&self, game: &Game) -> EngineResult<()>;

    /// Find a game by title
    async fn find_by_title(&self, title: &str) -> EngineResult<Option<Game>>;
}

/// Trait for tournament repository operations
///
/// Carries the capacity guard primitives; both are single conditional
/// updates so that occupancy can never overshoot capacity or go negative,
/// whatever the interleaving.
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Insert a tournament; `Conflict` when the name is taken.
    async fn insert(&self, tournament: &Tournament) -> EngineResult<()>;

    /// Find a tournament by name
    async fn find_by_name(&self, name: &str) -> EngineResult<Option<Tournament>>;

    /// Find a tournament by public id
    async fn find_by_public_id(&self, public_id: Uuid) -> EngineResult<Option<Tournament>>;

    /// Atomically claim a slot: increments occupancy only while it is below
    /// capacity. Returns `false` when the tournament is full.
    async fn try_reserve_slot(&self, public_id: Uuid) -> EngineResult<bool>;

    /// Atomically release a slot: decrements occupancy only while it is
    /// above zero. A no-op at zero.
    async fn release_slot(&self, public_id: Uuid) -> EngineResult<()>;

    /// Delete a tournament and its participations and matches, children
    /// first, inside one transaction boundary.
    async fn delete_cascade(&self, public_id: Uuid) -> EngineResult<()>;
}

/// Trait for participation repository operations
#[async_trait]
pub trait ParticipationRepository: Send + Sync {
    /// Insert a participation; `Conflict` when the (tournament, player)
    /// pair already exists.
    async fn insert(&self, participation: &Participation) -> EngineResult<()>;

    /// Whether a (tournament, player) participation exists
    async fn exists(&self, tournament_id: Uuid, player_id: Uuid) -> EngineResult<bool>;

    /// Find a participation by public id
    async fn find_by_public_id(&self, public_id: Uuid) -> EngineResult<Option<Participation>>;

    /// Delete a participation, returning the removed record.
    async fn delete(&self, public_id: Uuid) -> EngineResult<Participation>;

    /// Overwrite a participation's score.
    async fn set_score(&self, public_id: Uuid, score: i32) -> EngineResult<Participation>;

    /// All participations of a tournament in insertion order.
    async fn list_by_tournament(&self, tournament_id: Uuid) -> EngineResult<Vec<Participation>>;
}

/// Trait for match repository operations
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Insert a match
    async fn insert(&self, m: &Match) -> EngineResult<()>;

    /// Find a match by public id
    async fn find_by_public_id(&self, public_id: Uuid) -> EngineResult<Option<Match>>;

    /// Overwrite a match's result, returning the updated record.
    async fn set_result(&self, public_id: Uuid, result: MatchResult) -> EngineResult<Match>;

    /// Delete a match
    async fn delete(&self, public_id: Uuid) -> EngineResult<()>;
}

/// Map a unique-constraint violation to `Conflict`, everything else to
/// `Database`.
fn conflict_on_unique(err: sqlx::Error, reason: impl Into<String>) -> EngineError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => EngineError::Conflict {
            reason: reason.into(),
        },
        other => EngineError::Database(other),
    }
}

fn not_found(kind: EntityKind, key: impl ToString) -> EngineError {
    EngineError::NotFound {
        kind,
        key: key.to_string(),
    }
}

/// PostgreSQL implementation of all repository traits
#[derive(Clone)]
pub struct PgStore {
    pool: Arc<PgPool>,
}

impl PgStore {
    /// Create a new PostgreSQL store
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: &PgRow) -> User {
    User {
        public_id: row.get("public_id"),
        username: row.get("username"),
        role: UserRole::parse(row.get::<String, _>("role").as_str()).unwrap_or(UserRole::Player),
        ranking: row.get("ranking"),
    }
}

fn row_to_game(row: &PgRow) -> Game {
    Game {
        public_id: row.get("public_id"),
        title: row.get("title"),
        genre: row.get("genre"),
        platform: Platform::parse(row.get::<String, _>("platform").as_str())
            .unwrap_or(Platform::Pc),
    }
}

fn row_to_tournament(row: &PgRow) -> Tournament {
    Tournament {
        public_id: row.get("public_id"),
        name: row.get("name"),
        max_players: row.get("max_players"),
        current_players: row.get("current_players"),
        game_id: row.get("game_id"),
        organizer_id: row.get("organizer_id"),
    }
}

fn row_to_participation(row: &PgRow) -> Participation {
    Participation {
        public_id: row.get("public_id"),
        tournament_id: row.get("tournament_id"),
        player_id: row.get("player_id"),
        joined_at: row.get::<chrono::NaiveDateTime, _>("joined_at").and_utc(),
        score: row.get("score"),
    }
}

fn row_to_match(row: &PgRow) -> Match {
    Match {
        public_id: row.get("public_id"),
        tournament_id: row.get("tournament_id"),
        round: row.get("round"),
        player1_id: row.get("player1_id"),
        player2_id: row.get("player2_id"),
        result: MatchResult::parse(row.get::<String, _>("result").as_str())
            .unwrap_or(MatchResult::Pending),
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn insert(&self, user: &User) -> EngineResult<()> {
        sqlx::query("INSERT INTO users (public_id, username, role, ranking) VALUES ($1, $2, $3, $4)")
            .bind(user.public_id)
            .bind(&user.username)
            .bind(user.role.as_str())
            .bind(user.ranking)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| {
                conflict_on_unique(e, format!("username {} is already taken", user.username))
            })?;
        Ok(())
    }

    async fn find_by_public_id(&self, public_id: Uuid) -> EngineResult<Option<User>> {
        let row = sqlx::query(
            "SELECT public_id, username, role, ranking FROM users WHERE public_id = $1",
        )
        .bind(public_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.as_ref().map(row_to_user))
    }

    async fn find_by_username(&self, username: &str) -> EngineResult<Option<User>> {
        let row = sqlx::query(
            "SELECT public_id, username, role, ranking FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.as_ref().map(row_to_user))
    }

    async fn set_ranking(&self, public_id: Uuid, ranking: i32) -> EngineResult<User> {
        let row = sqlx::query(
            "UPDATE users SET ranking = GREATEST($2, 0)
             WHERE public_id = $1
             RETURNING public_id, username, role, ranking",
        )
        .bind(public_id)
        .bind(ranking)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| not_found(EntityKind::User, public_id))?;

        Ok(row_to_user(&row))
    }

    async fn adjust_ranking(&self, public_id: Uuid, delta: i32) -> EngineResult<User> {
        // Single conditional update; the clamp and the addition happen in
        // one indivisible statement.
        let row = sqlx::query(
            "UPDATE users SET ranking = GREATEST(ranking + $2, 0)
             WHERE public_id = $1
             RETURNING public_id, username, role, ranking",
        )
        .bind(public_id)
        .bind(delta)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| not_found(EntityKind::User, public_id))?;

        Ok(row_to_user(&row))
    }
}

#[async_trait]
impl GameRepository for PgStore {
    async fn insert(&self, game: &Game) -> EngineResult<()> {
        sqlx::query(
            "INSERT INTO games (public_id, title, genre, platform) VALUES ($1, $2, $3, $4)",
        )
        .bind(game.public_id)
        .bind(&game.title)
        .bind(&game.genre)
        .bind(game.platform.as_str())
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                format!(
                    "game {} already exists on platform {}",
                    game.title, game.platform
                ),
            )
        })?;
        Ok(())
    }

    async fn find_by_title(&self, title: &str) -> EngineResult<Option<Game>> {
        let row = sqlx::query(
            "SELECT public_id, title, genre, platform FROM games WHERE title = $1 ORDER BY id LIMIT 1",
        )
        .bind(title)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.as_ref().map(row_to_game))
    }
}

#[async_trait]
impl TournamentRepository for PgStore {
    async fn insert(&self, tournament: &Tournament) -> EngineResult<()> {
        sqlx::query(
            "INSERT INTO tournaments (public_id, name, max_players, current_players, game_id, organizer_id)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(tournament.public_id)
        .bind(&tournament.name)
        .bind(tournament.max_players)
        .bind(tournament.current_players)
        .bind(tournament.game_id)
        .bind(tournament.organizer_id)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                format!("tournament name {} is already taken", tournament.name),
            )
        })?;
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> EngineResult<Option<Tournament>> {
        let row = sqlx::query(
            "SELECT public_id, name, max_players, current_players, game_id, organizer_id
             FROM tournaments WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.as_ref().map(row_to_tournament))
    }

    async fn find_by_public_id(&self, public_id: Uuid) -> EngineResult<Option<Tournament>> {
        let row = sqlx::query(
            "SELECT public_id, name, max_players, current_players, game_id, organizer_id
             FROM tournaments WHERE public_id = $1",
        )
        .bind(public_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.as_ref().map(row_to_tournament))
    }

    async fn try_reserve_slot(&self, public_id: Uuid) -> EngineResult<bool> {
        // Check-and-increment in a single statement; two concurrent calls
        // against the last slot cannot both succeed.
        let result = sqlx::query(
            "UPDATE tournaments SET current_players = current_players + 1
             WHERE public_id = $1 AND current_players < max_players",
        )
        .bind(public_id)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 1 {
            return Ok(true);
        }

        // Zero rows means either a full tournament or a missing one.
        let exists = sqlx::query("SELECT 1 FROM tournaments WHERE public_id = $1")
            .bind(public_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        match exists {
            Some(_) => Ok(false),
            None => Err(not_found(EntityKind::Tournament, public_id)),
        }
    }

    async fn release_slot(&self, public_id: Uuid) -> EngineResult<()> {
        let result = sqlx::query(
            "UPDATE tournaments SET current_players = current_players - 1
             WHERE public_id = $1 AND current_players > 0",
        )
        .bind(public_id)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        let exists = sqlx::query("SELECT 1 FROM tournaments WHERE public_id = $1")
            .bind(public_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        match exists {
            // Occupancy already at zero; releasing is a no-op.
            Some(_) => Ok(()),
            None => Err(not_found(EntityKind::Tournament, public_id)),
        }
    }

    async fn delete_cascade(&self, public_id: Uuid) -> EngineResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM matches WHERE tournament_id = $1")
            .bind(public_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM participations WHERE tournament_id = $1")
            .bind(public_id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM tournaments WHERE public_id = $1")
            .bind(public_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls the child deletes back.
            return Err(not_found(EntityKind::Tournament, public_id));
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl ParticipationRepository for PgStore {
    async fn insert(&self, participation: &Participation) -> EngineResult<()> {
        sqlx::query(
            "INSERT INTO participations (public_id, tournament_id, player_id, joined_at, score)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(participation.public_id)
        .bind(participation.tournament_id)
        .bind(participation.player_id)
        .bind(participation.joined_at.naive_utc())
        .bind(participation.score)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                format!(
                    "player {} already participates in tournament {}",
                    participation.player_id, participation.tournament_id
                ),
            )
        })?;
        Ok(())
    }

    async fn exists(&self, tournament_id: Uuid, player_id: Uuid) -> EngineResult<bool> {
        let row = sqlx::query(
            "SELECT 1 FROM participations WHERE tournament_id = $1 AND player_id = $2",
        )
        .bind(tournament_id)
        .bind(player_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.is_some())
    }

    async fn find_by_public_id(&self, public_id: Uuid) -> EngineResult<Option<Participation>> {
        let row = sqlx::query(
            "SELECT public_id, tournament_id, player_id, joined_at, score
             FROM participations WHERE public_id = $1",
        )
        .bind(public_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.as_ref().map(row_to_participation))
    }

    async fn delete(&self, public_id: Uuid) -> EngineResult<Participation> {
        let row = sqlx::query(
            "DELETE FROM participations WHERE public_id = $1
             RETURNING public_id, tournament_id, player_id, joined_at, score",
        )
        .bind(public_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| not_found(EntityKind::Participation, public_id))?;

        Ok(row_to_participation(&row))
    }

    async fn set_score(&self, public_id: Uuid, score: i32) -> EngineResult<Participation> {
        let row = sqlx::query(
            "UPDATE participations SET score = $2 WHERE public_id = $1
             RETURNING public_id, tournament_id, player_id, joined_at, score",
        )
        .bind(public_id)
        .bind(score)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| not_found(EntityKind::Participation, public_id))?;

        Ok(row_to_participation(&row))
    }

    async fn list_by_tournament(&self, tournament_id: Uuid) -> EngineResult<Vec<Participation>> {
        let rows = sqlx::query(
            "SELECT public_id, tournament_id, player_id, joined_at, score
             FROM participations WHERE tournament_id = $1 ORDER BY id",
        )
        .bind(tournament_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(row_to_participation).collect())
    }
}

#[async_trait]
impl MatchRepository for PgStore {
    async fn insert(&self, m: &Match) -> EngineResult<()> {
        sqlx::query(
            "INSERT INTO matches (public_id, tournament_id, round, player1_id, player2_id, result)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(m.public_id)
        .bind(m.tournament_id)
        .bind(m.round)
        .bind(m.player1_id)
        .bind(m.player2_id)
        .bind(m.result.as_str())
        .execute(self.pool.as_ref())
        .await?;
        Ok(())
    }

    async fn find_by_public_id(&self, public_id: Uuid) -> EngineResult<Option<Match>> {
        let row = sqlx::query(
            "SELECT public_id, tournament_id, round, player1_id, player2_id, result
             FROM matches WHERE public_id = $1",
        )
        .bind(public_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.as_ref().map(row_to_match))
    }

    async fn set_result(&self, public_id: Uuid, result: MatchResult) -> EngineResult<Match> {
        let row = sqlx::query(
            "UPDATE matches SET result = $2 WHERE public_id = $1
             RETURNING public_id, tournament_id, round, player1_id, player2_id, result",
        )
        .bind(public_id)
        .bind(result.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| not_found(EntityKind::Match, public_id))?;

        Ok(row_to_match(&row))
    }

    async fn delete(&self, public_id: Uuid) -> EngineResult<()> {
        let result = sqlx::query("DELETE FROM matches WHERE public_id = $1")
            .bind(public_id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(EntityKind::Match, public_id));
        }
        Ok(())
    }
}

/// In-memory implementation of all repository traits.
///
/// A single mutex guards the whole state, so every repository call is
/// linearizable. Participations keep their insertion order, which carries
/// the leaderboard tie-break. Used by the test suite and by embedders that
/// run the engine without PostgreSQL.
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    games: Vec<Game>,
    tournaments: Vec<Tournament>,
    participations: Vec<Participation>,
    matches: Vec<Match>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().expect("store mutex poisoned")
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &User) -> EngineResult<()> {
        let mut state = self.lock();
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(EngineError::Conflict {
                reason: format!("username {} is already taken", user.username),
            });
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_by_public_id(&self, public_id: Uuid) -> EngineResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.public_id == public_id)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> EngineResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn set_ranking(&self, public_id: Uuid, ranking: i32) -> EngineResult<User> {
        let mut state = self.lock();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.public_id == public_id)
            .ok_or_else(|| not_found(EntityKind::User, public_id))?;
        user.ranking = ranking.max(0);
        Ok(user.clone())
    }

    async fn adjust_ranking(&self, public_id: Uuid, delta: i32) -> EngineResult<User> {
        let mut state = self.lock();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.public_id == public_id)
            .ok_or_else(|| not_found(EntityKind::User, public_id))?;
        user.ranking = (user.ranking + delta).max(0);
        Ok(user.clone())
    }
}

#[async_trait]
impl GameRepository for MemoryStore {
    async fn insert(&self, game: &Game) -> EngineResult<()> {
        let mut state = self.lock();
        if state
            .games
            .iter()
            .any(|g| g.title == game.title && g.platform == game.platform)
        {
            return Err(EngineError::Conflict {
                reason: format!(
                    "game {} already exists on platform {}",
                    game.title, game.platform
                ),
            });
        }
        state.games.push(game.clone());
        Ok(())
    }

    async fn find_by_title(&self, title: &str) -> EngineResult<Option<Game>> {
        Ok(self
            .lock()
            .games
            .iter()
            .find(|g| g.title == title)
            .cloned())
    }
}

#[async_trait]
impl TournamentRepository for MemoryStore {
    async fn insert(&self, tournament: &Tournament) -> EngineResult<()> {
        let mut state = self.lock();
        if state.tournaments.iter().any(|t| t.name == tournament.name) {
            return Err(EngineError::Conflict {
                reason: format!("tournament name {} is already taken", tournament.name),
            });
        }
        state.tournaments.push(tournament.clone());
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> EngineResult<Option<Tournament>> {
        Ok(self
            .lock()
            .tournaments
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn find_by_public_id(&self, public_id: Uuid) -> EngineResult<Option<Tournament>> {
        Ok(self
            .lock()
            .tournaments
            .iter()
            .find(|t| t.public_id == public_id)
            .cloned())
    }

    async fn try_reserve_slot(&self, public_id: Uuid) -> EngineResult<bool> {
        // The check and the increment happen under one lock acquisition.
        let mut state = self.lock();
        let tournament = state
            .tournaments
            .iter_mut()
            .find(|t| t.public_id == public_id)
            .ok_or_else(|| not_found(EntityKind::Tournament, public_id))?;

        if tournament.current_players < tournament.max_players {
            tournament.current_players += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn release_slot(&self, public_id: Uuid) -> EngineResult<()> {
        let mut state = self.lock();
        let tournament = state
            .tournaments
            .iter_mut()
            .find(|t| t.public_id == public_id)
            .ok_or_else(|| not_found(EntityKind::Tournament, public_id))?;

        if tournament.current_players > 0 {
            tournament.current_players -= 1;
        }
        Ok(())
    }

    async fn delete_cascade(&self, public_id: Uuid) -> EngineResult<()> {
        let mut state = self.lock();
        let pos = state
            .tournaments
            .iter()
            .position(|t| t.public_id == public_id)
            .ok_or_else(|| not_found(EntityKind::Tournament, public_id))?;

        state.matches.retain(|m| m.tournament_id != public_id);
        state
            .participations
            .retain(|p| p.tournament_id != public_id);
        state.tournaments.remove(pos);
        Ok(())
    }
}

#[async_trait]
impl ParticipationRepository for MemoryStore {
    async fn insert(&self, participation: &Participation) -> EngineResult<()> {
        let mut state = self.lock();
        if state.participations.iter().any(|p| {
            p.tournament_id == participation.tournament_id
                && p.player_id == participation.player_id
        }) {
            return Err(EngineError::Conflict {
                reason: format!(
                    "player {} already participates in tournament {}",
                    participation.player_id, participation.tournament_id
                ),
            });
        }
        state.participations.push(participation.clone());
        Ok(())
    }

    async fn exists(&self, tournament_id: Uuid, player_id: Uuid) -> EngineResult<bool> {
        Ok(self
            .lock()
            .participations
            .iter()
            .any(|p| p.tournament_id == tournament_id && p.player_id == player_id))
    }

    async fn find_by_public_id(&self, public_id: Uuid) -> EngineResult<Option<Participation>> {
        Ok(self
            .lock()
            .participations
            .iter()
            .find(|p| p.public_id == public_id)
            .cloned())
    }

    async fn delete(&self, public_id: Uuid) -> EngineResult<Participation> {
        let mut state = self.lock();
        let pos = state
            .participations
            .iter()
            .position(|p| p.public_id == public_id)
            .ok_or_else(|| not_found(EntityKind::Participation, public_id))?;
        Ok(state.participations.remove(pos))
    }

    async fn set_score(&self, public_id: Uuid, score: i32) -> EngineResult<Participation> {
        let mut state = self.lock();
        let participation = state
            .participations
            .iter_mut()
            .find(|p| p.public_id == public_id)
            .ok_or_else(|| not_found(EntityKind::Participation, public_id))?;
        participation.score = score;
        Ok(participation.clone())
    }

    async fn list_by_tournament(&self, tournament_id: Uuid) -> EngineResult<Vec<Participation>> {
        Ok(self
            .lock()
            .participations
            .iter()
            .filter(|p| p.tournament_id == tournament_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MatchRepository for MemoryStore {
    async fn insert(&self, m: &Match) -> EngineResult<()> {
        self.lock().matches.push(m.clone());
        Ok(())
    }

    async fn find_by_public_id(&self, public_id: Uuid) -> EngineResult<Option<Match>> {
        Ok(self
            .lock()
            .matches
            .iter()
            .find(|m| m.public_id == public_id)
            .cloned())
    }

    async fn set_result(&self, public_id: Uuid, result: MatchResult) -> EngineResult<Match> {
        let mut state = self.lock();
        let m = state
            .matches
            .iter_mut()
            .find(|m| m.public_id == public_id)
            .ok_or_else(|| not_found(EntityKind::Match, public_id))?;
        m.result = result;
        Ok(m.clone())
    }

    async fn delete(&self, public_id: Uuid) -> EngineResult<()> {
        let mut state = self.lock();
        let pos = state
            .matches
            .iter()
            .position(|m| m.public_id == public_id)
            .ok_or_else(|| not_found(EntityKind::Match, public_id))?;
        state.matches.remove(pos);
        Ok(())
    }
}
