//! # Tournament Engine
//!
//! Core engine for a tournament-management backend: capacity-bounded
//! enrollment, deterministic ranking adjustments on match outcomes, and
//! leaderboard projection.
//!
//! The surrounding CRUD layer (HTTP routing, authentication, field
//! validation) is expected to live outside this crate and call into the
//! managers defined here with plain identifiers, receiving plain records or
//! typed errors back.
//!
//! ## Architecture
//!
//! State lives behind repository traits in [`db`]; two implementations are
//! provided, a PostgreSQL-backed [`db::PgStore`] and an in-process
//! [`db::MemoryStore`]. The two operations that mutate shared counters are
//! critical sections scoped to a single row:
//!
//! - **Capacity reservation**: a tournament slot is claimed with one
//!   conditional increment, so concurrent enrollments can never push
//!   occupancy above capacity.
//! - **Ranking adjustment**: a user's ranking moves by a signed delta in one
//!   clamped read-modify-write, so it is never stored negative.
//!
//! ## Core Modules
//!
//! - [`users`]: accounts, roles, and ranking overrides
//! - [`games`]: the game catalogue referenced by tournaments
//! - [`tournament`]: tournament lifecycle, capacity guard, enrollment,
//!   leaderboards
//! - [`matches`]: match outcome state machine and the ranking policy
//! - [`db`]: connection pool, configuration, and repositories
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use tournament_engine::db::MemoryStore;
//! use tournament_engine::users::{UserManager, UserRole};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> tournament_engine::EngineResult<()> {
//! let store = Arc::new(MemoryStore::new());
//! let users = UserManager::new(store.clone());
//!
//! let alice = users.create_user("alice", UserRole::Player, None).await?;
//! assert_eq!(alice.ranking, 0);
//! # Ok(())
//! # }
//! ```

/// Connection pool, configuration, and repository implementations.
pub mod db;

/// Shared error taxonomy.
pub mod errors;
pub use errors::{EngineError, EngineResult, EntityKind};

/// Game catalogue records.
pub mod games;

/// Match outcomes and the ranking policy.
pub mod matches;

/// Tournament lifecycle, capacity, enrollment, and leaderboards.
pub mod tournament;

/// User accounts and rankings.
pub mod users;
