//! Tournament lifecycle, capacity-bounded enrollment, and leaderboards.
//!
//! This module holds the occupancy invariant of the engine: a tournament's
//! `current_players` never exceeds `max_players` and never goes negative,
//! even under concurrent enrollment. Reservation and release each happen as
//! a single conditional read-modify-write scoped to one tournament row; see
//! [`CapacityGuard`].
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tournament_engine::db::{Database, DatabaseConfig, PgStore};
//! use tournament_engine::tournament::EnrollmentManager;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let store = Arc::new(PgStore::new(Arc::new(db.pool().clone())));
//!
//!     let enrollment = EnrollmentManager::new(store.clone(), store.clone(), store);
//!     let participation = enrollment.enroll("Spring Cup", "alice", None).await?;
//!     println!("enrolled at {}", participation.joined_at);
//!     Ok(())
//! }
//! ```

pub mod capacity;
pub mod enrollment;
pub mod leaderboard;
pub mod manager;
pub mod models;

pub use capacity::CapacityGuard;
pub use enrollment::EnrollmentManager;
pub use leaderboard::{LeaderboardProjector, sort_standings};
pub use manager::TournamentManager;
pub use models::{Participation, Tournament};
