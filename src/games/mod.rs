//! Game catalogue referenced by tournaments.
//!
//! Games are created once and never mutated by this core; the
//! (title, platform) pair is unique.

pub mod manager;
pub mod models;

pub use manager::GameManager;
pub use models::{Game, Platform};
