//! Match outcome recording and the ranking policy.
//!
//! A match moves freely between the four result states; matches stay
//! re-editable after a result is recorded. Every *change* of result applies
//! the ranking policy exactly once; re-submitting an unchanged result is a
//! no-op for rankings.

pub mod manager;
pub mod models;
pub mod ranking;

pub use manager::MatchManager;
pub use models::{Match, MatchResult};
pub use ranking::{LOSS_PENALTY, WIN_POINTS, ranking_adjustments};
