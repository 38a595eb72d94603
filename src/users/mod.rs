//! User accounts and rankings.
//!
//! Rankings are mutated only by the match-outcome ranking policy or by the
//! administrative override on [`UserManager`]; they are never stored
//! negative.

pub mod manager;
pub mod models;

pub use manager::UserManager;
pub use models::{User, UserRole};
