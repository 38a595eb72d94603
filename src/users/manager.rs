//! User manager for account creation and ranking overrides.

use std::sync::Arc;

use uuid::Uuid;

use super::models::{User, UserRole};
use crate::db::repository::UserRepository;
use crate::errors::{EngineError, EngineResult, EntityKind};

/// User manager
#[derive(Clone)]
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create a new user manager
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Create a user with a fresh public id.
    ///
    /// Rankings default to zero; a negative initial value is clamped to zero
    /// so the non-negative invariant holds from the first write.
    ///
    /// # Errors
    ///
    /// * `EngineError::Conflict` - Username already taken
    pub async fn create_user(
        &self,
        username: &str,
        role: UserRole,
        initial_ranking: Option<i32>,
    ) -> EngineResult<User> {
        let user = User {
            public_id: Uuid::new_v4(),
            username: username.to_string(),
            role,
            ranking: initial_ranking.unwrap_or(0).max(0),
        };

        self.users.insert(&user).await?;
        log::info!("created user {} with role {}", user.username, user.role);
        Ok(user)
    }

    /// Look up a user by public id.
    pub async fn get_user(&self, public_id: Uuid) -> EngineResult<User> {
        self.users
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::User,
                key: public_id.to_string(),
            })
    }

    /// Look up a user by username.
    pub async fn get_user_by_username(&self, username: &str) -> EngineResult<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| EngineError::NotFound {
                kind: EntityKind::User,
                key: username.to_string(),
            })
    }

    /// Administrative ranking override.
    ///
    /// The stored value is clamped at zero; a negative ranking is never
    /// persisted.
    pub async fn set_ranking(&self, public_id: Uuid, ranking: i32) -> EngineResult<User> {
        let user = self.users.set_ranking(public_id, ranking.max(0)).await?;
        log::info!("ranking override for {}: {}", user.username, user.ranking);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::MemoryStore;

    #[tokio::test]
    async fn test_create_user_defaults_ranking_to_zero() {
        let manager = UserManager::new(Arc::new(MemoryStore::new()));

        let user = manager
            .create_user("alice", UserRole::Player, None)
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.ranking, 0);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username_conflicts() {
        let manager = UserManager::new(Arc::new(MemoryStore::new()));

        manager
            .create_user("alice", UserRole::Player, None)
            .await
            .unwrap();
        let err = manager
            .create_user("alice", UserRole::Organizer, None)
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_set_ranking_clamps_negative_values() {
        let manager = UserManager::new(Arc::new(MemoryStore::new()));
        let user = manager
            .create_user("alice", UserRole::Player, Some(30))
            .await
            .unwrap();

        let updated = manager.set_ranking(user.public_id, -10).await.unwrap();
        assert_eq!(updated.ranking, 0);
    }

    #[tokio::test]
    async fn test_get_unknown_user_reports_not_found() {
        let manager = UserManager::new(Arc::new(MemoryStore::new()));

        let err = manager.get_user_by_username("ghost").await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::NotFound {
                kind: EntityKind::User,
                ..
            }
        ));
    }
}
