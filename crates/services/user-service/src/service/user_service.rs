//! User service - Handles profile reads, updates and deletion.
//!
//! Registration and credentials live in the auth service; this service only
//! deals with users that already exist.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{is_valid_role, Password, UpdateUser, User, UserRole};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Apply a partial profile update.
    ///
    /// A new password is checked against the password policy and hashed
    /// before it is stored.
    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    /// Permanently delete a user
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.repo.list().await?)
    }

    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        let mut user = self.get_user(id).await?;

        if let Some(role) = changes.role {
            if !is_valid_role(&role) {
                return Err(AppError::validation(format!("Unknown role: {}", role)));
            }
            user.update_role(UserRole::from(role));
        }

        if let Some(password) = changes.password {
            let password = Password::new(&password)?;
            user.update_password_hash(password.into_string());
        }

        if let Some(name) = changes.name {
            user.update_name(name);
        }

        let updated = self.repo.update(&user).await?;
        tracing::info!(user_id = %updated.id, "User profile updated");
        Ok(updated)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
