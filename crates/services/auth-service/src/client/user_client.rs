//! In-process client for the user service's repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use common::StoreResult;
use domain::User;
use user_service_lib::repository::UserRepository;

use super::UserLookup;

/// `UserLookup` backed by the user service's repository.
pub struct UserClient {
    repo: Arc<dyn UserRepository>,
}

impl UserClient {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserLookup for UserClient {
    async fn by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        debug!(user_id = %id, "Looking up user by id");
        self.repo.find_by_id(id).await
    }

    async fn by_email(&self, email: &str) -> StoreResult<Option<User>> {
        debug!("Looking up user by email");
        self.repo.find_by_email(email).await
    }

    async fn update(&self, user: &User) -> StoreResult<User> {
        self.repo.update(user).await
    }

    async fn create(&self, user: &User) -> StoreResult<User> {
        self.repo.create(user).await
    }
}
