//! Collaborator contract for reading and writing users.

use async_trait::async_trait;
use uuid::Uuid;

use common::StoreResult;
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User operations needed by the auth core.
///
/// Returned users carry their password hash.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Persist every field of an existing user
    async fn update(&self, user: &User) -> StoreResult<User>;

    async fn create(&self, user: &User) -> StoreResult<User>;
}
