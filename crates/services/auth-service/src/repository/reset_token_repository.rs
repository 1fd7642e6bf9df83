//! Persistence of password reset tokens.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::entities::password_reset_token::{self, ActiveModel, Entity as ResetTokenEntity};
use common::StoreResult;
use domain::PasswordResetToken;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Reset token repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ResetTokenRepository: Send + Sync {
    async fn insert(&self, record: &PasswordResetToken) -> StoreResult<()>;

    async fn find_by_token(&self, token: &str) -> StoreResult<Option<PasswordResetToken>>;

    /// Remove a token. Returns `false` when no row was removed; that is not
    /// an error, but it tells the caller someone else consumed it first.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

/// SeaORM implementation of ResetTokenRepository
pub struct ResetTokenRecords {
    db: DatabaseConnection,
}

impl ResetTokenRecords {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResetTokenRepository for ResetTokenRecords {
    async fn insert(&self, record: &PasswordResetToken) -> StoreResult<()> {
        ActiveModel::from(record).insert(&self.db).await?;
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> StoreResult<Option<PasswordResetToken>> {
        let result = ResetTokenEntity::find()
            .filter(password_reset_token::Column::Token.eq(token))
            .one(&self.db)
            .await?;

        Ok(result.map(PasswordResetToken::from))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = ResetTokenEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
