//! In-memory `ResetTokenRepository` for scenario tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{StoreError, StoreResult};
use domain::PasswordResetToken;

use super::ResetTokenRepository;

#[derive(Default)]
pub struct InMemoryResetTokens {
    records: RwLock<HashMap<Uuid, PasswordResetToken>>,
}

impl InMemoryResetTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Pretend `token` was issued `elapsed` earlier than it was.
    pub async fn backdate(&self, token: &str, elapsed: Duration) {
        let mut records = self.records.write().await;
        if let Some(record) = records.values_mut().find(|r| r.token == token) {
            record.created_at -= elapsed;
            record.expires_at -= elapsed;
        }
    }
}

#[async_trait]
impl ResetTokenRepository for InMemoryResetTokens {
    async fn insert(&self, record: &PasswordResetToken) -> StoreResult<()> {
        let mut records = self.records.write().await;
        if records.values().any(|r| r.token == record.token) {
            return Err(StoreError::conflict("password_reset_tokens_token_key"));
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> StoreResult<Option<PasswordResetToken>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|r| r.token == token)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.records.write().await.remove(&id).is_some())
    }
}
