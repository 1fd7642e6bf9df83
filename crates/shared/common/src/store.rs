//! Persistence errors shared by every repository.
//!
//! Repositories return `StoreError` instead of the ORM's own error so that
//! services and in-memory test stores don't depend on the database driver.

use thiserror::Error;

/// Failures of a backing store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("Constraint violation: {0}")]
    Conflict(String),

    /// The store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Any other query failure
    #[error("Query failed: {0}")]
    Query(String),
}

impl StoreError {
    pub fn query(msg: impl Into<String>) -> Self {
        StoreError::Query(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        StoreError::Conflict(msg.into())
    }
}

/// Result type alias for repository operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::{DbErr, SqlErr};

        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return StoreError::Conflict(detail);
        }

        match err {
            DbErr::Conn(e) => StoreError::Unavailable(e.to_string()),
            DbErr::ConnectionAcquire(e) => StoreError::Unavailable(e.to_string()),
            other => StoreError::Query(other.to_string()),
        }
    }
}
