//! Repository layer for reset token data access.

pub mod entities;
#[cfg(any(test, feature = "test-utils"))]
mod memory;
mod reset_token_repository;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryResetTokens;
#[cfg(any(test, feature = "test-utils"))]
pub use reset_token_repository::MockResetTokenRepository;
pub use reset_token_repository::{ResetTokenRecords, ResetTokenRepository};
