//! Common utilities shared across the services and the HTTP layer.
//!
//! This crate provides:
//! - Unified error handling with HTTP mapping
//! - Persistence error classification
//! - Configuration structures loaded from the environment

pub mod config;
pub mod error;
pub mod store;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use store::{StoreError, StoreResult};
