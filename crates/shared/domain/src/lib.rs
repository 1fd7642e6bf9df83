//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared by the user and auth services and the HTTP layer.

pub mod constants;
pub mod error;
pub mod password;
pub mod password_reset;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{HashError, Password};
pub use password_reset::PasswordResetToken;
pub use user::{UpdateUser, User, UserResponse, UserRole};
