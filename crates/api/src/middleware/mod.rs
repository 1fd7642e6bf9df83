//! Bearer token authentication and role checks.

mod auth;

pub use auth::{auth_middleware, require_admin, require_admin_role, CurrentUser};
