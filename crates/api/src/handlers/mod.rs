//! HTTP request handlers.

pub mod auth_handler;
pub mod health_handler;
pub mod password_reset_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use health_handler::health_check;
pub use password_reset_handler::password_reset_routes;
pub use user_handler::user_routes;
