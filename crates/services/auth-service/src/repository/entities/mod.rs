//! SeaORM entities owned by the auth service.

pub mod password_reset_token;
