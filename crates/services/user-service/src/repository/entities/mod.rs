//! SeaORM entities owned by the user service.

pub mod user;
