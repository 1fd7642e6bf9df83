//! Access to user records owned by the user service.

mod user_client;
mod user_lookup;

pub use user_client::UserClient;
#[cfg(any(test, feature = "test-utils"))]
pub use user_lookup::MockUserLookup;
pub use user_lookup::UserLookup;
