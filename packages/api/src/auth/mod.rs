//! Authentication module for local email + password accounts.

#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use password::{hash_password, verify_password};
#[cfg(feature = "server")]
pub use session::{authorize, session_user_id, SESSION_USER_ID_KEY};
