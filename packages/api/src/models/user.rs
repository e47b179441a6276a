//! # User model for authenticated users
//!
//! ## [`User`] (server only)
//!
//! The complete row from the `users` table, loaded with [`sqlx::FromRow`]:
//!
//! - `id`: primary key (`UUID v4`), also the owner key of every recipe row.
//! - `email`: normalised (trimmed, lower-case) login address, unique.
//! - `password_hash`: Argon2id PHC string.
//! - `created_at` / `updated_at`: audit timestamps.
//!
//! [`User::to_info`] projects it into the client-safe [`UserInfo`] from the `store`
//! crate, dropping the hash and converting the `Uuid` to a `String` so it works in WASM.

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

pub use store::UserInfo;

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl User {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
        }
    }
}
