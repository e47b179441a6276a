//! # Password hashing and verification: Argon2id
//!
//! - [`hash_password`]: random salt from [`OsRng`], default Argon2id parameters,
//!   PHC-format output (e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`) stored in
//!   `users.password_hash`.
//! - [`verify_password`]: `Ok(true)` on match, `Ok(false)` on mismatch, `Err` if the
//!   stored hash cannot be parsed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| format!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
