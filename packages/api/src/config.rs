//! Backend configuration from environment variables.
//!
//! Credentials are supplied at deployment time (environment or a `.env` file read with
//! `dotenvy`); nothing is compiled in.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `DATABASE_URL` | required | PostgreSQL connection string |
//! | `DATABASE_MAX_CONNECTIONS` | `5` | pool size |
//! | `SESSION_SECURE` | `false` | set the `Secure` flag on the session cookie |
//! | `SESSION_TTL_DAYS` | `7` | session expiry on inactivity |

/// Backend configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub session_secure: bool,
    pub session_ttl_days: i64,
}

impl BackendConfig {
    /// Load `.env` if present, then read the process environment.
    #[cfg(feature = "server")]
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let database_url = lookup("DATABASE_URL").ok_or("DATABASE_URL not set")?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .map_err(|_| format!("DATABASE_MAX_CONNECTIONS is not a number: {v}"))?,
            None => 5,
        };

        let session_secure = match lookup("SESSION_SECURE").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(v) => return Err(format!("SESSION_SECURE must be true or false, got {v}")),
        };

        let session_ttl_days = match lookup("SESSION_TTL_DAYS") {
            Some(v) => v
                .parse()
                .map_err(|_| format!("SESSION_TTL_DAYS is not a number: {v}"))?,
            None => 7,
        };

        Ok(Self {
            database_url,
            max_connections,
            session_secure,
            session_ttl_days,
        })
    }
}
