//! Session key and the per-request ownership check.

use dioxus::prelude::ServerFnError;
use store::GatewayError;
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::{internal, to_server_error};

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// The signed-in user's id, if any.
pub async fn session_user_id(session: &Session) -> Result<Option<Uuid>, ServerFnError> {
    let user_id: Option<String> = session
        .get(SESSION_USER_ID_KEY)
        .await
        .map_err(internal)?;

    // A malformed id in the session is treated as signed out.
    Ok(user_id.and_then(|id| Uuid::parse_str(&id).ok()))
}

/// Resolve the session user and check it owns the `user_id` namespace being accessed.
pub async fn authorize(session: &Session, user_id: &str) -> Result<Uuid, ServerFnError> {
    let Some(current) = session_user_id(session).await? else {
        return Err(to_server_error(GatewayError::Auth("Not signed in".to_string())));
    };
    if current.to_string() != user_id {
        tracing::warn!(%current, requested = user_id, "rejected access to another user's recipes");
        return Err(to_server_error(GatewayError::Auth(
            "Permission denied".to_string(),
        )));
    }
    Ok(current)
}
