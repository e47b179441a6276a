//! Mapping between [`GatewayError`] and [`ServerFnError`].
//!
//! Server functions can only return a message string, so the error kind travels as a
//! `[code]` tag inside it (see [`GatewayError::encode`]). The client recovers the kind
//! with [`from_server_error`]; anything untagged (transport failures, a server that is
//! down) comes back as [`GatewayError::Network`].

use dioxus::prelude::ServerFnError;
use store::GatewayError;

pub fn to_server_error(error: GatewayError) -> ServerFnError {
    ServerFnError::new(error.encode())
}

pub fn from_server_error(error: ServerFnError) -> GatewayError {
    GatewayError::decode(&error.to_string())
}

/// Wrap an infrastructure failure (database, session store, hashing).
pub fn internal(error: impl std::fmt::Display) -> ServerFnError {
    tracing::error!("backend failure: {error}");
    to_server_error(GatewayError::Network(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_server_fn_error() {
        let err = GatewayError::NotFound("No recipe with id 42".to_string());
        assert_eq!(from_server_error(to_server_error(err.clone())), err);

        let auth = GatewayError::Auth("Invalid email or password".to_string());
        assert_eq!(from_server_error(to_server_error(auth.clone())), auth);
    }

    #[test]
    fn test_untagged_is_network() {
        let err = from_server_error(ServerFnError::new("connection reset"));
        assert!(matches!(err, GatewayError::Network(_)));
    }
}
