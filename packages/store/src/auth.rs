//! Credential rules and the sign-in form model.

use crate::gateway::GatewayError;

/// Minimum password length accepted on registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Normalise an email address for lookup and storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate registration credentials. `email` should already be normalised.
pub fn validate_registration(email: &str, password: &str) -> Result<(), GatewayError> {
    let valid_email = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid_email {
        return Err(GatewayError::Auth("Invalid email address".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(GatewayError::Auth(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Message for any failed login; never says which half was wrong.
pub fn invalid_credentials() -> GatewayError {
    GatewayError::Auth("Invalid email or password".to_string())
}

pub fn email_in_use() -> GatewayError {
    GatewayError::Auth("An account with this email already exists".to_string())
}

/// Whether the auth form signs in or creates an account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// State of the unauthenticated form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub mode: AuthMode,
    /// Inline error from the last failed submit.
    pub error: Option<String>,
}

impl AuthForm {
    /// Switch between login and registration, clearing any error.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.error = None;
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Login",
            AuthMode::Register => "Create Account",
        }
    }

    /// Reset to an empty login form after a successful submit.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
