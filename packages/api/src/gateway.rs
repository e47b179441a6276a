//! Client-side [`Gateway`] backed by the server functions in this crate.
//!
//! The server owns the session cookie; this side only mirrors who is signed in so it
//! can drive the auth-state subscription. Call [`ApiGateway::refresh`] once on startup
//! to pick up a session that survived a page reload.

use store::{
    AuthListeners, AuthSubscription, Gateway, GatewayError, Recipe, RecipeDraft, RecipePatch,
    UserInfo,
};

use crate::error::from_server_error;

/// Gateway that talks to the fullstack server.
#[derive(Clone, Debug, Default)]
pub struct ApiGateway {
    listeners: AuthListeners,
}

impl ApiGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the server who the session belongs to and notify subscribers.
    pub async fn refresh(&self) -> Result<Option<UserInfo>, GatewayError> {
        let user = crate::get_current_user().await.map_err(from_server_error)?;
        self.listeners.set_user(user.clone());
        Ok(user)
    }
}

impl Gateway for ApiGateway {
    async fn register(&self, email: &str, password: &str) -> Result<UserInfo, GatewayError> {
        let user = crate::register(email.to_string(), password.to_string())
            .await
            .map_err(from_server_error)?;
        self.listeners.set_user(Some(user.clone()));
        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<UserInfo, GatewayError> {
        let user = crate::login(email.to_string(), password.to_string())
            .await
            .map_err(from_server_error)?;
        self.listeners.set_user(Some(user.clone()));
        Ok(user)
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        crate::logout().await.map_err(from_server_error)?;
        self.listeners.set_user(None);
        Ok(())
    }

    fn current_user(&self) -> Option<UserInfo> {
        self.listeners.current()
    }

    fn subscribe_auth_state(
        &self,
        callback: impl FnMut(Option<&UserInfo>) + 'static,
    ) -> AuthSubscription {
        self.listeners.subscribe(callback)
    }

    async fn list_recipes(&self, user_id: &str) -> Result<Vec<Recipe>, GatewayError> {
        crate::list_recipes(user_id.to_string())
            .await
            .map_err(from_server_error)
    }

    async fn add_recipe(&self, user_id: &str, draft: &RecipeDraft) -> Result<Recipe, GatewayError> {
        crate::add_recipe(user_id.to_string(), draft.clone())
            .await
            .map_err(from_server_error)
    }

    async fn update_recipe(
        &self,
        user_id: &str,
        recipe_id: &str,
        patch: &RecipePatch,
    ) -> Result<Recipe, GatewayError> {
        crate::update_recipe(user_id.to_string(), recipe_id.to_string(), patch.clone())
            .await
            .map_err(from_server_error)
    }

    async fn delete_recipe(&self, user_id: &str, recipe_id: &str) -> Result<(), GatewayError> {
        crate::delete_recipe(user_id.to_string(), recipe_id.to_string())
            .await
            .map_err(from_server_error)
    }

    async fn set_favorite(
        &self,
        user_id: &str,
        recipe_id: &str,
        is_favorite: bool,
    ) -> Result<(), GatewayError> {
        crate::set_favorite(user_id.to_string(), recipe_id.to_string(), is_favorite)
            .await
            .map_err(from_server_error)
    }
}
