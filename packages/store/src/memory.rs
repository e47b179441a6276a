use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::Utc;

use crate::auth::{email_in_use, invalid_credentials, normalize_email, validate_registration};
use crate::gateway::{AuthListeners, AuthSubscription, Gateway, GatewayError};
use crate::models::{Recipe, RecipeDraft, RecipePatch, UserInfo};

#[derive(Debug)]
struct Account {
    user: UserInfo,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<String, Account>,
    recipes: HashMap<String, Vec<Recipe>>,
    next_user: u64,
    next_recipe: u64,
    offline: bool,
}

/// In-memory Gateway for testing.
///
/// Clones share the same accounts and collections. Passwords are kept in the clear;
/// this type never leaves the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    state: Rc<RefCell<State>>,
    listeners: AuthListeners,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`GatewayError::Network`].
    pub fn set_offline(&self, offline: bool) {
        self.state.borrow_mut().offline = offline;
    }

    fn reachable(&self) -> Result<(), GatewayError> {
        if self.state.borrow().offline {
            return Err(GatewayError::Network("Backend unreachable".to_string()));
        }
        Ok(())
    }
}

fn not_found(recipe_id: &str) -> GatewayError {
    GatewayError::NotFound(format!("No recipe with id {recipe_id}"))
}

impl Gateway for MemoryGateway {
    async fn register(&self, email: &str, password: &str) -> Result<UserInfo, GatewayError> {
        self.reachable()?;
        let email = normalize_email(email);
        validate_registration(&email, password)?;

        let user = {
            let mut state = self.state.borrow_mut();
            if state.accounts.contains_key(&email) {
                return Err(email_in_use());
            }
            state.next_user += 1;
            let user = UserInfo {
                id: format!("usr-{}", state.next_user),
                email: email.clone(),
            };
            state.accounts.insert(
                email,
                Account {
                    user: user.clone(),
                    password: password.to_string(),
                },
            );
            user
        };
        self.listeners.set_user(Some(user.clone()));
        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<UserInfo, GatewayError> {
        self.reachable()?;
        let email = normalize_email(email);
        let user = {
            let state = self.state.borrow();
            match state.accounts.get(&email) {
                Some(account) if account.password == password => Some(account.user.clone()),
                _ => None,
            }
        };
        let Some(user) = user else {
            return Err(invalid_credentials());
        };
        self.listeners.set_user(Some(user.clone()));
        Ok(user)
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        self.reachable()?;
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
        self.reachable()?;
        let state = self.state.borrow();
        Ok(state.recipes.get(user_id).cloned().unwrap_or_default())
    }

    async fn add_recipe(&self, user_id: &str, draft: &RecipeDraft) -> Result<Recipe, GatewayError> {
        self.reachable()?;
        let mut state = self.state.borrow_mut();
        state.next_recipe += 1;
        let recipe = Recipe {
            id: format!("rcp-{}", state.next_recipe),
            created_at: Utc::now(),
            fields: draft.clone(),
        };
        state
            .recipes
            .entry(user_id.to_string())
            .or_default()
            .push(recipe.clone());
        Ok(recipe)
    }

    async fn update_recipe(
        &self,
        user_id: &str,
        recipe_id: &str,
        patch: &RecipePatch,
    ) -> Result<Recipe, GatewayError> {
        self.reachable()?;
        let mut state = self.state.borrow_mut();
        let stored = state
            .recipes
            .get_mut(user_id)
            .and_then(|list| list.iter_mut().find(|r| r.id == recipe_id))
            .ok_or_else(|| not_found(recipe_id))?;
        *stored = stored.merged(patch);
        Ok(stored.clone())
    }

    async fn delete_recipe(&self, user_id: &str, recipe_id: &str) -> Result<(), GatewayError> {
        self.reachable()?;
        if let Some(list) = self.state.borrow_mut().recipes.get_mut(user_id) {
            list.retain(|r| r.id != recipe_id);
        }
        Ok(())
    }

    async fn set_favorite(
        &self,
        user_id: &str,
        recipe_id: &str,
        is_favorite: bool,
    ) -> Result<(), GatewayError> {
        self.update_recipe(user_id, recipe_id, &RecipePatch::favorite(is_favorite))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecipeField;

    fn soup() -> RecipeDraft {
        RecipeDraft::default()
            .with(RecipeField::Name("Soup".to_string()))
            .with(RecipeField::Cooktime(2))
            .with(RecipeField::Ingredients("water,salt".to_string()))
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let gw = MemoryGateway::new();
        let user = gw.register("Chef@Example.com", "pw123456").await.unwrap();
        assert_eq!(user.email, "chef@example.com");
        assert_eq!(gw.current_user(), Some(user.clone()));

        gw.logout().await.unwrap();
        assert!(gw.current_user().is_none());

        let again = gw.login("chef@example.com", "pw123456").await.unwrap();
        assert_eq!(again, user);
    }

    #[tokio::test]
    async fn test_auth_errors() {
        let gw = MemoryGateway::new();
        gw.register("chef@example.com", "pw123456").await.unwrap();

        let dup = gw.register("chef@example.com", "other-password").await;
        assert!(matches!(dup, Err(GatewayError::Auth(_))));

        let weak = gw.register("cook@example.com", "pw").await;
        assert!(matches!(weak, Err(GatewayError::Auth(_))));

        let bad = gw.login("chef@example.com", "wrong-password").await;
        assert_eq!(bad, Err(invalid_credentials()));

        let unknown = gw.login("nobody@example.com", "pw123456").await;
        assert_eq!(unknown, Err(invalid_credentials()));
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let gw = MemoryGateway::new();
        let user = gw.register("chef@example.com", "pw123456").await.unwrap();

        let added = gw.add_recipe(&user.id, &soup()).await.unwrap();
        assert!(!added.id.is_empty());

        let listed = gw.list_recipes(&user.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].fields, soup());
        assert_eq!(listed[0].id, added.id);
        assert_eq!(listed[0].created_at, added.created_at);
    }

    #[tokio::test]
    async fn test_collections_are_per_user() {
        let gw = MemoryGateway::new();
        gw.add_recipe("usr-a", &soup()).await.unwrap();
        assert!(gw.list_recipes("usr-b").await.unwrap().is_empty());
        assert!(matches!(
            gw.set_favorite("usr-b", "rcp-1", true).await,
            Err(GatewayError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let gw = MemoryGateway::new();
        let result = gw
            .update_recipe("usr-1", "rcp-404", &RecipePatch::favorite(true))
            .await;
        assert!(matches!(result, Err(GatewayError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let gw = MemoryGateway::new();
        let added = gw.add_recipe("usr-1", &soup()).await.unwrap();
        assert_eq!(gw.delete_recipe("usr-1", &added.id).await, Ok(()));
        assert_eq!(gw.delete_recipe("usr-1", &added.id).await, Ok(()));
        assert!(gw.list_recipes("usr-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_offline() {
        let gw = MemoryGateway::new();
        gw.set_offline(true);
        assert!(matches!(
            gw.list_recipes("usr-1").await,
            Err(GatewayError::Network(_))
        ));
        gw.set_offline(false);
        assert!(gw.list_recipes("usr-1").await.is_ok());
    }
}
