//! # Actions: async intents that pair a gateway call with a store update
//!
//! Each function reads what it needs from the [`RecipeStore`] and takes a
//! [`SessionTicket`] *before* its first suspension point, awaits the [`Gateway`], and then
//! applies the server's answer with that ticket. The store is only borrowed inside the
//! short synchronous sections, never across an `.await`, which is what [`StoreHandle`]
//! enforces.
//!
//! On failure the store is left as it was, the error is logged, and the caller gets it
//! back to show to the user. A failure that arrives after its session ended is not
//! logged as a warning; the caller gets [`StoreError::SessionEnded`] (or `Ok(false)`
//! from [`load`]) and has nothing to show.

use std::cell::RefCell;
use std::rc::Rc;

use crate::auth::{AuthForm, AuthMode};
use crate::gateway::{Gateway, GatewayError};
use crate::models::{Recipe, RecipePatch, UserInfo};
use crate::recipe_store::{RecipeStore, SessionTicket, StoreError};

/// Something that can lend the store out for a synchronous section.
pub trait StoreHandle {
    fn with_store<R>(&self, f: impl FnOnce(&mut RecipeStore) -> R) -> R;
}

impl StoreHandle for Rc<RefCell<RecipeStore>> {
    fn with_store<R>(&self, f: impl FnOnce(&mut RecipeStore) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

fn report<T, H: StoreHandle>(
    store: &H,
    ticket: &SessionTicket,
    what: &str,
    result: Result<T, GatewayError>,
) -> Result<T, StoreError> {
    result.map_err(|e| {
        if !store.with_store(|s| s.is_current(ticket)) {
            tracing::debug!(code = e.code(), "{what} failed after its session ended: {e}");
            return StoreError::SessionEnded;
        }
        tracing::warn!(code = e.code(), "{what} failed: {e}");
        StoreError::Gateway(e)
    })
}

/// Fetch the collection for a freshly signed-in session.
///
/// Returns `Ok(false)` when the session ended before the list arrived. On failure the
/// store still leaves `Loading`, so the user can keep working or [`reload`].
pub async fn load<G: Gateway, H: StoreHandle>(
    gateway: &G,
    store: &H,
    ticket: SessionTicket,
) -> Result<bool, StoreError> {
    let result = gateway.list_recipes(ticket.user_id()).await;
    let recipes = match report(store, &ticket, "Loading recipes", result) {
        Ok(recipes) => recipes,
        Err(StoreError::SessionEnded) => return Ok(false),
        Err(e) => {
            store.with_store(|s| s.apply_load_failed(&ticket, e.to_string()));
            return Err(e);
        }
    };
    let count = recipes.len();
    let applied = store.with_store(|s| s.apply_loaded(&ticket, recipes));
    if applied {
        tracing::info!(count, "recipes loaded");
    }
    Ok(applied)
}

/// Fetch the collection again for the current session.
pub async fn reload<G: Gateway, H: StoreHandle>(gateway: &G, store: &H) -> Result<bool, StoreError> {
    let ticket = store.with_store(|s| s.begin_reload())?;
    load(gateway, store, ticket).await
}

/// Commit the new-recipe draft.
pub async fn add_recipe<G: Gateway, H: StoreHandle>(
    gateway: &G,
    store: &H,
) -> Result<Recipe, StoreError> {
    let (ticket, draft) = store.with_store(|s| {
        let ticket = s.ticket()?;
        let draft = s.new_recipe().clone();
        draft.validate()?;
        Ok::<_, StoreError>((ticket, draft))
    })?;
    let result = gateway.add_recipe(ticket.user_id(), &draft).await;
    let recipe = report(store, &ticket, "Adding recipe", result)?;
    store.with_store(|s| s.apply_added(&ticket, recipe.clone()));
    Ok(recipe)
}

/// Overwrite a stored recipe with `patch`.
pub async fn update_recipe<G: Gateway, H: StoreHandle>(
    gateway: &G,
    store: &H,
    recipe_id: &str,
    patch: &RecipePatch,
) -> Result<Recipe, StoreError> {
    let ticket = store.with_store(|s| s.ticket())?;
    let result = gateway.update_recipe(ticket.user_id(), recipe_id, patch).await;
    let recipe = report(store, &ticket, "Updating recipe", result)?;
    store.with_store(|s| s.apply_updated(&ticket, recipe.clone()));
    Ok(recipe)
}

/// Commit the edits held in the selection.
pub async fn update_selected<G: Gateway, H: StoreHandle>(
    gateway: &G,
    store: &H,
) -> Result<Recipe, StoreError> {
    let selected = store.with_store(|s| s.selected().cloned().ok_or(StoreError::NoSelection))?;
    selected.fields.validate()?;
    update_recipe(gateway, store, &selected.id, &RecipePatch::from(&selected.fields)).await
}

pub async fn delete_recipe<G: Gateway, H: StoreHandle>(
    gateway: &G,
    store: &H,
    recipe_id: &str,
) -> Result<(), StoreError> {
    let ticket = store.with_store(|s| s.ticket())?;
    let result = gateway.delete_recipe(ticket.user_id(), recipe_id).await;
    report(store, &ticket, "Deleting recipe", result)?;
    store.with_store(|s| s.apply_deleted(&ticket, recipe_id));
    Ok(())
}

/// Flip the stored favorite flag. Returns the new value.
pub async fn toggle_favorite<G: Gateway, H: StoreHandle>(
    gateway: &G,
    store: &H,
    recipe_id: &str,
) -> Result<bool, StoreError> {
    let current = store.with_store(|s| {
        s.ticket()?;
        s.recipe(recipe_id).map(|r| r.is_favorite()).ok_or_else(|| {
            StoreError::Gateway(GatewayError::NotFound(format!("No recipe with id {recipe_id}")))
        })
    })?;
    set_favorite(gateway, store, recipe_id, !current).await?;
    Ok(!current)
}

/// Persist `is_favorite` for one recipe; the stored copy and the selection both follow.
pub async fn set_favorite<G: Gateway, H: StoreHandle>(
    gateway: &G,
    store: &H,
    recipe_id: &str,
    is_favorite: bool,
) -> Result<(), StoreError> {
    let ticket = store.with_store(|s| s.ticket())?;
    let result = gateway.set_favorite(ticket.user_id(), recipe_id, is_favorite).await;
    report(store, &ticket, "Updating favorite", result)?;
    store.with_store(|s| s.apply_favorite(&ticket, recipe_id, is_favorite));
    Ok(())
}

/// Log in or register from the auth form.
///
/// The store itself is driven by the auth-state subscription, not by this call.
pub async fn submit_auth<G: Gateway>(gateway: &G, form: &AuthForm) -> Result<UserInfo, GatewayError> {
    let result = match form.mode {
        AuthMode::Login => gateway.login(&form.email, &form.password).await,
        AuthMode::Register => gateway.register(&form.email, &form.password).await,
    };
    match &result {
        Ok(user) => tracing::info!(user = %user.email, mode = ?form.mode, "signed in"),
        Err(e) => tracing::warn!(mode = ?form.mode, "sign-in failed: {e}"),
    }
    result
}

pub async fn logout<G: Gateway>(gateway: &G) -> Result<(), GatewayError> {
    gateway.logout().await.inspect_err(|e| tracing::error!("Error signing out: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGateway;
    use crate::models::{RecipeDraft, RecipeField};
    use crate::recipe_store::Phase;

    type Shared = Rc<RefCell<RecipeStore>>;

    /// Wire a store to the gateway's auth state the way the UI does.
    fn connect(gateway: &MemoryGateway) -> (Shared, Rc<RefCell<Vec<SessionTicket>>>, crate::AuthSubscription) {
        let store: Shared = Rc::default();
        let pending = Rc::new(RefCell::new(Vec::new()));
        let sub = {
            let store = store.clone();
            let pending = pending.clone();
            gateway.subscribe_auth_state(move |user| {
                if let Some(ticket) = store.borrow_mut().on_auth_state(user) {
                    pending.borrow_mut().push(ticket);
                }
            })
        };
        (store, pending, sub)
    }

    async fn drain(gateway: &MemoryGateway, store: &Shared, pending: &Rc<RefCell<Vec<SessionTicket>>>) {
        let tickets: Vec<_> = pending.borrow_mut().drain(..).collect();
        for ticket in tickets {
            load(gateway, store, ticket).await.unwrap();
        }
    }

    fn soup() -> RecipeDraft {
        RecipeDraft {
            name: "Soup".to_string(),
            cooktime: 2,
            ingredients: "water,salt".to_string(),
            directions: "boil".to_string(),
            discovery_year: 2020,
            founder: "Ana".to_string(),
            r#type: "starter".to_string(),
            is_favorite: false,
        }
    }

    fn register_form() -> AuthForm {
        AuthForm {
            email: "chef@example.com".to_string(),
            password: "pw123456".to_string(),
            mode: AuthMode::Register,
            error: None,
        }
    }

    async fn signed_in() -> (MemoryGateway, Shared, crate::AuthSubscription) {
        let gateway = MemoryGateway::new();
        let (store, pending, sub) = connect(&gateway);
        submit_auth(&gateway, &register_form()).await.unwrap();
        drain(&gateway, &store, &pending).await;
        assert_eq!(store.borrow().phase(), Phase::Ready);
        (gateway, store, sub)
    }

    fn fill_new_recipe(store: &Shared, draft: &RecipeDraft) {
        let mut s = store.borrow_mut();
        s.edit_new_recipe(RecipeField::Name(draft.name.clone()));
        s.edit_new_recipe(RecipeField::Cooktime(draft.cooktime));
        s.edit_new_recipe(RecipeField::Ingredients(draft.ingredients.clone()));
        s.edit_new_recipe(RecipeField::Directions(draft.directions.clone()));
        s.edit_new_recipe(RecipeField::DiscoveryYear(draft.discovery_year));
        s.edit_new_recipe(RecipeField::Founder(draft.founder.clone()));
        s.edit_new_recipe(RecipeField::Type(draft.r#type.clone()));
        s.edit_new_recipe(RecipeField::IsFavorite(draft.is_favorite));
    }

    #[tokio::test]
    async fn test_register_add_and_favorite() {
        let (gateway, store, _sub) = signed_in().await;

        fill_new_recipe(&store, &soup());
        let added = add_recipe(&gateway, &store).await.unwrap();
        assert!(!added.id.is_empty());
        assert!(store.borrow().favorites().is_empty());

        assert!(toggle_favorite(&gateway, &store, &added.id).await.unwrap());

        let s = store.borrow();
        let favorites = s.favorites();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, added.id);
        assert!(favorites[0].is_favorite());
        assert_eq!(favorites[0].fields.name, "Soup");
    }

    #[tokio::test]
    async fn test_add_then_reload_matches_server() {
        let (gateway, store, _sub) = signed_in().await;
        fill_new_recipe(&store, &soup());
        let added = add_recipe(&gateway, &store).await.unwrap();

        let user_id = store.borrow().user().unwrap().id.clone();
        let listed = gateway.list_recipes(&user_id).await.unwrap();
        assert_eq!(listed, vec![added.clone()]);
        assert_eq!(listed[0].fields, soup());
        assert_eq!(store.borrow().recipes(), &[added][..]);
    }

    #[tokio::test]
    async fn test_add_rejects_blank_name() {
        let (gateway, store, _sub) = signed_in().await;
        let result = add_recipe(&gateway, &store).await;
        assert!(matches!(result, Err(StoreError::InvalidDraft(_))));
        assert!(store.borrow().recipes().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_id() {
        let (gateway, store, _sub) = signed_in().await;
        fill_new_recipe(&store, &soup());
        add_recipe(&gateway, &store).await.unwrap();
        let before = store.borrow().recipes().to_vec();

        let result = update_recipe(&gateway, &store, "rcp-404", &RecipePatch::favorite(true)).await;
        assert!(matches!(result, Err(StoreError::Gateway(GatewayError::NotFound(_)))));
        assert_eq!(store.borrow().recipes(), &before[..]);
    }

    #[tokio::test]
    async fn test_update_selected_commits_edits() {
        let (gateway, store, _sub) = signed_in().await;
        fill_new_recipe(&store, &soup());
        let added = add_recipe(&gateway, &store).await.unwrap();

        {
            let mut s = store.borrow_mut();
            s.select(&added.id);
            s.edit_selected(RecipeField::Directions("simmer".to_string())).unwrap();
            s.edit_selected(RecipeField::IsFavorite(true)).unwrap();
        }
        let updated = update_selected(&gateway, &store).await.unwrap();
        assert_eq!(updated.fields.directions, "simmer");
        assert_eq!(updated.created_at, added.created_at);

        let s = store.borrow();
        assert_eq!(s.recipe(&added.id), Some(&updated));
        assert_eq!(s.selected(), Some(&updated));
        assert_eq!(s.favorites(), vec![&updated]);
    }

    #[tokio::test]
    async fn test_switching_selection_leaves_stored_record() {
        let (gateway, store, _sub) = signed_in().await;
        fill_new_recipe(&store, &soup());
        let a = add_recipe(&gateway, &store).await.unwrap();
        fill_new_recipe(&store, &soup().with(RecipeField::Name("Stew".to_string())));
        let b = add_recipe(&gateway, &store).await.unwrap();

        {
            let mut s = store.borrow_mut();
            s.select(&a.id);
            s.edit_selected(RecipeField::Name("Changed".to_string())).unwrap();
            s.select(&b.id);
        }
        update_selected(&gateway, &store).await.unwrap();

        let user_id = store.borrow().user().unwrap().id.clone();
        let listed = gateway.list_recipes(&user_id).await.unwrap();
        assert_eq!(listed[0], a);
        assert_eq!(listed[0].fields.name, "Soup");
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let (gateway, store, _sub) = signed_in().await;
        fill_new_recipe(&store, &soup());
        let added = add_recipe(&gateway, &store).await.unwrap();

        assert_eq!(delete_recipe(&gateway, &store, &added.id).await, Ok(()));
        assert_eq!(delete_recipe(&gateway, &store, &added.id).await, Ok(()));
        assert!(store.borrow().recipes().is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_leaves_state() {
        let (gateway, store, _sub) = signed_in().await;
        fill_new_recipe(&store, &soup());
        let added = add_recipe(&gateway, &store).await.unwrap();
        let before = store.borrow().clone();

        gateway.set_offline(true);
        let toggled = toggle_favorite(&gateway, &store, &added.id).await;
        assert!(matches!(toggled, Err(StoreError::Gateway(GatewayError::Network(_)))));
        let deleted = delete_recipe(&gateway, &store, &added.id).await;
        assert!(deleted.is_err());
        fill_new_recipe(&store, &soup());
        let draft_before_add = store.borrow().new_recipe().clone();
        assert!(add_recipe(&gateway, &store).await.is_err());

        let s = store.borrow();
        assert_eq!(s.recipes(), before.recipes());
        assert_eq!(*s.new_recipe(), draft_before_add);
    }

    #[tokio::test]
    async fn test_sign_out_empties_store() {
        let (gateway, store, _sub) = signed_in().await;
        fill_new_recipe(&store, &soup().with(RecipeField::IsFavorite(true)));
        add_recipe(&gateway, &store).await.unwrap();
        assert_eq!(store.borrow().favorites().len(), 1);

        logout(&gateway).await.unwrap();
        let s = store.borrow();
        assert_eq!(s.phase(), Phase::SignedOut);
        assert!(s.recipes().is_empty());
        assert!(s.favorites().is_empty());
    }

    #[tokio::test]
    async fn test_empty_until_first_load() {
        let gateway = MemoryGateway::new();
        let seed = gateway.register("chef@example.com", "pw123456").await.unwrap();
        gateway.add_recipe(&seed.id, &soup()).await.unwrap();
        gateway.logout().await.unwrap();

        let (store, pending, _sub) = connect(&gateway);
        let mut form = register_form();
        form.mode = AuthMode::Login;
        submit_auth(&gateway, &form).await.unwrap();

        assert_eq!(store.borrow().phase(), Phase::Loading);
        assert!(store.borrow().recipes().is_empty());

        drain(&gateway, &store, &pending).await;
        assert_eq!(store.borrow().recipes().len(), 1);
    }

    #[tokio::test]
    async fn test_load_resolving_after_logout_is_dropped() {
        let gateway = MemoryGateway::new();
        let seed = gateway.register("chef@example.com", "pw123456").await.unwrap();
        gateway.add_recipe(&seed.id, &soup()).await.unwrap();
        gateway.logout().await.unwrap();

        let (store, pending, _sub) = connect(&gateway);
        let mut form = register_form();
        form.mode = AuthMode::Login;
        submit_auth(&gateway, &form).await.unwrap();
        let ticket = pending.borrow_mut().pop().unwrap();

        let in_flight = load(&gateway, &store, ticket);
        logout(&gateway).await.unwrap();
        assert_eq!(in_flight.await, Ok(false));

        assert_eq!(store.borrow().phase(), Phase::SignedOut);
        assert!(store.borrow().recipes().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_leaves_session_usable() {
        let gateway = MemoryGateway::new();
        let (store, pending, _sub) = connect(&gateway);
        submit_auth(&gateway, &register_form()).await.unwrap();
        let ticket = pending.borrow_mut().pop().unwrap();

        gateway.set_offline(true);
        let failed = load(&gateway, &store, ticket).await;
        assert_eq!(
            failed,
            Err(StoreError::Gateway(GatewayError::Network("Backend unreachable".to_string())))
        );
        assert_eq!(store.borrow().phase(), Phase::Ready);
        assert_eq!(store.borrow().load_error(), Some("Backend unreachable"));

        gateway.set_offline(false);
        fill_new_recipe(&store, &soup());
        let added = add_recipe(&gateway, &store).await.unwrap();

        assert_eq!(reload(&gateway, &store).await, Ok(true));
        let s = store.borrow();
        assert_eq!(s.phase(), Phase::Ready);
        assert!(s.load_error().is_none());
        assert_eq!(s.recipes(), &[added][..]);
    }

    #[tokio::test]
    async fn test_load_failing_after_logout_is_dropped() {
        let gateway = MemoryGateway::new();
        let (store, pending, _sub) = connect(&gateway);
        submit_auth(&gateway, &register_form()).await.unwrap();
        let ticket = pending.borrow_mut().pop().unwrap();

        let in_flight = load(&gateway, &store, ticket);
        logout(&gateway).await.unwrap();
        gateway.set_offline(true);
        assert_eq!(in_flight.await, Ok(false));

        let s = store.borrow();
        assert_eq!(s.phase(), Phase::SignedOut);
        assert!(s.load_error().is_none());
    }

    #[tokio::test]
    async fn test_mutation_failing_after_logout_reports_session_ended() {
        let (gateway, store, _sub) = signed_in().await;
        fill_new_recipe(&store, &soup());
        let added = add_recipe(&gateway, &store).await.unwrap();
        let ticket = store.borrow().ticket().unwrap();

        logout(&gateway).await.unwrap();
        let late: Result<(), GatewayError> = Err(GatewayError::Auth("Not signed in".to_string()));
        assert_eq!(report(&store, &ticket, "Deleting recipe", late), Err(StoreError::SessionEnded));
        assert!(gateway.list_recipes(ticket.user_id()).await.unwrap().contains(&added));
    }

    #[tokio::test]
    async fn test_set_favorite_uses_requested_value() {
        let (gateway, store, _sub) = signed_in().await;
        fill_new_recipe(&store, &soup());
        let added = add_recipe(&gateway, &store).await.unwrap();
        {
            let mut s = store.borrow_mut();
            s.select(&added.id);
            s.edit_selected(RecipeField::IsFavorite(true)).unwrap();
        }

        // The panel shows the edited flag as on; switching it off must stay off.
        set_favorite(&gateway, &store, &added.id, false).await.unwrap();
        let s = store.borrow();
        assert!(!s.recipe(&added.id).unwrap().is_favorite());
        assert!(!s.selected().unwrap().is_favorite());
        assert!(s.favorites().is_empty());
    }

    #[tokio::test]
    async fn test_reload_requires_session() {
        let gateway = MemoryGateway::new();
        let store: Shared = Rc::default();
        assert_eq!(reload(&gateway, &store).await, Err(StoreError::NotSignedIn));
    }

    #[tokio::test]
    async fn test_mutation_requires_session() {
        let gateway = MemoryGateway::new();
        let store: Shared = Rc::default();
        assert_eq!(
            delete_recipe(&gateway, &store, "rcp-1").await,
            Err(StoreError::NotSignedIn)
        );
        assert_eq!(
            update_selected(&gateway, &store).await,
            Err(StoreError::NoSelection)
        );
    }

    #[tokio::test]
    async fn test_submit_auth_reports_auth_error() {
        let gateway = MemoryGateway::new();
        let mut form = register_form();
        form.mode = AuthMode::Login;
        let err = submit_auth(&gateway, &form).await.unwrap_err();
        assert!(matches!(err, GatewayError::Auth(_)));
        assert_eq!(err.to_string(), "Invalid email or password");
    }
}
