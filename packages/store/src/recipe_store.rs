//! # RecipeStore: client-held recipe state for one session
//!
//! [`RecipeStore`] holds the signed-in user's recipe collection, the selected recipe
//! (with its unsaved edits), and the new-recipe draft. It never talks to the backend
//! itself; the async intents in [`crate::actions`] do the gateway call and then hand the
//! authoritative result back through one of the `apply_*` methods.
//!
//! ## Phases
//!
//! | Phase | Entered on | Collection |
//! |-------|-----------|------------|
//! | [`Phase::SignedOut`] | start, or any sign-out | empty |
//! | [`Phase::Loading`] | sign-in ([`on_auth_state`](RecipeStore::on_auth_state) with a user) | empty |
//! | [`Phase::Ready`] | [`apply_loaded`](RecipeStore::apply_loaded) with a current ticket | populated |
//! | [`Phase::Ready`] | [`apply_load_failed`](RecipeStore::apply_load_failed) with a current ticket | empty, [`load_error`](RecipeStore::load_error) set |
//!
//! A failed load still ends in `Ready` so the user can add recipes or retry through
//! [`begin_reload`](RecipeStore::begin_reload).
//!
//! ## Session tickets
//!
//! Every auth transition bumps an epoch. A [`SessionTicket`] captures the epoch and the
//! user id at the moment an intent starts; `apply_*` ignores (and returns `false` for)
//! results whose ticket is no longer current, so a response that lands after sign-out
//! or after a different user signs in is dropped.
//!
//! ## Favorites
//!
//! [`favorites`](RecipeStore::favorites) filters the collection on every read. There is
//! no separate favorites list to keep in sync.

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::models::{Recipe, RecipeDraft, RecipeField, UserInfo};

/// Why an intent could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("Not signed in")]
    NotSignedIn,
    #[error("Recipes are still loading")]
    NotReady,
    #[error("No recipe selected")]
    NoSelection,
    #[error("{0}")]
    InvalidDraft(String),
    /// The session the intent started in is over; the result was dropped.
    #[error("Session ended")]
    SessionEnded,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    SignedOut,
    Loading,
    Ready,
}

/// Identifies the session an in-flight intent belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionTicket {
    epoch: u64,
    user_id: String,
}

impl SessionTicket {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecipeStore {
    phase: Phase,
    epoch: u64,
    user: Option<UserInfo>,
    recipes: Vec<Recipe>,
    selected: Option<Recipe>,
    new_recipe: RecipeDraft,
    load_error: Option<String>,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    /// Why the last load failed, until the next successful one.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn favorites(&self) -> Vec<&Recipe> {
        self.recipes.iter().filter(|r| r.is_favorite()).collect()
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// The selected recipe including any unsaved edits.
    pub fn selected(&self) -> Option<&Recipe> {
        self.selected.as_ref()
    }

    pub fn new_recipe(&self) -> &RecipeDraft {
        &self.new_recipe
    }

    /// Feed an auth-state notification into the store.
    ///
    /// Returns a ticket when a load should start. A repeated notification for the
    /// already signed-in user changes nothing.
    pub fn on_auth_state(&mut self, user: Option<&UserInfo>) -> Option<SessionTicket> {
        if self.user.as_ref() == user {
            return None;
        }
        self.epoch += 1;
        self.load_error = None;
        self.recipes.clear();
        self.selected = None;
        self.new_recipe = RecipeDraft::default();
        match user {
            Some(user) => {
                tracing::debug!(user = %user.email, "session started, loading recipes");
                self.user = Some(user.clone());
                self.phase = Phase::Loading;
                Some(SessionTicket {
                    epoch: self.epoch,
                    user_id: user.id.clone(),
                })
            }
            None => {
                tracing::debug!("session ended, recipes cleared");
                self.user = None;
                self.phase = Phase::SignedOut;
                None
            }
        }
    }

    /// Ticket for a mutation against the current session.
    pub fn ticket(&self) -> Result<SessionTicket, StoreError> {
        let Some(user) = &self.user else {
            return Err(StoreError::NotSignedIn);
        };
        if self.phase != Phase::Ready {
            return Err(StoreError::NotReady);
        }
        Ok(SessionTicket {
            epoch: self.epoch,
            user_id: user.id.clone(),
        })
    }

    pub fn is_current(&self, ticket: &SessionTicket) -> bool {
        ticket.epoch == self.epoch
            && self.user.as_ref().is_some_and(|u| u.id == ticket.user_id)
    }

    fn stale(&self, ticket: &SessionTicket, what: &str) -> bool {
        if self.is_current(ticket) {
            return false;
        }
        tracing::debug!(epoch = ticket.epoch, "discarding {what} result from an ended session");
        true
    }

    pub fn apply_loaded(&mut self, ticket: &SessionTicket, recipes: Vec<Recipe>) -> bool {
        if self.stale(ticket, "load") {
            return false;
        }
        self.recipes = recipes;
        self.load_error = None;
        self.phase = Phase::Ready;
        true
    }

    /// Leave `Loading` after a failed fetch, keeping whatever was already shown.
    pub fn apply_load_failed(&mut self, ticket: &SessionTicket, message: String) -> bool {
        if self.stale(ticket, "load") {
            return false;
        }
        self.load_error = Some(message);
        self.phase = Phase::Ready;
        true
    }

    /// Start fetching the collection again for the signed-in user.
    pub fn begin_reload(&mut self) -> Result<SessionTicket, StoreError> {
        let Some(user) = &self.user else {
            return Err(StoreError::NotSignedIn);
        };
        let ticket = SessionTicket {
            epoch: self.epoch,
            user_id: user.id.clone(),
        };
        self.phase = Phase::Loading;
        self.load_error = None;
        Ok(ticket)
    }

    /// Append the server copy and reset the new-recipe form.
    pub fn apply_added(&mut self, ticket: &SessionTicket, recipe: Recipe) -> bool {
        if self.stale(ticket, "add") {
            return false;
        }
        self.recipes.push(recipe);
        self.new_recipe = RecipeDraft::default();
        true
    }

    /// Replace with the server copy; a matching selection is refreshed from it too.
    pub fn apply_updated(&mut self, ticket: &SessionTicket, recipe: Recipe) -> bool {
        if self.stale(ticket, "update") {
            return false;
        }
        if let Some(slot) = self.recipes.iter_mut().find(|r| r.id == recipe.id) {
            *slot = recipe.clone();
        }
        if self.selected.as_ref().is_some_and(|s| s.id == recipe.id) {
            self.selected = Some(recipe);
        }
        true
    }

    pub fn apply_deleted(&mut self, ticket: &SessionTicket, recipe_id: &str) -> bool {
        if self.stale(ticket, "delete") {
            return false;
        }
        self.recipes.retain(|r| r.id != recipe_id);
        if self.selected.as_ref().is_some_and(|s| s.id == recipe_id) {
            self.selected = None;
        }
        true
    }

    /// Set the stored flag; the selection's flag follows without touching its other edits.
    pub fn apply_favorite(&mut self, ticket: &SessionTicket, recipe_id: &str, is_favorite: bool) -> bool {
        if self.stale(ticket, "favorite") {
            return false;
        }
        if let Some(slot) = self.recipes.iter_mut().find(|r| r.id == recipe_id) {
            slot.fields.is_favorite = is_favorite;
        }
        if let Some(selected) = self.selected.as_mut().filter(|s| s.id == recipe_id) {
            selected.fields.is_favorite = is_favorite;
        }
        true
    }

    /// Select a stored recipe, discarding unsaved edits to any previous selection.
    pub fn select(&mut self, recipe_id: &str) -> bool {
        match self.recipe(recipe_id).cloned() {
            Some(recipe) => {
                self.selected = Some(recipe);
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn edit_selected(&mut self, field: RecipeField) -> Result<(), StoreError> {
        let selected = self.selected.as_ref().ok_or(StoreError::NoSelection)?;
        self.selected = Some(selected.with(field));
        Ok(())
    }

    pub fn edit_new_recipe(&mut self, field: RecipeField) {
        self.new_recipe = self.new_recipe.with(field);
    }
}
