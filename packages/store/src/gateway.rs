//! # Gateway: the backend boundary
//!
//! [`Gateway`] is the async interface the recipe store talks to. It covers two hosted
//! concerns: authentication (register, login, logout, auth-state subscription) and the
//! per-user recipe collection (list, add, update, delete, set favorite). Implementations
//! live in [`crate::MemoryGateway`] (in-process, used by the tests) and in the
//! `api` crate (Dioxus server functions).
//!
//! Errors are reported as [`GatewayError`] and are passed through unchanged. When an
//! error has to travel inside an opaque string (a server-function error body), use
//! [`GatewayError::encode`] on one side and [`GatewayError::decode`] on the other.
//!
//! ## Auth-state subscription
//!
//! [`AuthListeners`] is a small registry shared by every implementation. Subscribing
//! immediately invokes the callback with the current user and returns an
//! [`AuthSubscription`]; the registration lives exactly as long as that guard.

use std::cell::RefCell;
use std::future::Future;
use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::models::{Recipe, RecipeDraft, RecipePatch, UserInfo};

/// Failure reported by the backend collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Bad credentials, duplicate email, weak password, or a request outside the session's scope.
    #[error("{0}")]
    Auth(String),
    /// The recipe to mutate does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The collaborator could not be reached.
    #[error("{0}")]
    Network(String),
}

impl GatewayError {
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Auth(_) => "auth",
            GatewayError::NotFound(_) => "not-found",
            GatewayError::Network(_) => "network",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            GatewayError::Auth(m) | GatewayError::NotFound(m) | GatewayError::Network(m) => m,
        }
    }

    /// Render as `"[code] message"`.
    pub fn encode(&self) -> String {
        format!("[{}] {}", self.code(), self.message())
    }

    /// Recover an error from text containing an [`encode`](Self::encode)d error.
    ///
    /// Transport layers may wrap the text with their own prefix, so the tag is searched
    /// for anywhere in `text`; the earliest tag wins and everything after it is the
    /// message. Text without a recognised tag is a network failure.
    pub fn decode(text: &str) -> Self {
        let tags = [
            ("[auth] ", GatewayError::Auth as fn(String) -> GatewayError),
            ("[not-found] ", GatewayError::NotFound),
            ("[network] ", GatewayError::Network),
        ];
        let first = tags
            .iter()
            .filter_map(|(tag, make)| text.find(tag).map(|pos| (pos, tag.len(), make)))
            .min_by_key(|(pos, _, _)| *pos);
        match first {
            Some((pos, len, make)) => make(text[pos + len..].trim_end().to_string()),
            None => GatewayError::Network(text.to_string()),
        }
    }
}

type Listener = Box<dyn FnMut(Option<&UserInfo>)>;

#[derive(Default)]
struct ListenerTable {
    current: Option<UserInfo>,
    next_id: u64,
    entries: Vec<(u64, Rc<RefCell<Listener>>)>,
}

/// Registry of auth-state callbacks plus the current user.
#[derive(Clone, Default)]
pub struct AuthListeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl std::fmt::Debug for AuthListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.table.borrow();
        f.debug_struct("AuthListeners")
            .field("current", &table.current)
            .field("listeners", &table.entries.len())
            .finish()
    }
}

impl AuthListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<UserInfo> {
        self.table.borrow().current.clone()
    }

    /// Register `callback` and call it once with the current user.
    pub fn subscribe(&self, callback: impl FnMut(Option<&UserInfo>) + 'static) -> AuthSubscription {
        let listener: Rc<RefCell<Listener>> = Rc::new(RefCell::new(Box::new(callback)));
        let (id, current) = {
            let mut table = self.table.borrow_mut();
            let id = table.next_id;
            table.next_id += 1;
            table.entries.push((id, listener.clone()));
            (id, table.current.clone())
        };
        {
            let mut callback = listener.borrow_mut();
            (*callback)(current.as_ref());
        }
        AuthSubscription {
            id,
            table: Rc::downgrade(&self.table),
        }
    }

    /// Record a sign-in (`Some`) or sign-out (`None`) and notify listeners.
    ///
    /// Listeners are not notified when the user did not change.
    pub fn set_user(&self, user: Option<UserInfo>) {
        let listeners: Vec<_> = {
            let mut table = self.table.borrow_mut();
            if table.current == user {
                return;
            }
            table.current = user.clone();
            table.entries.iter().map(|(_, l)| l.clone()).collect()
        };
        // The table borrow is released so callbacks may subscribe or unsubscribe.
        for listener in listeners {
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (*callback)(user.as_ref());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.table.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Live auth-state registration. Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct AuthSubscription {
    id: u64,
    table: Weak<RefCell<ListenerTable>>,
}

impl AuthSubscription {
    /// Release the registration now.
    pub fn unsubscribe(self) {}
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            if let Ok(mut table) = table.try_borrow_mut() {
                table.entries.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

/// Async backend operations used by the recipe store.
pub trait Gateway {
    fn register(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<UserInfo, GatewayError>>;

    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<UserInfo, GatewayError>>;

    fn logout(&self) -> impl Future<Output = Result<(), GatewayError>>;

    fn current_user(&self) -> Option<UserInfo>;

    fn subscribe_auth_state(
        &self,
        callback: impl FnMut(Option<&UserInfo>) + 'static,
    ) -> AuthSubscription;

    /// All of the user's recipes, in arrival order.
    fn list_recipes(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<Recipe>, GatewayError>>;

    fn add_recipe(
        &self,
        user_id: &str,
        draft: &RecipeDraft,
    ) -> impl Future<Output = Result<Recipe, GatewayError>>;

    fn update_recipe(
        &self,
        user_id: &str,
        recipe_id: &str,
        patch: &RecipePatch,
    ) -> impl Future<Output = Result<Recipe, GatewayError>>;

    /// Deleting a missing id succeeds.
    fn delete_recipe(
        &self,
        user_id: &str,
        recipe_id: &str,
    ) -> impl Future<Output = Result<(), GatewayError>>;

    fn set_favorite(
        &self,
        user_id: &str,
        recipe_id: &str,
        is_favorite: bool,
    ) -> impl Future<Output = Result<(), GatewayError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chef() -> UserInfo {
        UserInfo {
            id: "u1".to_string(),
            email: "chef@example.com".to_string(),
        }
    }

    #[test]
    fn test_encode_decode() {
        let err = GatewayError::NotFound("Recipe rcp-9 not found".to_string());
        assert_eq!(err.encode(), "[not-found] Recipe rcp-9 not found");
        assert_eq!(GatewayError::decode(&err.encode()), err);

        let wrapped = format!("error running server function: {}", GatewayError::Auth("bad".into()).encode());
        assert_eq!(GatewayError::decode(&wrapped), GatewayError::Auth("bad".into()));

        assert_eq!(
            GatewayError::decode("connection refused"),
            GatewayError::Network("connection refused".into())
        );
    }

    #[test]
    fn test_decode_ignores_tags_inside_message() {
        let err = GatewayError::NotFound("No recipe with id x[auth] y".to_string());
        assert_eq!(GatewayError::decode(&err.encode()), err);

        let wrapped = format!("server error: {}", GatewayError::Network("see [not-found] z".into()).encode());
        assert_eq!(
            GatewayError::decode(&wrapped),
            GatewayError::Network("see [not-found] z".into())
        );
    }

    #[test]
    fn test_subscribe_delivers_current_immediately() {
        let listeners = AuthListeners::new();
        listeners.set_user(Some(chef()));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = listeners.subscribe(move |u| sink.borrow_mut().push(u.cloned()));

        assert_eq!(*seen.borrow(), vec![Some(chef())]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let listeners = AuthListeners::new();
        let seen = Rc::new(RefCell::new(0));
        let sink = seen.clone();
        let sub = listeners.subscribe(move |_| *sink.borrow_mut() += 1);
        assert_eq!(listeners.len(), 1);

        listeners.set_user(Some(chef()));
        assert_eq!(*seen.borrow(), 2);

        drop(sub);
        assert!(listeners.is_empty());
        listeners.set_user(None);
        assert_eq!(*seen.borrow(), 2);
    }

    #[test]
    fn test_set_user_skips_unchanged() {
        let listeners = AuthListeners::new();
        let seen = Rc::new(RefCell::new(0));
        let sink = seen.clone();
        let _sub = listeners.subscribe(move |_| *sink.borrow_mut() += 1);
        listeners.set_user(None);
        assert_eq!(*seen.borrow(), 1);
    }
}
