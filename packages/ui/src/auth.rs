//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] owns the per-app state: the gateway, the recipe store, who is signed
//! in, and the notification list. It subscribes to auth changes for exactly as long as
//! it is mounted and feeds every change into the store, which starts a fresh load.

use std::cell::RefCell;
use std::rc::Rc;

use api::{ApiGateway, UserInfo};
use dioxus::prelude::*;
use store::{actions, Gateway, RecipeStore};

use crate::notifications::{notify, NotificationLevel, Notifications};
use crate::store_handle::{use_gateway, SignalStore};

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    /// True until the server has told us whether a session already exists.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication and recipe state.
/// Wrap your app with this component.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let gateway = use_context_provider(ApiGateway::new);
    let mut auth_state = use_signal(AuthState::default);
    let mut recipes = use_signal(RecipeStore::new);
    let mut notifications = use_signal(Notifications::default);
    use_context_provider(|| auth_state);
    use_context_provider(|| recipes);
    use_context_provider(|| notifications);

    let subscription = use_hook({
        let gateway = gateway.clone();
        move || {
            let subscription = gateway.subscribe_auth_state(move |user| {
                if auth_state.peek().user.as_ref() != user {
                    auth_state.write().user = user.cloned();
                }
            });
            Rc::new(RefCell::new(Some(subscription)))
        }
    });
    use_drop(move || {
        subscription.borrow_mut().take();
    });

    // Pick up a session that survived a reload.
    let restorer = gateway.clone();
    let _ = use_resource(move || {
        let gateway = restorer.clone();
        async move {
            if let Err(e) = gateway.refresh().await {
                tracing::warn!("Could not restore session: {e}");
            }
            auth_state.write().loading = false;
        }
    });

    let loader = gateway.clone();
    use_effect(move || {
        let user = auth_state.read().user.clone();
        let Some(ticket) = recipes.write().on_auth_state(user.as_ref()) else {
            return;
        };
        let gateway = loader.clone();
        spawn(async move {
            if let Err(e) = actions::load(&gateway, &SignalStore(recipes), ticket).await {
                notify(
                    &mut notifications,
                    NotificationLevel::Error,
                    &format!("Error loading recipes: {e}"),
                );
            }
        });
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let gateway = use_gateway();
    let mut notifications = crate::use_notifications();

    let onclick = move |_| {
        let gateway = gateway.clone();
        async move {
            if let Err(e) = actions::logout(&gateway).await {
                notify(
                    &mut notifications,
                    NotificationLevel::Error,
                    &format!("Error signing out: {e}"),
                );
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
