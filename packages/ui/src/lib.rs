//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const CATALOG_CSS: Asset = asset!("/assets/catalog.css");

mod store_handle;
pub use store_handle::{use_gateway, use_recipe_store, SignalStore};

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

mod auth_form;
pub use auth_form::AuthForm;

pub mod notifications;
pub use notifications::{notify, use_notifications, NotificationLevel, NotificationPanel, Notifications};

mod recipe_card;
pub use recipe_card::{ingredients_preview, RecipeCard};

mod recipe_form;
pub use recipe_form::RecipeForm;

mod recipe_detail;
pub use recipe_detail::RecipeDetail;

mod recipe_gallery;
pub use recipe_gallery::RecipeGallery;
