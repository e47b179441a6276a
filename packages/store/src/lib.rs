pub mod actions;
pub mod auth;
pub mod config;
pub mod gateway;
pub mod models;
pub mod recipe_store;

mod memory;
pub use memory::MemoryGateway;

pub use auth::{AuthForm, AuthMode};
pub use config::{CatalogConfig, GalleryFilter};
pub use gateway::{AuthListeners, AuthSubscription, Gateway, GatewayError};
pub use models::{Recipe, RecipeDraft, RecipeField, RecipePatch, UserInfo};
pub use recipe_store::{Phase, RecipeStore, SessionTicket, StoreError};
pub use actions::StoreHandle;
