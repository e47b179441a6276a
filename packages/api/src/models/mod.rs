//! Data models for the application.

#[cfg(feature = "server")]
mod recipe;
mod user;

#[cfg(feature = "server")]
pub use recipe::{cooktime_column, RecipeRow};
#[cfg(feature = "server")]
pub use user::User;
pub use user::UserInfo;
