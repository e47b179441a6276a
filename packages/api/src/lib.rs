//! # API crate: shared fullstack server functions for the recipe catalog
//!
//! This crate is the backend boundary of the workspace. It defines every Dioxus server
//! function the frontend calls, and [`ApiGateway`], the client-side implementation of
//! [`store::Gateway`] that calls them.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` (contents) | Argon2 password hashing, session key, per-request ownership check |
//! | [`config`] | none | [`config::BackendConfig`] read from the environment |
//! | [`db`] | `server` (contents) | PostgreSQL connection pool (lazy `OnceCell` singleton) |
//! | [`error`] | none | [`store::GatewayError`] ⇄ [`ServerFnError`] mapping |
//! | [`models`] | none | `users`/`recipes` rows and their client-safe projections |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with full server logic
//! (behind `#[cfg(feature = "server")]`) and once as a thin client stub that simply
//! forwards the call over HTTP.
//!
//! - **Authentication**: `get_current_user`, `register`, `login`, `logout`
//! - **Recipes** (scoped to the session user): `list_recipes`, `add_recipe`,
//!   `update_recipe`, `delete_recipe`, `set_favorite`
//!
//! Errors carry a [`store::GatewayError`] kind tag so the client can tell an auth failure
//! from a missing recipe from an unreachable backend.

use dioxus::prelude::*;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
mod gateway;
pub mod models;

pub use gateway::ApiGateway;
pub use models::UserInfo;
pub use store::{Recipe, RecipeDraft, RecipePatch};

#[cfg(feature = "server")]
use error::{internal, to_server_error};

#[cfg(feature = "server")]
fn recipe_not_found(recipe_id: &str) -> ServerFnError {
    to_server_error(store::GatewayError::NotFound(format!(
        "No recipe with id {recipe_id}"
    )))
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let Some(user_id) = auth::session_user_id(&session).await? else {
        return Ok(None);
    };

    let pool = get_pool().await.map_err(internal)?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(internal)?;

    Ok(user.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Register a new user with email and password, and sign them in.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn register(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let email = store::auth::normalize_email(&email);
    store::auth::validate_registration(&email, &password).map_err(to_server_error)?;

    let pool = get_pool().await.map_err(internal)?;

    // Check if user already exists
    let existing: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(internal)?;

    if existing.is_some() {
        return Err(to_server_error(store::auth::email_in_use()));
    }

    let password_hash = auth::hash_password(&password).map_err(internal)?;

    let user: models::User = sqlx::query_as(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING *",
    )
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        // Lost a race with a concurrent registration for the same address.
        if e.as_database_error().is_some_and(|d| d.is_unique_violation()) {
            to_server_error(store::auth::email_in_use())
        } else {
            internal(e)
        }
    })?;

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(internal)?;

    tracing::info!(user = %user.email, "account created");
    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login", session: tower_sessions::Session)]
pub async fn login(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let email = store::auth::normalize_email(&email);

    let pool = get_pool().await.map_err(internal)?;

    let user: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(internal)?;

    let Some(user) = user else {
        return Err(to_server_error(store::auth::invalid_credentials()));
    };

    let valid = auth::verify_password(&password, &user.password_hash).map_err(internal)?;

    if !valid {
        return Err(to_server_error(store::auth::invalid_credentials()));
    }

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(internal)?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session.flush().await.map_err(internal)?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// List the user's recipes in the order they were added.
#[cfg(feature = "server")]
#[get("/api/users/:user_id/recipes", session: tower_sessions::Session)]
pub async fn list_recipes(user_id: String) -> Result<Vec<Recipe>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::RecipeRow;

    let owner = auth::authorize(&session, &user_id).await?;
    let pool = get_pool().await.map_err(internal)?;

    let rows: Vec<RecipeRow> =
        sqlx::query_as("SELECT * FROM recipes WHERE user_id = $1 ORDER BY seq")
            .bind(owner)
            .fetch_all(pool)
            .await
            .map_err(internal)?;

    Ok(rows.iter().map(RecipeRow::to_recipe).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/users/:user_id/recipes")]
pub async fn list_recipes(user_id: String) -> Result<Vec<Recipe>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Store a new recipe; the server assigns `id` and `created_at`.
#[cfg(feature = "server")]
#[post("/api/recipes/add", session: tower_sessions::Session)]
pub async fn add_recipe(user_id: String, draft: RecipeDraft) -> Result<Recipe, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::{cooktime_column, RecipeRow};

    let owner = auth::authorize(&session, &user_id).await?;
    let pool = get_pool().await.map_err(internal)?;

    let row: RecipeRow = sqlx::query_as(
        "INSERT INTO recipes (user_id, name, cooktime, ingredients, directions, discovery_year, founder, type, is_favorite)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING *",
    )
    .bind(owner)
    .bind(&draft.name)
    .bind(cooktime_column(draft.cooktime.max(1)))
    .bind(&draft.ingredients)
    .bind(&draft.directions)
    .bind(draft.discovery_year)
    .bind(&draft.founder)
    .bind(&draft.r#type)
    .bind(draft.is_favorite)
    .fetch_one(pool)
    .await
    .map_err(internal)?;

    Ok(row.to_recipe())
}

#[cfg(not(feature = "server"))]
#[post("/api/recipes/add")]
pub async fn add_recipe(user_id: String, draft: RecipeDraft) -> Result<Recipe, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Overwrite the fields present in `patch` and return the merged recipe.
#[cfg(feature = "server")]
#[post("/api/recipes/update", session: tower_sessions::Session)]
pub async fn update_recipe(
    user_id: String,
    recipe_id: String,
    patch: RecipePatch,
) -> Result<Recipe, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::{cooktime_column, RecipeRow};

    let owner = auth::authorize(&session, &user_id).await?;
    let Ok(id) = uuid::Uuid::parse_str(&recipe_id) else {
        return Err(recipe_not_found(&recipe_id));
    };
    let pool = get_pool().await.map_err(internal)?;

    let row: Option<RecipeRow> = sqlx::query_as(
        "UPDATE recipes SET
            name = COALESCE($3, name),
            cooktime = COALESCE($4, cooktime),
            ingredients = COALESCE($5, ingredients),
            directions = COALESCE($6, directions),
            discovery_year = COALESCE($7, discovery_year),
            founder = COALESCE($8, founder),
            type = COALESCE($9, type),
            is_favorite = COALESCE($10, is_favorite),
            updated_at = NOW()
         WHERE user_id = $1 AND id = $2
         RETURNING *",
    )
    .bind(owner)
    .bind(id)
    .bind(&patch.name)
    .bind(patch.cooktime.map(|h| cooktime_column(h.max(1))))
    .bind(&patch.ingredients)
    .bind(&patch.directions)
    .bind(patch.discovery_year)
    .bind(&patch.founder)
    .bind(&patch.r#type)
    .bind(patch.is_favorite)
    .fetch_optional(pool)
    .await
    .map_err(internal)?;

    row.map(|r| r.to_recipe())
        .ok_or_else(|| recipe_not_found(&recipe_id))
}

#[cfg(not(feature = "server"))]
#[post("/api/recipes/update")]
pub async fn update_recipe(
    user_id: String,
    recipe_id: String,
    patch: RecipePatch,
) -> Result<Recipe, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete a recipe. Deleting an id that does not exist succeeds.
#[cfg(feature = "server")]
#[post("/api/recipes/delete", session: tower_sessions::Session)]
pub async fn delete_recipe(user_id: String, recipe_id: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let owner = auth::authorize(&session, &user_id).await?;
    let Ok(id) = uuid::Uuid::parse_str(&recipe_id) else {
        return Ok(());
    };
    let pool = get_pool().await.map_err(internal)?;

    sqlx::query("DELETE FROM recipes WHERE user_id = $1 AND id = $2")
        .bind(owner)
        .bind(id)
        .execute(pool)
        .await
        .map_err(internal)?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/recipes/delete")]
pub async fn delete_recipe(user_id: String, recipe_id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Persist only the favorite flag.
#[cfg(feature = "server")]
#[post("/api/recipes/favorite", session: tower_sessions::Session)]
pub async fn set_favorite(
    user_id: String,
    recipe_id: String,
    is_favorite: bool,
) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let owner = auth::authorize(&session, &user_id).await?;
    let Ok(id) = uuid::Uuid::parse_str(&recipe_id) else {
        return Err(recipe_not_found(&recipe_id));
    };
    let pool = get_pool().await.map_err(internal)?;

    let result = sqlx::query(
        "UPDATE recipes SET is_favorite = $3, updated_at = NOW() WHERE user_id = $1 AND id = $2",
    )
    .bind(owner)
    .bind(id)
    .bind(is_favorite)
    .execute(pool)
    .await
    .map_err(internal)?;

    if result.rows_affected() == 0 {
        return Err(recipe_not_found(&recipe_id));
    }
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/recipes/favorite")]
pub async fn set_favorite(
    user_id: String,
    recipe_id: String,
    is_favorite: bool,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
