//! Recipe rows as stored in the `recipes` table.
//!
//! Each row belongs to exactly one user (`user_id`); `seq` records arrival order so a
//! listing comes back in the order recipes were added.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use store::{Recipe, RecipeDraft};

/// Full recipe record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub seq: i64,
    pub name: String,
    pub cooktime: i32,
    pub ingredients: String,
    pub directions: String,
    pub discovery_year: i32,
    pub founder: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecipeRow {
    /// Convert to the client-facing recipe.
    pub fn to_recipe(&self) -> Recipe {
        Recipe {
            id: self.id.to_string(),
            created_at: self.created_at,
            fields: RecipeDraft {
                name: self.name.clone(),
                cooktime: u32::try_from(self.cooktime).unwrap_or(1),
                ingredients: self.ingredients.clone(),
                directions: self.directions.clone(),
                discovery_year: self.discovery_year,
                founder: self.founder.clone(),
                r#type: self.kind.clone(),
                is_favorite: self.is_favorite,
            },
        }
    }
}

/// Postgres has no unsigned integers; clamp cook time into `INTEGER`.
pub fn cooktime_column(hours: u32) -> i32 {
    i32::try_from(hours).unwrap_or(i32::MAX)
}
