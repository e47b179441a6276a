//! # Domain models for users and recipes
//!
//! Defines the data structures that cross the [`crate::Gateway`] boundary and that the
//! [`crate::RecipeStore`] holds. All of them are `Serialize + Deserialize` so they can
//! travel through Dioxus server functions unchanged.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`UserInfo`] | The signed-in identity handle issued by the auth collaborator. |
//! | [`RecipeDraft`] | The user-editable field set of a recipe. Used for the new-recipe form and as the body of a stored [`Recipe`]. |
//! | [`Recipe`] | A persisted recipe: server-assigned `id` and `created_at` plus a flattened [`RecipeDraft`]. |
//! | [`RecipePatch`] | A partial overwrite; absent fields are left as stored. |
//! | [`RecipeField`] | One named field with its new value, applied with [`RecipeDraft::with`]. |
//!
//! Field names on the wire are camelCase (`discoveryYear`, `isFavorite`, `createdAt`)
//! to match the per-user document layout.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::recipe_store::StoreError;

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
}

/// The editable fields of a recipe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: String,
    /// Cook time in whole hours, at least 1.
    pub cooktime: u32,
    pub ingredients: String,
    pub directions: String,
    pub discovery_year: i32,
    pub founder: String,
    pub r#type: String,
    pub is_favorite: bool,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            cooktime: 1,
            ingredients: String::new(),
            directions: String::new(),
            discovery_year: current_year(),
            founder: String::new(),
            r#type: String::new(),
            is_favorite: false,
        }
    }
}

impl RecipeDraft {
    /// Return a copy of this draft with `field` overwritten.
    pub fn with(&self, field: RecipeField) -> Self {
        let mut next = self.clone();
        match field {
            RecipeField::Name(v) => next.name = v,
            RecipeField::Cooktime(v) => next.cooktime = v,
            RecipeField::Ingredients(v) => next.ingredients = v,
            RecipeField::Directions(v) => next.directions = v,
            RecipeField::DiscoveryYear(v) => next.discovery_year = v,
            RecipeField::Founder(v) => next.founder = v,
            RecipeField::Type(v) => next.r#type = v,
            RecipeField::IsFavorite(v) => next.is_favorite = v,
        }
        next
    }

    /// Check the draft can be committed.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::InvalidDraft(
                "Please provide a recipe name".to_string(),
            ));
        }
        if self.cooktime < 1 {
            return Err(StoreError::InvalidDraft(
                "Cook time must be at least 1 hour".to_string(),
            ));
        }
        Ok(())
    }
}

/// A stored recipe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Server-assigned, unique within the owner's collection.
    pub id: String,
    /// Server-assigned creation time.
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: RecipeDraft,
}

impl Recipe {
    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn is_favorite(&self) -> bool {
        self.fields.is_favorite
    }

    /// Apply the present fields of `patch`, keeping identity and timestamps.
    pub fn merged(&self, patch: &RecipePatch) -> Self {
        let mut fields = self.fields.clone();
        if let Some(v) = &patch.name {
            fields.name = v.clone();
        }
        if let Some(v) = patch.cooktime {
            fields.cooktime = v;
        }
        if let Some(v) = &patch.ingredients {
            fields.ingredients = v.clone();
        }
        if let Some(v) = &patch.directions {
            fields.directions = v.clone();
        }
        if let Some(v) = patch.discovery_year {
            fields.discovery_year = v;
        }
        if let Some(v) = &patch.founder {
            fields.founder = v.clone();
        }
        if let Some(v) = &patch.r#type {
            fields.r#type = v.clone();
        }
        if let Some(v) = patch.is_favorite {
            fields.is_favorite = v;
        }
        Self {
            id: self.id.clone(),
            created_at: self.created_at,
            fields,
        }
    }

    /// Return a copy with `field` overwritten.
    pub fn with(&self, field: RecipeField) -> Self {
        Self {
            id: self.id.clone(),
            created_at: self.created_at,
            fields: self.fields.with(field),
        }
    }
}

/// Partial recipe overwrite. `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooktime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl RecipePatch {
    /// Patch that only touches the favorite flag.
    pub fn favorite(is_favorite: bool) -> Self {
        Self {
            is_favorite: Some(is_favorite),
            ..Self::default()
        }
    }
}

impl From<&RecipeDraft> for RecipePatch {
    fn from(draft: &RecipeDraft) -> Self {
        Self {
            name: Some(draft.name.clone()),
            cooktime: Some(draft.cooktime),
            ingredients: Some(draft.ingredients.clone()),
            directions: Some(draft.directions.clone()),
            discovery_year: Some(draft.discovery_year),
            founder: Some(draft.founder.clone()),
            r#type: Some(draft.r#type.clone()),
            is_favorite: Some(draft.is_favorite),
        }
    }
}

/// A single form field and its new value.
#[derive(Clone, Debug, PartialEq)]
pub enum RecipeField {
    Name(String),
    Cooktime(u32),
    Ingredients(String),
    Directions(String),
    DiscoveryYear(i32),
    Founder(String),
    Type(String),
    IsFavorite(bool),
}

impl RecipeField {
    /// Parse the cook-time input box; anything unparsable or below 1 becomes 1.
    pub fn cooktime_from_input(input: &str) -> Self {
        let hours = input.trim().parse::<u32>().ok().filter(|h| *h >= 1);
        Self::Cooktime(hours.unwrap_or(1))
    }

    /// Parse the discovery-year input box; unparsable or zero becomes the current year.
    pub fn discovery_year_from_input(input: &str) -> Self {
        let year = input.trim().parse::<i32>().ok().filter(|y| *y != 0);
        Self::DiscoveryYear(year.unwrap_or_else(current_year))
    }
}

/// Calendar year of "now" in UTC.
pub fn current_year() -> i32 {
    Utc::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_default_draft() {
        let draft = RecipeDraft::default();
        assert_eq!(draft.cooktime, 1);
        assert_eq!(draft.discovery_year, current_year());
        assert!(!draft.is_favorite);
        assert!(draft.name.is_empty());
    }

    #[test]
    fn test_with_does_not_alias() {
        let original = soup();
        let edited = original.with(RecipeField::Name("Stew".to_string()));
        assert_eq!(original.name, "Soup");
        assert_eq!(edited.name, "Stew");
        assert_eq!(edited.founder, "Ana");
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let draft = soup().with(RecipeField::Name("   ".to_string()));
        assert!(matches!(draft.validate(), Err(StoreError::InvalidDraft(_))));
        assert!(soup().validate().is_ok());
    }

    #[test]
    fn test_merged_only_touches_present_fields() {
        let recipe = Recipe {
            id: "rcp-1".to_string(),
            created_at: Utc::now(),
            fields: soup(),
        };
        let merged = recipe.merged(&RecipePatch::favorite(true));
        assert!(merged.is_favorite());
        assert_eq!(merged.fields.name, "Soup");
        assert_eq!(merged.id, "rcp-1");
        assert_eq!(merged.created_at, recipe.created_at);
    }

    #[test]
    fn test_input_parsing_fallbacks() {
        assert_eq!(RecipeField::cooktime_from_input("3"), RecipeField::Cooktime(3));
        assert_eq!(RecipeField::cooktime_from_input("abc"), RecipeField::Cooktime(1));
        assert_eq!(RecipeField::cooktime_from_input("0"), RecipeField::Cooktime(1));
        assert_eq!(
            RecipeField::discovery_year_from_input("1850"),
            RecipeField::DiscoveryYear(1850)
        );
        assert_eq!(
            RecipeField::discovery_year_from_input(""),
            RecipeField::DiscoveryYear(current_year())
        );
    }

    #[test]
    fn test_recipe_wire_layout_is_camel_case() {
        let recipe = Recipe {
            id: "rcp-1".to_string(),
            created_at: Utc::now(),
            fields: soup(),
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["discoveryYear"], 2020);
        assert_eq!(json["isFavorite"], false);
        assert_eq!(json["type"], "starter");
        assert!(json.get("createdAt").is_some());
        let back: Recipe = serde_json::from_value(json).unwrap();
        assert_eq!(back, recipe);
    }
}
