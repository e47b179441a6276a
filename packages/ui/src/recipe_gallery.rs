use dioxus::prelude::*;
use store::{GalleryFilter, Recipe};

use crate::recipe_card::RecipeCard;

/// Grid of recipe cards with the All / Favorites toggle.
///
/// `recipes` is whichever list `filter` selects; the caller does the filtering.
#[component]
pub fn RecipeGallery(
    recipes: Vec<Recipe>,
    filter: GalleryFilter,
    all_count: usize,
    favorite_count: usize,
    #[props(!optional)] selected_id: Option<String>,
    loading: bool,
    /// Set when the last load failed; shows a retry button.
    #[props(!optional)] load_error: Option<String>,
    on_retry: EventHandler<()>,
    #[props(default = 100)] preview_chars: usize,
    on_filter: EventHandler<GalleryFilter>,
    on_select: EventHandler<String>,
    on_toggle_favorite: EventHandler<String>,
    on_delete: EventHandler<String>,
) -> Element {
    let (heading, empty_message) = match filter {
        GalleryFilter::All => (
            "All Recipes",
            "No recipes in your collection yet. Add one using the form below!",
        ),
        GalleryFilter::Favorites => (
            "Favorite Recipes",
            "No favorite recipes yet. Add some by clicking the star icon!",
        ),
    };

    rsx! {
        section {
            class: "recipe-gallery",
            div {
                class: "gallery-header",
                h2 { "{heading}" }
                div {
                    class: "filter-toggle",
                    button {
                        class: if filter == GalleryFilter::All { "filter-button active" } else { "filter-button" },
                        onclick: move |_| on_filter.call(GalleryFilter::All),
                        "All Recipes ({all_count})"
                    }
                    button {
                        class: if filter == GalleryFilter::Favorites { "filter-button active" } else { "filter-button" },
                        onclick: move |_| on_filter.call(GalleryFilter::Favorites),
                        "Favorites ({favorite_count})"
                    }
                }
            }
            if let Some(error) = &load_error {
                div {
                    class: "gallery-error",
                    span { "Error loading recipes: {error}" }
                    button {
                        class: "retry-button",
                        onclick: move |_| on_retry.call(()),
                        "Retry"
                    }
                }
            }
            if loading {
                p { class: "gallery-empty", "Loading recipes..." }
            } else if recipes.is_empty() {
                p { class: "gallery-empty", "{empty_message}" }
            } else {
                div {
                    class: "gallery-grid",
                    for recipe in recipes.iter() {
                        RecipeCard {
                            key: "{recipe.id}",
                            selected: selected_id.as_deref() == Some(recipe.id.as_str()),
                            recipe: recipe.clone(),
                            preview_chars: preview_chars,
                            on_select: on_select,
                            on_toggle_favorite: on_toggle_favorite,
                            on_delete: on_delete,
                        }
                    }
                }
            }
        }
    }
}
