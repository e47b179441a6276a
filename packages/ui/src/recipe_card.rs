use dioxus::prelude::*;
use store::Recipe;

use crate::icons::{FaStar, FaTrashCan};
use crate::Icon;

/// First `limit` characters of `ingredients`, with `...` appended when anything was cut.
pub fn ingredients_preview(ingredients: &str, limit: usize) -> String {
    let mut chars = ingredients.chars();
    let head: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[component]
pub fn RecipeCard(
    recipe: Recipe,
    selected: bool,
    #[props(default = 100)] preview_chars: usize,
    on_select: EventHandler<String>,
    on_toggle_favorite: EventHandler<String>,
    on_delete: EventHandler<String>,
) -> Element {
    let preview = ingredients_preview(&recipe.fields.ingredients, preview_chars);
    let favorite = recipe.is_favorite();
    let kind = recipe.fields.r#type.clone();
    let hours = recipe.fields.cooktime;
    let year = recipe.fields.discovery_year;
    let id = recipe.id.clone();
    let select_id = id.clone();
    let favorite_id = id.clone();

    rsx! {
        div {
            class: if selected { "recipe-card selected" } else { "recipe-card" },
            onclick: move |_| on_select.call(select_id.clone()),
            div {
                class: "recipe-card-header",
                h3 { "{recipe.fields.name}" }
                button {
                    class: if favorite { "favorite-button active" } else { "favorite-button" },
                    title: if favorite { "Remove from favorites" } else { "Add to favorites" },
                    onclick: move |evt: Event<MouseData>| {
                        evt.stop_propagation();
                        on_toggle_favorite.call(favorite_id.clone());
                    },
                    Icon { icon: FaStar, width: 14, height: 14 }
                }
            }
            p {
                class: "recipe-meta",
                "{kind} · {hours} hours · {year}"
            }
            if !recipe.fields.founder.is_empty() {
                p { class: "recipe-meta", "Founder: {recipe.fields.founder}" }
            }
            p { class: "recipe-ingredients", "{preview}" }
            button {
                class: "delete-button",
                title: "Delete recipe",
                onclick: move |evt: Event<MouseData>| {
                    evt.stop_propagation();
                    on_delete.call(id.clone());
                },
                Icon { icon: FaTrashCan, width: 14, height: 14 }
            }
        }
    }
}
