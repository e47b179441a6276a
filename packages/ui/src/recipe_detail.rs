use dioxus::prelude::*;
use store::{Recipe, RecipeField};

use crate::icons::{FaStar, FaXmark};
use crate::recipe_form::RecipeForm;
use crate::Icon;

/// Edit panel for the selected recipe.
#[component]
pub fn RecipeDetail(
    recipe: Recipe,
    on_change: EventHandler<RecipeField>,
    on_update: EventHandler<()>,
    on_close: EventHandler<()>,
    /// Called with the recipe id and the flag the star should switch to.
    on_set_favorite: EventHandler<(String, bool)>,
) -> Element {
    let favorite = recipe.is_favorite();
    let id = recipe.id.clone();
    let added = recipe.created_at.format("%Y-%m-%d").to_string();
    let fields = recipe.fields.clone();
    let kind = fields.r#type.clone();

    rsx! {
        section {
            class: "recipe-detail",
            div {
                class: "recipe-detail-header",
                h2 { "{recipe.fields.name}" }
                div {
                    class: "recipe-detail-actions",
                    button {
                        class: if favorite { "favorite-button active" } else { "favorite-button" },
                        title: if favorite { "Remove from favorites" } else { "Add to favorites" },
                        onclick: move |_| on_set_favorite.call((id.clone(), !favorite)),
                        Icon { icon: FaStar, width: 16, height: 16 }
                    }
                    button {
                        class: "close-button",
                        title: "Close",
                        onclick: move |_| on_close.call(()),
                        Icon { icon: FaXmark, width: 16, height: 16 }
                    }
                }
            }
            div {
                class: "recipe-meta",
                span { strong { "Cook Time: " } "{fields.cooktime} hours " }
                span { strong { "Type: " } "{kind} " }
                span { strong { "Year: " } "{fields.discovery_year} " }
                span { strong { "Founder: " } "{fields.founder}" }
            }
            h3 { "Ingredients:" }
            p { class: "recipe-ingredients", "{fields.ingredients}" }
            h3 { "Directions:" }
            p { class: "recipe-directions", "{fields.directions}" }
            p { class: "recipe-meta", "Added {added}" }
            h3 { "Edit Recipe" }
            RecipeForm {
                draft: fields.clone(),
                submit_label: "Update Recipe".to_string(),
                on_change: on_change,
                on_submit: on_update,
                on_cancel: on_close,
            }
        }
    }
}
