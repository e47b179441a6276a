use dioxus::prelude::*;
use store::{actions, CatalogConfig, GalleryFilter, Phase, Recipe, RecipeField, StoreError, StoreHandle};

use crate::notifications::{notify, use_notifications, NotificationLevel, Notifications};
use crate::recipe_detail::RecipeDetail;
use crate::recipe_form::RecipeForm;
use crate::recipe_gallery::RecipeGallery;
use crate::store_handle::{use_gateway, use_recipe_store};
use crate::LogoutButton;

/// Signed-in screen: gallery, detail panel for the selection, and the add form.
#[component]
pub fn RecipeManager() -> Element {
    let catalog = use_recipe_store();
    let gateway = use_gateway();
    let mut notifications = use_notifications();
    let config = use_context::<CatalogConfig>();
    let mut filter = use_signal(|| config.gallery.default_filter);

    let add = {
        let gateway = gateway.clone();
        move |_: ()| {
            let gateway = gateway.clone();
            spawn(async move {
                match actions::add_recipe(&gateway, &catalog).await {
                    Ok(_) => notify(&mut notifications, NotificationLevel::Success, "Recipe added successfully!"),
                    Err(e) => report_failure(&mut notifications, "adding recipe", e),
                }
            });
        }
    };

    let update = {
        let gateway = gateway.clone();
        move |_: ()| {
            let gateway = gateway.clone();
            spawn(async move {
                match actions::update_selected(&gateway, &catalog).await {
                    Ok(_) => notify(&mut notifications, NotificationLevel::Success, "Recipe updated successfully!"),
                    Err(e) => report_failure(&mut notifications, "updating recipe", e),
                }
            });
        }
    };

    let delete = {
        let gateway = gateway.clone();
        move |recipe_id: String| {
            let gateway = gateway.clone();
            spawn(async move {
                if let Err(e) = actions::delete_recipe(&gateway, &catalog, &recipe_id).await {
                    report_failure(&mut notifications, "deleting recipe", e);
                }
            });
        }
    };

    let retry = {
        let gateway = gateway.clone();
        move |_: ()| {
            let gateway = gateway.clone();
            spawn(async move {
                if let Err(e) = actions::reload(&gateway, &catalog).await {
                    report_failure(&mut notifications, "loading recipes", e);
                }
            });
        }
    };

    // The detail panel sends the value it wants, since its flag may carry an unsaved edit.
    let set_favorite = {
        let gateway = gateway.clone();
        move |(recipe_id, is_favorite): (String, bool)| {
            let gateway = gateway.clone();
            spawn(async move {
                if let Err(e) = actions::set_favorite(&gateway, &catalog, &recipe_id, is_favorite).await {
                    report_failure(&mut notifications, "updating favorite status", e);
                }
            });
        }
    };

    let toggle_favorite = move |recipe_id: String| {
        let gateway = gateway.clone();
        spawn(async move {
            if let Err(e) = actions::toggle_favorite(&gateway, &catalog, &recipe_id).await {
                report_failure(&mut notifications, "updating favorite status", e);
            }
        });
    };

    let state = catalog.0.read();
    let loading = state.phase() == Phase::Loading;
    let all_count = state.recipes().len();
    let favorite_count = state.favorites().len();
    let shown: Vec<Recipe> = match filter() {
        GalleryFilter::All => state.recipes().to_vec(),
        GalleryFilter::Favorites => state.favorites().into_iter().cloned().collect(),
    };
    let selected = state.selected().cloned();
    let load_error = state.load_error().map(str::to_string);
    let new_recipe = state.new_recipe().clone();
    let email = state.user().map(|u| u.email.clone()).unwrap_or_default();
    drop(state);

    rsx! {
        div {
            class: "recipe-manager",
            header {
                class: "app-header",
                h1 { "Recipe Catalog" }
                div {
                    class: "user-info",
                    span { "{email}" }
                    LogoutButton { class: "logout-button" }
                }
            }
            div {
                class: "recipe-layout",
                RecipeGallery {
                    recipes: shown,
                    filter: filter(),
                    all_count: all_count,
                    favorite_count: favorite_count,
                    selected_id: selected.as_ref().map(|r| r.id.clone()),
                    loading: loading,
                    load_error: load_error,
                    on_retry: retry,
                    preview_chars: config.gallery.preview_chars,
                    on_filter: move |next: GalleryFilter| filter.set(next),
                    on_select: move |recipe_id: String| {
                        catalog.with_store(|s| s.select(&recipe_id));
                    },
                    on_toggle_favorite: toggle_favorite,
                    on_delete: delete,
                }
                if let Some(recipe) = selected {
                    RecipeDetail {
                        recipe: recipe,
                        on_change: move |field: RecipeField| {
                            if let Err(e) = catalog.with_store(|s| s.edit_selected(field)) {
                                tracing::debug!("Edit ignored: {e}");
                            }
                        },
                        on_update: update,
                        on_close: move |_| catalog.with_store(|s| s.clear_selection()),
                        on_set_favorite: set_favorite,
                    }
                }
            }
            section {
                class: "add-recipe",
                h2 { "Add New Recipe" }
                RecipeForm {
                    draft: new_recipe,
                    submit_label: "Add Recipe".to_string(),
                    on_change: move |field: RecipeField| catalog.with_store(|s| s.edit_new_recipe(field)),
                    on_submit: add,
                }
            }
        }
    }
}

/// Show a failed intent. Failures from a session that already ended are dropped.
fn report_failure(notifications: &mut Signal<Notifications>, what: &str, error: StoreError) {
    match error {
        StoreError::SessionEnded => {}
        StoreError::InvalidDraft(reason) => notify(notifications, NotificationLevel::Warning, &reason),
        e => notify(notifications, NotificationLevel::Error, &format!("Error {what}: {e}")),
    }
}
