use dioxus::prelude::*;
use store::{RecipeDraft, RecipeField};

/// Editable fields of a recipe. Every keystroke is reported as a [`RecipeField`] patch;
/// nothing is saved until `on_submit` fires.
#[component]
pub fn RecipeForm(
    draft: RecipeDraft,
    submit_label: String,
    on_change: EventHandler<RecipeField>,
    on_submit: EventHandler<()>,
    on_cancel: Option<EventHandler<()>>,
) -> Element {
    let kind = draft.r#type.clone();

    rsx! {
        form {
            class: "recipe-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(());
            },
            div {
                class: "form-group",
                label { "Recipe Name" }
                input {
                    r#type: "text",
                    value: "{draft.name}",
                    oninput: move |evt: FormEvent| on_change.call(RecipeField::Name(evt.value())),
                }
            }
            div {
                class: "form-row",
                div {
                    class: "form-group",
                    label { "Cook Time (hours)" }
                    input {
                        r#type: "number",
                        min: "1",
                        value: "{draft.cooktime}",
                        oninput: move |evt: FormEvent| {
                            on_change.call(RecipeField::cooktime_from_input(&evt.value()))
                        },
                    }
                }
                div {
                    class: "form-group",
                    label { "Type" }
                    input {
                        r#type: "text",
                        value: "{kind}",
                        oninput: move |evt: FormEvent| on_change.call(RecipeField::Type(evt.value())),
                    }
                }
            }
            div {
                class: "form-row",
                div {
                    class: "form-group",
                    label { "Discovery Year" }
                    input {
                        r#type: "number",
                        value: "{draft.discovery_year}",
                        oninput: move |evt: FormEvent| {
                            on_change.call(RecipeField::discovery_year_from_input(&evt.value()))
                        },
                    }
                }
                div {
                    class: "form-group",
                    label { "Founder" }
                    input {
                        r#type: "text",
                        value: "{draft.founder}",
                        oninput: move |evt: FormEvent| on_change.call(RecipeField::Founder(evt.value())),
                    }
                }
            }
            div {
                class: "form-group",
                label { "Ingredients" }
                textarea {
                    rows: "4",
                    value: "{draft.ingredients}",
                    oninput: move |evt: FormEvent| on_change.call(RecipeField::Ingredients(evt.value())),
                }
            }
            div {
                class: "form-group",
                label { "Directions" }
                textarea {
                    rows: "4",
                    value: "{draft.directions}",
                    oninput: move |evt: FormEvent| on_change.call(RecipeField::Directions(evt.value())),
                }
            }
            label {
                class: "checkbox-label",
                input {
                    r#type: "checkbox",
                    checked: draft.is_favorite,
                    onchange: move |evt: FormEvent| on_change.call(RecipeField::IsFavorite(evt.checked())),
                }
                " Favorite"
            }
            div {
                class: "form-actions",
                button { r#type: "submit", class: "primary-button", "{submit_label}" }
                if let Some(on_cancel) = on_cancel {
                    button {
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}
