use dioxus::prelude::*;
use store::{actions, AuthMode};

use crate::store_handle::use_gateway;

/// Email/password form that switches between signing in and creating an account.
#[component]
pub fn AuthForm() -> Element {
    let gateway = use_gateway();
    let mut form = use_signal(store::AuthForm::default);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let gateway = gateway.clone();
        spawn(async move {
            form.write().error = None;
            submitting.set(true);
            let snapshot = form();
            match actions::submit_auth(&gateway, &snapshot).await {
                Ok(_) => form.write().reset(),
                Err(e) => form.write().error = Some(e.message().to_string()),
            }
            submitting.set(false);
        });
    };

    let current = form();
    let title = current.title();
    let (submit_label, toggle_prompt, toggle_label) = match current.mode {
        AuthMode::Login => ("Login", "Don't have an account?", "Sign Up"),
        AuthMode::Register => ("Sign Up", "Already have an account?", "Login"),
    };

    rsx! {
        div {
            class: "auth-container",
            h2 { "{title}" }
            if let Some(error) = &current.error {
                div { class: "auth-error", "{error}" }
            }
            form {
                onsubmit: handle_submit,
                div {
                    class: "form-group",
                    label { r#for: "auth-email", "Email" }
                    input {
                        id: "auth-email",
                        r#type: "email",
                        required: true,
                        value: "{current.email}",
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                }
                div {
                    class: "form-group",
                    label { r#for: "auth-password", "Password" }
                    input {
                        id: "auth-password",
                        r#type: "password",
                        required: true,
                        value: "{current.password}",
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                }
                button {
                    r#type: "submit",
                    class: "auth-button",
                    disabled: submitting(),
                    if submitting() { "Please wait..." } else { "{submit_label}" }
                }
            }
            p {
                class: "auth-toggle",
                "{toggle_prompt} "
                button {
                    r#type: "button",
                    class: "link-button",
                    onclick: move |_| form.write().toggle_mode(),
                    "{toggle_label}"
                }
            }
        }
    }
}
