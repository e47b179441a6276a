use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::auth_form::AuthForm;
use crate::notifications::NotificationPanel;
use crate::views::RecipeManager;
use crate::CATALOG_CSS;

/// Root view: the login form while signed out, the recipe manager once signed in.
#[component]
pub fn CatalogView() -> Element {
    let auth = use_auth();
    let state = auth();

    rsx! {
        document::Stylesheet { href: CATALOG_CSS }

        main {
            class: "catalog",
            if state.loading {
                div { class: "catalog-loading", "Loading..." }
            } else if state.user.is_some() {
                RecipeManager {}
            } else {
                AuthForm {}
            }
        }
        NotificationPanel {}
    }
}
