use dioxus::prelude::*;

use store::CatalogConfig;
use ui::views::CatalogView;
use ui::AuthProvider;

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Presentation settings baked into the bundle.
const CATALOG_TOML: &str = include_str!("../catalog.toml");

fn main() {
    #[cfg(feature = "server")]
    {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                eprintln!("Failed to start runtime: {e}");
                std::process::exit(1);
            }
        };
        if let Err(e) = runtime.block_on(launch_server()) {
            tracing::error!("Server stopped: {e}");
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() -> Result<(), Box<dyn std::error::Error>> {
    use api::config::BackendConfig;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_sessions::cookie::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;

    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    dotenvy::dotenv().ok();
    let config = BackendConfig::from_env()?;

    let pool = api::db::get_pool().await?;
    sqlx::migrate!("../api/migrations").run(pool).await?;

    let session_store = PostgresStore::new(pool.clone());
    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.session_secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(config.session_ttl_days)));

    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

/// Parse the embedded `catalog.toml`, falling back to defaults if it is malformed.
fn load_catalog_config() -> CatalogConfig {
    CatalogConfig::from_toml(CATALOG_TOML).unwrap_or_else(|e| {
        tracing::warn!("Ignoring invalid {}: {e}", CatalogConfig::filename());
        CatalogConfig::default()
    })
}

#[component]
fn App() -> Element {
    use_context_provider(load_catalog_config);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            CatalogView {}
        }
    }
}
