use dioxus::prelude::*;

use ui::{restore_appearance, AuthProvider, ToastProvider};
use views::{Dashboard, DashboardLayout, Files, Products, Settings, SignIn, SignUp, Users};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[redirect("/", || Route::Dashboard {})]
    #[route("/auth/signin")]
    SignIn {},
    #[route("/auth/signup")]
    SignUp {},
    #[layout(DashboardLayout)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/dashboard/products")]
        Products {},
        #[route("/dashboard/users")]
        Users {},
        #[route("/dashboard/files")]
        Files {},
        #[route("/dashboard/settings")]
        Settings {},
}

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .expect("Failed to start the tokio runtime")
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use axum::routing::{get, post};
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = api::config::load().expect("Failed to load dashboard configuration");

    // Access tokens live only in the server-side session
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.session.secure_cookie)
        .with_http_only(true)
        .with_same_site(SameSite::Strict)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(60 * 60 * 24 * u64::from(config.session.expiry_days))
                .try_into()
                .expect("Session expiry out of range"),
        ));

    let router = axum::Router::new()
        // File bytes are relayed as-is, outside the server function protocol
        .route(
            api::files::UPLOAD_ROUTE,
            post(api::files::upload_file).layer(api::files::upload_body_limit()),
        )
        .route("/api/files/download/{id}", get(api::files::download_file))
        .route("/api/files/preview/{id}", get(api::files::preview_file))
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    tracing::info!(backend = %config.backend.url, "Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .expect("Server error");
}

#[component]
fn App() -> Element {
    use_effect(restore_appearance);

    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }

        AuthProvider {
            ToastProvider {
                Router::<Route> {}
            }
        }
    }
}
