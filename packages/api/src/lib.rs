//! # API crate: server functions for the inventory dashboard
//!
//! Every screen in the `ui` crate talks to the external inventory backend
//! through the Dioxus server functions defined here. Each server function is a
//! thin proxy: it reads the backend access token from the dashboard session,
//! performs one backend call, and relays the JSON (or a uniform error message).
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | | Sign-in/up/out, session inspection; session storage helpers (`server`) |
//! | [`backend`] | `server` | `BackendClient`: the single reqwest client used for all backend calls |
//! | [`config`] | `server` | Loads `dashboard.toml` and `BACKEND_URL` once per process |
//! | [`error`] | `server` | `ProxyError`, the uniform backend/transport error mapping |
//! | [`products`] | | Product CRUD |
//! | [`inventory`] | | Stock level and location updates |
//! | [`users`] | | User listing (plain and paginated), update, delete |
//! | [`files`] | | File listing and delete; raw upload/download/preview routes (`server`) |
//! | [`settings`] | | Profile, password, notification and appearance settings |
//! | [`dashboard`] | | Landing-page stats and recent activity |
//!
//! Like the rest of the fullstack code, every server function is declared twice:
//! once with the real proxy logic behind `#[cfg(feature = "server")]` and once as
//! a client stub that the macro turns into an HTTP call.

use dioxus::prelude::*;

pub mod auth;
#[cfg(feature = "server")]
pub mod backend;
#[cfg(feature = "server")]
pub mod config;
pub mod dashboard;
#[cfg(feature = "server")]
pub mod error;
pub mod files;
pub mod inventory;
pub mod products;
pub mod settings;
pub mod users;

pub use auth::{current_session, sign_in, sign_out, sign_up};
pub use dashboard::dashboard_overview;
pub use files::{delete_file, list_files};
pub use inventory::update_inventory;
pub use products::{create_product, delete_product, get_product, list_products, update_product};
pub use settings::{
    get_settings, update_appearance, update_notifications, update_password, update_profile,
};
pub use users::{delete_user, get_user, list_users, list_users_page, update_user};

pub use model::config::UiConfig;
pub use model::{SessionInfo, User};

/// Client-visible configuration (thresholds, default page size).
#[cfg(feature = "server")]
#[get("/api/config/ui")]
pub async fn get_ui_config() -> Result<UiConfig, ServerFnError> {
    let config = config::load().map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(config.ui.clone())
}

#[cfg(not(feature = "server"))]
#[get("/api/config/ui")]
pub async fn get_ui_config() -> Result<UiConfig, ServerFnError> {
    Ok(UiConfig::default())
}
