//! # Dashboard configuration: `dashboard.toml`
//!
//! Read once by the server at startup. Every section and field has a default,
//! so a missing or empty file is equivalent to the default configuration.
//!
//! ## Structure
//!
//! ```toml
//! [backend]
//! url = "http://localhost:8081"   # BACKEND_URL overrides this
//! timeout_secs = 30
//!
//! [session]
//! expiry_days = 7
//! secure_cookie = false
//!
//! [ui]
//! low_stock_threshold = 10
//! page_size = 10
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`DashboardConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`BackendConfig`] | Where the external inventory API lives and how long to wait for it. |
//! | [`SessionConfig`] | Lifetime and cookie flags of the dashboard session. |
//! | [`UiConfig`] | Client-visible tunables; sent to the browser by `api::get_ui_config`. |

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend, without the `/api/v1` prefix.
    #[serde(default = "default_backend_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_expiry_days")]
    pub expiry_days: u32,
    /// Set to true in production behind HTTPS.
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_expiry_days() -> u32 {
    7
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_days: default_expiry_days(),
            secure_cookie: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_low_stock_threshold() -> i32 {
    crate::query::LOW_STOCK_THRESHOLD
}

fn default_page_size() -> u32 {
    10
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: default_low_stock_threshold(),
            page_size: default_page_size(),
        }
    }
}

impl DashboardConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "dashboard.toml"
    }

    /// Builder method to point at a different backend.
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend.url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Backend URL for an `/api/v1` path, e.g. `api_url("/products")`.
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/api/v1/{}",
            self.backend.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.backend.url, "http://localhost:8081");
        assert_eq!(config.session.expiry_days, 7);
        assert_eq!(config.ui.low_stock_threshold, 10);
    }

    #[test]
    fn test_partial_sections() {
        let config = DashboardConfig::from_toml(
            r#"
            [backend]
            url = "https://inventory.internal"

            [ui]
            page_size = 25
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.url, "https://inventory.internal");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.ui.page_size, 25);
        assert_eq!(config.ui.low_stock_threshold, 10);
        assert!(!config.session.secure_cookie);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = DashboardConfig::default().with_backend_url("http://backend:9000/");
        let text = config.to_toml().unwrap();
        assert_eq!(DashboardConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_api_url_joins_cleanly() {
        let config = DashboardConfig::default().with_backend_url("http://backend:9000/");
        assert_eq!(
            config.api_url("/products/42"),
            "http://backend:9000/api/v1/products/42"
        );
        assert_eq!(config.api_url("users"), "http://backend:9000/api/v1/users");
    }
}
