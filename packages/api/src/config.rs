//! Process-wide dashboard configuration.
//!
//! Loaded once: `.env` (via dotenvy), then the TOML file named by
//! `DASHBOARD_CONFIG` (default `dashboard.toml`, optional), then the
//! `BACKEND_URL` environment variable on top.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use model::DashboardConfig;
use thiserror::Error;

static CONFIG: OnceLock<DashboardConfig> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get or initialize the configuration.
pub fn load() -> Result<&'static DashboardConfig, ConfigError> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }

    dotenvy::dotenv().ok();
    let path = std::env::var("DASHBOARD_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DashboardConfig::filename()));
    let config = resolve(&path, std::env::var("BACKEND_URL").ok())?;
    tracing::info!(backend = %config.backend.url, "dashboard configuration loaded");

    Ok(CONFIG.get_or_init(|| config))
}

/// Read `path` if it exists and apply the backend URL override.
pub fn resolve(path: &Path, backend_url: Option<String>) -> Result<DashboardConfig, ConfigError> {
    let config = match std::fs::read_to_string(path) {
        Ok(text) => DashboardConfig::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => DashboardConfig::default(),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    Ok(match backend_url.filter(|url| !url.trim().is_empty()) {
        Some(url) => config.with_backend_url(url),
        None => config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = resolve(Path::new("/nonexistent/dashboard.toml"), None).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_env_url_overrides_file() {
        let path = scratch_file(
            "override.toml",
            "[backend]\nurl = \"http://from-file:1\"\ntimeout_secs = 5\n",
        );
        let config = resolve(&path, Some("http://from-env:2/".into())).unwrap();
        assert_eq!(config.backend.url, "http://from-env:2");
        assert_eq!(config.backend.timeout_secs, 5);

        let config = resolve(&path, Some("  ".into())).unwrap();
        assert_eq!(config.backend.url, "http://from-file:1");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let path = scratch_file("broken.toml", "[backend\nurl = 1");
        let err = resolve(&path, None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        std::fs::remove_file(path).ok();
    }
}
