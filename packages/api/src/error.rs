//! Uniform error mapping for everything that goes through the backend proxy.
//!
//! Server functions surface a `ProxyError` as a `ServerFnError` carrying the
//! user-facing message; the raw upload/download/preview routes turn it into a JSON
//! `{ "message": ... }` body with the matching status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus::prelude::ServerFnError;
use thiserror::Error;

use crate::config::ConfigError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

#[derive(Debug, Error)]
pub enum ProxyError {
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("Your session has expired. Please log in again.")]
    Unauthenticated,
    #[error("Invalid identifier")]
    InvalidId,
    #[error("Please select a file to upload")]
    MissingFile,
    #[error("The uploaded file could not be read")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
    #[error("Internal server error")]
    Transport(#[from] reqwest::Error),
    #[error("Internal server error")]
    Decode(String),
    #[error("Internal server error")]
    Session(#[from] tower_sessions::session::Error),
    #[error("Internal server error")]
    Config(#[from] ConfigError),
}

impl ProxyError {
    pub fn status(&self) -> u16 {
        match self {
            ProxyError::Backend { status, .. } => *status,
            ProxyError::Unauthenticated => 401,
            ProxyError::InvalidId | ProxyError::MissingFile => 400,
            ProxyError::Multipart(e) => e.status().as_u16(),
            _ => 500,
        }
    }

    /// Detail for the server log; the `Display` text is what users see.
    pub fn detail(&self) -> String {
        match self {
            ProxyError::Transport(e) => e.to_string(),
            ProxyError::Decode(e) => e.clone(),
            ProxyError::Session(e) => e.to_string(),
            ProxyError::Config(e) => e.to_string(),
            ProxyError::Multipart(e) => e.body_text(),
            other => other.to_string(),
        }
    }

    pub fn into_server_fn(self) -> ServerFnError {
        ServerFnError::new(self.to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::json!({ "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_is_shown_verbatim() {
        let err = ProxyError::Backend {
            status: 404,
            message: "Product not found".into(),
        };
        assert_eq!(err.to_string(), "Product not found");
        assert_eq!(err.status(), 404);
    }

    #[test]
    fn test_internal_failures_hide_detail() {
        let err = ProxyError::Decode("expected value at line 1".into());
        assert_eq!(err.to_string(), "Internal server error");
        assert_eq!(err.status(), 500);
        assert_eq!(err.detail(), "expected value at line 1");
    }

    #[test]
    fn test_missing_session_is_401() {
        let err = ProxyError::Unauthenticated;
        assert_eq!(err.status(), 401);
        assert_eq!(err.to_string(), SESSION_EXPIRED_MESSAGE);
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
