//! HTTP client for the external inventory backend.
//!
//! One `BackendClient` per process, created on first use the same way a
//! connection pool would be. All paths are relative to `{url}/api/v1`.

use std::time::Duration;

use model::config::BackendConfig;
use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::OnceCell;

use crate::error::ProxyError;

static CLIENT: OnceCell<BackendClient> = OnceCell::const_new();

/// Get or initialize the shared backend client from the loaded configuration.
pub async fn client() -> Result<&'static BackendClient, ProxyError> {
    CLIENT
        .get_or_try_init(|| async {
            let config = crate::config::load()?;
            BackendClient::new(&config.backend)
        })
        .await
}

/// Body and headers of a downloaded file, relayed as-is to the browser.
#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and turn a non-2xx answer into `ProxyError::Backend`. A 401 on a
    /// request that carried a token means the token is no longer accepted.
    async fn execute(
        &self,
        builder: RequestBuilder,
        path: &str,
        token: Option<&str>,
        fallback: &str,
    ) -> Result<Response, ProxyError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(path, error = %e, "backend unreachable");
            ProxyError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = error_message(&body, fallback);
        tracing::warn!(path, status = status.as_u16(), %message, "backend request failed");
        if status == StatusCode::UNAUTHORIZED && token.is_some() {
            return Err(ProxyError::Unauthenticated);
        }
        Err(ProxyError::Backend {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ProxyError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(path, error = %e, "undecodable backend response");
            ProxyError::Decode(format!("{path}: {e}"))
        })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        fallback: &str,
    ) -> Result<T, ProxyError> {
        let builder = self.request(Method::GET, path, token);
        let response = self.execute(builder, path, token, fallback).await?;
        Self::decode(response, path).await
    }

    /// POST or PUT a JSON body and decode the JSON answer.
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &B,
        fallback: &str,
    ) -> Result<T, ProxyError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path, token).json(body);
        let response = self.execute(builder, path, token, fallback).await?;
        Self::decode(response, path).await
    }

    /// Like `get_json` for endpoints answering with the `{success, message, data}` envelope.
    pub async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        fallback: &str,
    ) -> Result<T, ProxyError> {
        let envelope: model::ApiResponse<T> = self.get_json(path, token, fallback).await?;
        envelope
            .into_data()
            .ok_or_else(|| ProxyError::Decode(format!("{path}: response has no data")))
    }

    /// The response body is ignored.
    pub async fn delete(
        &self,
        path: &str,
        token: Option<&str>,
        fallback: &str,
    ) -> Result<(), ProxyError> {
        let builder = self.request(Method::DELETE, path, token);
        self.execute(builder, path, token, fallback).await?;
        Ok(())
    }

    /// Multipart upload with the file in the `file` field.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
        fallback: &str,
    ) -> Result<T, ProxyError> {
        let mut part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        if !content_type.is_empty() {
            part = part.mime_str(content_type)?;
        }
        let form = reqwest::multipart::Form::new().part("file", part);
        let builder = self.request(Method::POST, path, token).multipart(form);
        let response = self.execute(builder, path, token, fallback).await?;
        Self::decode(response, path).await
    }

    pub async fn download(
        &self,
        path: &str,
        token: Option<&str>,
        fallback: &str,
    ) -> Result<Download, ProxyError> {
        let builder = self.request(Method::GET, path, token);
        let response = self.execute(builder, path, token, fallback).await?;
        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let content_disposition = header(CONTENT_DISPOSITION);
        let bytes = response.bytes().await?.to_vec();
        Ok(Download {
            bytes,
            content_type,
            content_disposition,
        })
    }
}

/// The backend's `message` field when the body is JSON and carries one.
pub fn error_message(body: &[u8], fallback: &str) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// A single path segment taken from user input.
pub fn path_segment(id: &str) -> Result<&str, ProxyError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(id)
    } else {
        Err(ProxyError::InvalidId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_backend_message() {
        let body = br#"{"message":"Product with id 7 not found","status":404}"#;
        assert_eq!(
            error_message(body, "Product not found"),
            "Product with id 7 not found"
        );
    }

    #[test]
    fn test_error_message_falls_back() {
        assert_eq!(error_message(b"<html>502</html>", "Failed"), "Failed");
        assert_eq!(error_message(br#"{"error":"x"}"#, "Failed"), "Failed");
        assert_eq!(error_message(br#"{"message":"  "}"#, "Failed"), "Failed");
        assert_eq!(error_message(b"", "Failed"), "Failed");
    }

    #[test]
    fn test_url_joins_under_api_prefix() {
        let client = BackendClient::new(&BackendConfig {
            url: "http://backend:8081/".into(),
            timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(client.url("/products"), "http://backend:8081/api/v1/products");
        assert_eq!(client.url("users/3"), "http://backend:8081/api/v1/users/3");
    }

    #[test]
    fn test_path_segment_rejects_traversal() {
        assert_eq!(path_segment("64f1c0-ab_9").unwrap(), "64f1c0-ab_9");
        assert!(path_segment("").is_err());
        assert!(path_segment("../admin").is_err());
        assert!(path_segment("1?role=ADMIN").is_err());
    }
}
