//! Sign-in, sign-up and session inspection.
//!
//! Sign-in exchanges credentials with the backend for an access token, which is
//! kept in the dashboard session. The browser only learns who is signed in.

use dioxus::prelude::*;
use model::{ApiMessage, SessionInfo, SignUpRequest};

#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use session::{connect, load, require, store, SessionData, SESSION_AUTH_KEY};

/// Sign in against the backend and start a dashboard session.
#[cfg(feature = "server")]
#[post("/api/auth/signin", session: tower_sessions::Session)]
pub async fn sign_in(email: String, password: String) -> Result<SessionInfo, ServerFnError> {
    use crate::error::ProxyError;
    use model::SignInResponse;

    let email = email.trim().to_lowercase();
    let client = crate::backend::client()
        .await
        .map_err(ProxyError::into_server_fn)?;
    let response: SignInResponse = client
        .send_json(
            reqwest::Method::POST,
            "/auth/signin",
            None,
            &serde_json::json!({ "email": email, "password": password }),
            "Authentication failed",
        )
        .await
        .map_err(ProxyError::into_server_fn)?;

    let data = SessionData::from_sign_in(response).map_err(ProxyError::into_server_fn)?;
    store(&session, &data)
        .await
        .map_err(ProxyError::into_server_fn)?;
    tracing::info!(user = %data.user.email, "signed in");

    Ok(data.info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/signin")]
pub async fn sign_in(email: String, password: String) -> Result<SessionInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Register a new account. Also used by the Users screen to add users.
#[cfg(feature = "server")]
#[post("/api/auth/signup")]
pub async fn sign_up(request: SignUpRequest) -> Result<ApiMessage, ServerFnError> {
    use crate::error::ProxyError;

    let mut request = request;
    request.email = request.email.trim().to_lowercase();
    let client = crate::backend::client()
        .await
        .map_err(ProxyError::into_server_fn)?;
    let reply: serde_json::Value = client
        .send_json(
            reqwest::Method::POST,
            "/auth/signup",
            None,
            &request,
            "Registration failed",
        )
        .await
        .map_err(ProxyError::into_server_fn)?;
    tracing::info!(user = %request.email, "account registered");

    let message = reply
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or("Registration successful");
    Ok(ApiMessage::new(message))
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/signup")]
pub async fn sign_up(request: SignUpRequest) -> Result<ApiMessage, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// End the dashboard session.
#[cfg(feature = "server")]
#[post("/api/auth/signout", session: tower_sessions::Session)]
pub async fn sign_out() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/signout")]
pub async fn sign_out() -> Result<(), ServerFnError> {
    Ok(())
}

/// The signed-in user, or `None` when there is no usable session.
#[cfg(feature = "server")]
#[get("/api/auth/session", session: tower_sessions::Session)]
pub async fn current_session() -> Result<Option<SessionInfo>, ServerFnError> {
    let data = load(&session)
        .await
        .map_err(crate::error::ProxyError::into_server_fn)?;

    Ok(data.map(|d| d.info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/session")]
pub async fn current_session() -> Result<Option<SessionInfo>, ServerFnError> {
    Ok(None)
}
