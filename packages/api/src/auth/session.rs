//! What the dashboard keeps in its server-side session.
//!
//! The backend access token never leaves the server: the browser only holds the
//! session cookie and receives a [`SessionInfo`] projection.

use model::token::decode_claims;
use model::{SessionInfo, SignInResponse, User};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::backend::{self, BackendClient};
use crate::error::ProxyError;

/// Key for storing the signed-in user's credentials in the session.
pub const SESSION_AUTH_KEY: &str = "auth";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub token_type: String,
    pub user: User,
    /// Token expiry, Unix seconds.
    pub expires_at: Option<i64>,
}

impl SessionData {
    /// Build session contents from a successful sign-in; the user comes from
    /// the token's `user` claim.
    pub fn from_sign_in(response: SignInResponse) -> Result<Self, ProxyError> {
        let claims = decode_claims(&response.access_token)
            .map_err(|e| ProxyError::Decode(format!("access token: {e}")))?;
        let user = claims
            .user
            .ok_or_else(|| ProxyError::Decode("access token carries no user claim".into()))?;
        Ok(Self {
            token: response.access_token,
            token_type: response.token_type,
            user,
            expires_at: claims.exp,
        })
    }

    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now_secs)
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            token_type: self.token_type.clone(),
            user: self.user.clone(),
            expires_at: self.expires_at,
        }
    }
}

/// Read the session; an expired token clears it.
pub async fn load(session: &Session) -> Result<Option<SessionData>, ProxyError> {
    let Some(data) = session.get::<SessionData>(SESSION_AUTH_KEY).await? else {
        return Ok(None);
    };
    if data.is_expired(chrono::Utc::now().timestamp()) {
        tracing::info!(user = %data.user.email, "backend token expired, clearing session");
        session.flush().await?;
        return Ok(None);
    }
    Ok(Some(data))
}

pub async fn store(session: &Session, data: &SessionData) -> Result<(), ProxyError> {
    session.cycle_id().await?;
    session.insert(SESSION_AUTH_KEY, data).await?;
    Ok(())
}

pub async fn require(session: &Session) -> Result<SessionData, ProxyError> {
    load(session).await?.ok_or(ProxyError::Unauthenticated)
}

/// Everything an authenticated proxy call needs: the shared client and the
/// caller's credentials.
pub async fn connect(
    session: &Session,
) -> Result<(&'static BackendClient, SessionData), ProxyError> {
    let auth = require(session).await?;
    let client = backend::client().await?;
    Ok((client, auth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    fn token(payload: &str) -> String {
        format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_from_sign_in_reads_user_claim() {
        let response = SignInResponse {
            access_token: token(
                r#"{"exp":2000000000,"user":{"id":"u1","email":"ada@example.com","firstName":"Ada","lastName":"Lovelace","roles":[{"name":"ADMIN"}]}}"#,
            ),
            token_type: "Bearer".into(),
        };
        let data = SessionData::from_sign_in(response).unwrap();
        assert_eq!(data.user.id, "u1");
        assert_eq!(data.expires_at, Some(2_000_000_000));
        assert!(data.info().has_role("ADMIN"));
        assert!(!data.is_expired(1_999_999_999));
        assert!(data.is_expired(2_000_000_000));
    }

    fn memory_session() -> Session {
        use std::sync::Arc;
        use tower_sessions::MemoryStore;
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn signed_in(expires_at: Option<i64>) -> SessionData {
        SessionData {
            token: "t".into(),
            token_type: "Bearer".into(),
            user: User {
                id: "u1".into(),
                email: "ada@example.com".into(),
                ..Default::default()
            },
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_load_flushes_expired_session() {
        let session = memory_session();
        store(&session, &signed_in(Some(1))).await.unwrap();

        assert_eq!(load(&session).await.unwrap(), None);
        assert!(session
            .get::<SessionData>(SESSION_AUTH_KEY)
            .await
            .unwrap()
            .is_none());
        assert!(matches!(
            require(&session).await,
            Err(ProxyError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_load_keeps_live_session() {
        let session = memory_session();
        let live = signed_in(Some(chrono::Utc::now().timestamp() + 3600));
        store(&session, &live).await.unwrap();
        assert_eq!(load(&session).await.unwrap(), Some(live.clone()));

        let no_expiry = signed_in(None);
        store(&session, &no_expiry).await.unwrap();
        assert_eq!(require(&session).await.unwrap(), no_expiry);
    }

    #[tokio::test]
    async fn test_load_without_sign_in_is_none() {
        let session = memory_session();
        assert_eq!(load(&session).await.unwrap(), None);
    }

    #[test]
    fn test_token_without_user_is_rejected() {
        let response = SignInResponse {
            access_token: token(r#"{"sub":"u1"}"#),
            token_type: "Bearer".into(),
        };
        let err = SessionData::from_sign_in(response).unwrap_err();
        assert!(matches!(err, ProxyError::Decode(_)));
        assert_eq!(err.to_string(), "Internal server error");
    }
}
