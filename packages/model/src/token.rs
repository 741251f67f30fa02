//! Reads the payload of a backend-issued JWT.
//!
//! The signature is never checked here: the backend verifies its own tokens on
//! every request. The dashboard only needs the embedded `user` claim and the
//! expiry so it can drop a stale session early.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::records::User;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("token payload is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("token payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiry, Unix seconds.
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub user: Option<User>,
}

impl TokenClaims {
    /// A token without `exp` never expires locally.
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now_secs)
    }
}

pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS512"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_decode_user_claim() {
        let token = encode(
            r#"{"sub":"u1","exp":1900000000,"user":{"id":"u1","email":"a@b.c","firstName":"Ada","lastName":"L","roles":[{"name":"ADMIN"}]}}"#,
        );
        let claims = decode_claims(&token).unwrap();
        let user = claims.user.clone().unwrap();
        assert_eq!(user.first_name, "Ada");
        assert!(user.has_role("ADMIN"));
        assert!(!claims.is_expired(1_800_000_000));
        assert!(claims.is_expired(1_900_000_000));
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let payload = format!("{}==", URL_SAFE_NO_PAD.encode(r#"{"sub":"x"}"#));
        let token = format!("h.{payload}.s");
        assert_eq!(decode_claims(&token).unwrap().sub.as_deref(), Some("x"));
    }

    #[test]
    fn test_missing_exp_never_expires() {
        let claims = decode_claims(&encode(r#"{"sub":"x"}"#)).unwrap();
        assert!(!claims.is_expired(i64::MAX));
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(matches!(decode_claims("abc"), Err(TokenError::Malformed)));
        assert!(matches!(decode_claims("a.b.c.d"), Err(TokenError::Malformed)));
        assert!(matches!(decode_claims("a.!!!.c"), Err(TokenError::Encoding(_))));
        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("not json"));
        assert!(matches!(decode_claims(&not_json), Err(TokenError::Payload(_))));
    }
}
