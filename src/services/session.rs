use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::Session;

/// Longest accepted session lifetime
const MAX_TTL_SECS: i64 = 10 * 365 * 24 * 3600;

/// Errors that can occur when issuing or checking session tokens
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid session token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Malformed session subject: {0}")]
    MalformedSubject(#[from] uuid::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    account_id: u64,
    username: String,
    exp: i64,
    iat: i64,
}

/// Signs and verifies session tokens
///
/// The token carries the whole [`Session`], so handlers never look the user up
/// again once a request is authenticated.
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: chrono::Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: chrono::Duration::seconds(i64::try_from(ttl_secs).map_or(MAX_TTL_SECS, |s| s.min(MAX_TTL_SECS))),
        }
    }

    /// Issue a signed token for a session
    pub fn issue(&self, session: &Session) -> Result<String, SessionError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: session.owner_id.to_string(),
            account_id: session.account_id,
            username: session.username.clone(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Check a token's signature and expiry and recover its session
    pub fn verify(&self, token: &str) -> Result<Session, SessionError> {
        let validation = Validation::new(Algorithm::HS256);
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)?.claims;

        Ok(Session {
            owner_id: Uuid::parse_str(&claims.sub)?,
            account_id: claims.account_id,
            username: claims.username,
        })
    }

    /// Verify the token in an `Authorization: Bearer ...` header value
    pub fn from_authorization(&self, header: Option<&str>) -> Result<Session, SessionError> {
        let token = header
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(SessionError::MissingToken)?;

        self.verify(token)
    }
}
