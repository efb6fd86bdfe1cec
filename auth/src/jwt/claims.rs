use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Registered claims wrapped around a caller-defined payload.
///
/// The payload fields are flattened next to `iat`, `exp` and `jti`, so a
/// payload `{ "userId": "..." }` is signed as
/// `{ "userId": "...", "iat": ..., "exp": ..., "jti": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignedClaims<T> {
    #[serde(flatten)]
    pub payload: T,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,
}

impl<T> SignedClaims<T> {
    /// Wrap a payload with issue and expiry timestamps and a fresh token id.
    pub fn new(payload: T, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            payload,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: crate::secrets::random_id(),
        }
    }
}

/// A freshly signed token and the instant it stops being valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
