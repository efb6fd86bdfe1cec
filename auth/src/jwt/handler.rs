use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::IssuedToken;
use super::claims::SignedClaims;
use super::errors::JwtError;

/// Signs and verifies expiring tokens with a single secret.
///
/// Every token gets `iat`, `exp` and a unique `jti` added around the caller's
/// payload. Uses HS256 (HMAC with SHA-256).
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    time_to_live: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (at least 32 bytes for HS256)
    /// * `time_to_live` - Lifetime of every token this handler issues
    pub fn new(secret: &[u8], time_to_live: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            time_to_live,
        }
    }

    /// Sign a payload into a token valid for the configured lifetime.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue<T: Serialize>(&self, payload: &T) -> Result<IssuedToken, JwtError> {
        let issued_at = Utc::now();
        let expires_at = issued_at + self.time_to_live;
        let claims = SignedClaims::new(payload, issued_at, expires_at);

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature and expiry, returning the payload.
    ///
    /// # Errors
    /// * `TokenExpired` - The `exp` claim is in the past
    /// * `InvalidToken` - Signature mismatch, malformed token or payload shape
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        self.verify_claims(token).map(|claims| claims.payload)
    }

    /// Verify a token and return the payload together with its registered claims.
    pub fn verify_claims<T: DeserializeOwned>(
        &self,
        token: &str,
    ) -> Result<SignedClaims<T>, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_required_spec_claims(&["exp"]);
        validation.leeway = 0;

        decode::<SignedClaims<T>>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }
}
