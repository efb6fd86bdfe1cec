use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Secret and lifetime for one kind of token.
pub struct TokenSettings<'a> {
    pub secret: &'a [u8],
    pub time_to_live: Duration,
}

impl<'a> TokenSettings<'a> {
    pub fn new(secret: &'a [u8], time_to_live: Duration) -> Self {
        Self {
            secret,
            time_to_live,
        }
    }
}

/// Authentication coordinator combining password verification and token issuance.
///
/// Access and refresh tokens are signed with separate secrets so that a
/// refresh token can never be presented as an access token and vice versa.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    access_tokens: JwtHandler,
    refresh_tokens: JwtHandler,
}

/// Tokens handed out on a successful login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: IssuedToken,
    pub refresh_token: IssuedToken,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    pub fn new(access: TokenSettings<'_>, refresh: TokenSettings<'_>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            access_tokens: JwtHandler::new(access.secret, access.time_to_live),
            refresh_tokens: JwtHandler::new(refresh.secret, refresh.time_to_live),
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Compare a plaintext password with a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token signing failed
    pub fn authenticate<A: Serialize, R: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        access_claims: &A,
        refresh_claims: &R,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.verify_password(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(TokenPair {
            access_token: self.access_tokens.issue(access_claims)?,
            refresh_token: self.refresh_tokens.issue(refresh_claims)?,
        })
    }

    /// Issue an access token without password verification.
    ///
    /// Used by the refresh flow once the refresh token has been checked.
    pub fn issue_access_token<T: Serialize>(&self, claims: &T) -> Result<IssuedToken, JwtError> {
        self.access_tokens.issue(claims)
    }

    pub fn verify_access_token<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        self.access_tokens.verify(token)
    }

    pub fn verify_refresh_token<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        self.refresh_tokens.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Subject {
        sub: String,
    }

    fn authenticator() -> Authenticator {
        Authenticator::new(
            TokenSettings::new(b"access_secret_key_at_least_32_bytes!", Duration::minutes(15)),
            TokenSettings::new(b"refresh_secret_key_at_least_32_bytes", Duration::days(7)),
        )
    }

    fn subject() -> Subject {
        Subject {
            sub: "user123".to_string(),
        }
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let pair = authenticator
            .authenticate("my_password", &hash, &subject(), &subject())
            .expect("Authentication failed");

        assert!(pair.refresh_token.expires_at > pair.access_token.expires_at);

        let access: Subject = authenticator
            .verify_access_token(&pair.access_token.token)
            .expect("Access token validation failed");
        let refresh: Subject = authenticator
            .verify_refresh_token(&pair.refresh_token.token)
            .expect("Refresh token validation failed");
        assert_eq!(access, subject());
        assert_eq!(refresh, subject());
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator.hash_password("my_password").unwrap();

        let result = authenticator.authenticate("wrong_password", &hash, &subject(), &subject());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_tokens_are_not_interchangeable() {
        let authenticator = authenticator();

        let hash = authenticator.hash_password("my_password").unwrap();
        let pair = authenticator
            .authenticate("my_password", &hash, &subject(), &subject())
            .unwrap();

        assert!(authenticator
            .verify_access_token::<Subject>(&pair.refresh_token.token)
            .is_err());
        assert!(authenticator
            .verify_refresh_token::<Subject>(&pair.access_token.token)
            .is_err());
    }

    #[test]
    fn test_issue_access_token() {
        let authenticator = authenticator();

        let issued = authenticator.issue_access_token(&subject()).unwrap();
        let decoded: Subject = authenticator.verify_access_token(&issued.token).unwrap();
        assert_eq!(decoded, subject());
    }
}
