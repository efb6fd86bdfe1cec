//! Authentication primitives for the account service.
//!
//! Provides the building blocks the account lifecycle is assembled from:
//! - Password hashing (Argon2id)
//! - Signed, expiring JWTs with a unique token id
//! - Access/refresh token pair issuance
//! - Random identifiers and numeric one-time codes
//!
//! The account service defines its own claim types and storage; this crate
//! only knows how to sign, verify and hash.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Signed Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Session {
//!     user_id: String,
//! }
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(15));
//! let issued = handler.issue(&Session { user_id: "user123".to_string() }).unwrap();
//! let session: Session = handler.verify(&issued.token).unwrap();
//! assert_eq!(session.user_id, "user123");
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::{Authenticator, TokenSettings};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     TokenSettings::new(b"access_secret_at_least_32_bytes_long", Duration::minutes(15)),
//!     TokenSettings::new(b"refresh_secret_at_least_32_bytes_long", Duration::days(7)),
//! );
//!
//! let hash = auth.hash_password("password123").unwrap();
//! let pair = auth
//!     .authenticate("password123", &hash, &serde_json::json!({"userId": "u1"}), &serde_json::json!({"userId": "u1"}))
//!     .unwrap();
//! assert_ne!(pair.access_token.token, pair.refresh_token.token);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod secrets;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use authenticator::TokenSettings;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
