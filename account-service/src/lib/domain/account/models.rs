use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::account::errors::EmailError;
use crate::account::errors::NameError;
use crate::account::errors::RoleError;
use crate::account::errors::UserIdError;
use crate::account::messages;

/// User aggregate entity.
///
/// Carries the embedded confirmation and password-reset state alongside the
/// identity fields.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: Name,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub consent: bool,
    pub account_confirmation: AccountConfirmation,
    pub password_reset: PasswordReset,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Email ownership proof issued at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountConfirmation {
    pub status: bool,
    pub token: String,
    pub code: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl AccountConfirmation {
    /// Fresh, unconfirmed state holding the one-time token and code.
    pub fn pending(token: String, code: String) -> Self {
        Self {
            status: false,
            token,
            code,
            timestamp: None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status
    }

    pub fn confirm(&mut self, at: DateTime<Utc>) {
        self.status = true;
        self.timestamp = Some(at);
    }
}

/// Outstanding password reset request, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordReset {
    pub token: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
    pub last_reset_at: Option<DateTime<Utc>>,
}

impl PasswordReset {
    pub fn request(&mut self, token: String, expiry: DateTime<Utc>) {
        self.token = Some(token);
        self.expiry = Some(expiry);
    }

    /// A request without expiry is treated as already expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry.map_or(true, |expiry| expiry < now)
    }

    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.token = None;
        self.expiry = None;
        self.last_reset_at = Some(at);
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Trimmed, non-empty, at most 72 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    const MAX_LENGTH: usize = 72;

    /// # Errors
    /// * `Empty` - Name is blank after trimming
    /// * `TooLong` - Name longer than 72 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();
        if length == 0 {
            Err(NameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Authorization role carried in access tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-side record of an issued refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: Uuid,
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn new(token: String, user_id: UserId, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            token,
            user_id,
            expires_at,
            created_at: Utc::now(),
        }
    }
}

/// Claims signed into access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub user_id: String,
    pub name: String,
    pub role: Role,
}

impl From<&User> for AccessClaims {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            role: user.role,
        }
    }
}

/// Claims signed into refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshClaims {
    pub user_id: String,
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub name: Name,
    pub email: EmailAddress,
    pub password: String,
    pub consent: bool,
    pub role: Role,
}

impl RegisterCommand {
    /// # Arguments
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(
        name: Name,
        email: EmailAddress,
        password: String,
        consent: bool,
        role: Role,
    ) -> Self {
        Self {
            name,
            email,
            password,
            consent,
            role,
        }
    }
}

/// Credentials presented at login.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Successful login: the user plus both freshly issued tokens.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of a forgot-password request.
///
/// Every variant is reported with the same success status so that callers
/// cannot probe which addresses are registered; only the message differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgotPasswordOutcome {
    UserNotFound,
    ConfirmationRequired,
    ResetLinkSent,
}

impl ForgotPasswordOutcome {
    pub fn message(&self) -> String {
        match self {
            ForgotPasswordOutcome::UserNotFound => messages::not_found("User"),
            ForgotPasswordOutcome::ConfirmationRequired => {
                messages::ACCOUNT_CONFIRMATION_REQUIRED.to_string()
            }
            ForgotPasswordOutcome::ResetLinkSent => messages::RESET_PASSWORD_LINK_SENT.to_string(),
        }
    }
}
