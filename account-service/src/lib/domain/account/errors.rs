use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for display name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Error for mail delivery operations
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    #[error("Failed to serialize email: {0}")]
    SerializationFailed(String),

    #[error("Failed to hand email to transport: {0}")]
    DeliveryFailed(String),
}

/// Top-level error for all account operations.
///
/// Each variant maps to one HTTP status in the inbound layer; the display
/// text is safe to surface to callers.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid email address or password")]
    InvalidCredentials,

    #[error("Invalid account confirmation token or code")]
    InvalidLink,

    #[error("Account already confirmed")]
    AlreadyConfirmed,

    #[error("Password reset link has expired")]
    ResetLinkExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("You are not allowed to perform this action")]
    Forbidden,

    #[error("{0}")]
    Internal(String),
}

impl From<auth::PasswordError> for AccountError {
    fn from(err: auth::PasswordError) -> Self {
        AccountError::Internal(err.to_string())
    }
}

impl From<auth::JwtError> for AccountError {
    fn from(err: auth::JwtError) -> Self {
        AccountError::Internal(err.to_string())
    }
}

impl From<MailerError> for AccountError {
    fn from(err: MailerError) -> Self {
        AccountError::Internal(err.to_string())
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        AccountError::Internal(err.to_string())
    }
}
