use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::errors::MailerError;
use crate::account::models::ForgotPasswordOutcome;
use crate::account::models::LoginCommand;
use crate::account::models::LoginOutcome;
use crate::account::models::RefreshToken;
use crate::account::models::RegisterCommand;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::organisation::models::Organisation;

/// Port for account lifecycle operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new, unconfirmed user and email the confirmation link.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email address is already registered
    /// * `Internal` - Hashing, storage or mail delivery failed
    async fn register(&self, command: RegisterCommand) -> Result<User, AccountError>;

    /// Confirm an account with the token and code from the confirmation email.
    ///
    /// # Errors
    /// * `InvalidLink` - No user holds this token and code pair
    /// * `AlreadyConfirmed` - Account was confirmed before
    /// * `Internal` - Storage or mail delivery failed
    async fn verify_account(&self, token: &str, code: &str) -> Result<(), AccountError>;

    /// Check credentials and open a session.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `Internal` - Token signing or storage failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError>;

    /// Close the session behind a refresh token. Succeeds for unknown or absent tokens.
    ///
    /// # Errors
    /// * `Internal` - Storage failed
    async fn logout(&self, refresh_token: Option<&str>) -> Result<(), AccountError>;

    /// Exchange a stored, valid refresh token for a new access token.
    ///
    /// # Errors
    /// * `Unauthorized` - Token missing, unknown, invalid, expired, or its user is gone
    /// * `Internal` - Storage or signing failed
    async fn refresh_access_token(&self, refresh_token: Option<&str>)
        -> Result<String, AccountError>;

    /// Start a password reset. Never reveals whether the address is registered.
    ///
    /// # Errors
    /// * `Internal` - Storage or mail delivery failed
    async fn forgot_password(&self, email: &str) -> Result<ForgotPasswordOutcome, AccountError>;

    /// Finish a password reset with the emailed token.
    ///
    /// # Errors
    /// * `InvalidLink` - No user holds this reset token
    /// * `ResetLinkExpired` - Reset window has passed
    /// * `Internal` - Hashing or storage failed
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AccountError>;

    /// # Errors
    /// * `NotFound` - User does not exist
    async fn get_user(&self, id: &UserId) -> Result<User, AccountError>;

    /// # Errors
    /// * `NotFound` - No organisation with this email
    async fn get_organisation_by_email(&self, email: &str)
        -> Result<Organisation, AccountError>;

    /// Delete refresh tokens that expired before `now`.
    ///
    /// # Returns
    /// Number of deleted tokens
    async fn purge_expired_refresh_tokens(&self, now: DateTime<Utc>)
        -> Result<u64, AccountError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `AlreadyExists` - Email address is already registered (unique constraint)
    /// * `Internal` - Database operation failed
    async fn create(&self, user: User) -> Result<User, AccountError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;

    /// Retrieve the user holding both the confirmation token and code.
    async fn find_by_confirmation(
        &self,
        token: &str,
        code: &str,
    ) -> Result<Option<User>, AccountError>;

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, AccountError>;

    /// Overwrite the stored user with the given state.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Internal` - Database operation failed
    async fn update(&self, user: User) -> Result<User, AccountError>;
}

/// Persistence operations for refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, AccountError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AccountError>;

    /// Remove the row holding this token; absent rows are not an error.
    async fn delete_by_token(&self, token: &str) -> Result<(), AccountError>;

    /// Remove every token belonging to a user.
    ///
    /// # Returns
    /// Number of deleted tokens
    async fn delete_by_user(&self, user_id: &UserId) -> Result<u64, AccountError>;

    /// Remove tokens whose expiry is before `now`.
    ///
    /// # Returns
    /// Number of deleted tokens
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AccountError>;
}

/// Outbound email delivery.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send one HTML email to every recipient.
    ///
    /// # Errors
    /// * `SerializationFailed` - Email could not be encoded for the transport
    /// * `DeliveryFailed` - Transport rejected or timed out
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> Result<(), MailerError>;
}
