use std::sync::Arc;

use async_trait::async_trait;
use auth::secrets;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::messages;
use crate::account::models::AccessClaims;
use crate::account::models::AccountConfirmation;
use crate::account::models::ForgotPasswordOutcome;
use crate::account::models::LoginCommand;
use crate::account::models::LoginOutcome;
use crate::account::models::PasswordReset;
use crate::account::models::RefreshClaims;
use crate::account::models::RefreshToken;
use crate::account::models::RegisterCommand;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::ports::AccountServicePort;
use crate::account::ports::Mailer;
use crate::account::ports::RefreshTokenRepository;
use crate::account::ports::UserRepository;
use crate::account::templates;
use crate::organisation::models::Organisation;
use crate::organisation::ports::OrganisationRepository;

const CONFIRMATION_CODE_DIGITS: usize = 6;

/// Links embedded in outgoing emails and the reset window.
#[derive(Debug, Clone)]
pub struct AccountSettings {
    /// Base URL of the auth API; confirmation links point here.
    pub public_url: String,
    /// Base URL of the frontend; reset links point here.
    pub client_url: String,
    pub password_reset_ttl: Duration,
}

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<UR, RR, OR, M>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    OR: OrganisationRepository,
    M: Mailer,
{
    users: Arc<UR>,
    refresh_tokens: Arc<RR>,
    organisations: Arc<OR>,
    mailer: Arc<M>,
    authenticator: Arc<Authenticator>,
    settings: AccountSettings,
}

impl<UR, RR, OR, M> AccountService<UR, RR, OR, M>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    OR: OrganisationRepository,
    M: Mailer,
{
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: Arc<RR>,
        organisations: Arc<OR>,
        mailer: Arc<M>,
        authenticator: Arc<Authenticator>,
        settings: AccountSettings,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            organisations,
            mailer,
            authenticator,
            settings,
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        self.users
            .find_by_email(email)
            .await
            .map_err(|e| AccountError::Internal(format!("Error finding user by email: {}", e)))
    }

    async fn find_user_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|e| AccountError::Internal(format!("Error finding user by id: {}", e)))
    }

    async fn find_organisation_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Organisation>, AccountError> {
        self.organisations.find_by_email(email).await.map_err(|e| {
            AccountError::Internal(format!("Error finding organisation by email: {}", e))
        })
    }

    async fn send_mail(&self, to: &User, subject: &str, html: String) -> Result<(), AccountError> {
        let recipients = [to.email.as_str().to_string()];
        self.mailer.send(&recipients, subject, &html).await?;
        Ok(())
    }
}

#[async_trait]
impl<UR, RR, OR, M> AccountServicePort for AccountService<UR, RR, OR, M>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    OR: OrganisationRepository,
    M: Mailer,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AccountError> {
        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| AccountError::Internal(format!("User registration failed: {}", e)))?;

        let token = secrets::random_id();
        let code = secrets::numeric_code(CONFIRMATION_CODE_DIGITS);

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            role: command.role,
            consent: command.consent,
            account_confirmation: AccountConfirmation::pending(token.clone(), code.clone()),
            password_reset: PasswordReset::default(),
            last_login_at: None,
            created_at: Utc::now(),
        };

        // The unique index on email decides conflicts; there is no pre-check.
        let created_user = self.users.create(user).await.map_err(|e| match e {
            AccountError::Internal(cause) => {
                AccountError::Internal(format!("User registration failed: {}", cause))
            }
            other => other,
        })?;

        let confirmation_url = format!(
            "{}/confirmation/{}?code={}",
            self.settings.public_url, token, code
        );
        self.send_mail(
            &created_user,
            "Confirm Your Account",
            templates::email_verification(&confirmation_url, &code),
        )
        .await
        .map_err(|e| AccountError::Internal(format!("User registration failed: {}", e)))?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn verify_account(&self, token: &str, code: &str) -> Result<(), AccountError> {
        let mut user = self
            .users
            .find_by_confirmation(token, code)
            .await?
            .ok_or(AccountError::InvalidLink)?;

        if user.account_confirmation.is_confirmed() {
            return Err(AccountError::AlreadyConfirmed);
        }

        user.account_confirmation.confirm(Utc::now());
        let user = self.users.update(user).await?;

        self.send_mail(
            &user,
            "Welcome: Account verified",
            templates::verification_successful(),
        )
        .await?;

        tracing::info!(user_id = %user.id, "Account confirmed");

        Ok(())
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError> {
        let mut user = self
            .find_user_by_email(&command.email)
            .await?
            .ok_or_else(|| AccountError::NotFound(messages::not_found("User")))?;

        let access_claims = AccessClaims::from(&user);
        let refresh_claims = RefreshClaims {
            user_id: user.id.to_string(),
        };

        let tokens = self
            .authenticator
            .authenticate(
                &command.password,
                &user.password_hash,
                &access_claims,
                &refresh_claims,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => err.into(),
                AuthenticationError::JwtError(err) => err.into(),
            })?;

        user.last_login_at = Some(Utc::now());
        let user = self.users.update(user).await?;

        self.refresh_tokens
            .create(RefreshToken::new(
                tokens.refresh_token.token.clone(),
                user.id,
                tokens.refresh_token.expires_at,
            ))
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user,
            access_token: tokens.access_token.token,
            refresh_token: tokens.refresh_token.token,
        })
    }

    async fn logout(&self, refresh_token: Option<&str>) -> Result<(), AccountError> {
        if let Some(token) = refresh_token.filter(|token| !token.is_empty()) {
            self.refresh_tokens.delete_by_token(token).await?;
        }

        Ok(())
    }

    async fn refresh_access_token(
        &self,
        refresh_token: Option<&str>,
    ) -> Result<String, AccountError> {
        let token = refresh_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AccountError::Unauthorized(messages::not_found("Refresh token")))?;

        if self.refresh_tokens.find_by_token(token).await?.is_none() {
            return Err(AccountError::Unauthorized(messages::INVALID_TOKEN.to_string()));
        }

        let claims: RefreshClaims = self
            .authenticator
            .verify_refresh_token(token)
            .map_err(|e| {
                tracing::warn!(error = %e, "Refresh token verification failed");
                AccountError::Unauthorized(messages::INVALID_TOKEN.to_string())
            })?;

        let user_id = UserId::from_string(&claims.user_id)
            .map_err(|_| AccountError::Unauthorized(messages::INVALID_TOKEN.to_string()))?;

        let user = self
            .find_user_by_id(&user_id)
            .await?
            .ok_or_else(|| AccountError::Unauthorized(messages::UNAUTHORIZED.to_string()))?;

        let access_token = self
            .authenticator
            .issue_access_token(&AccessClaims::from(&user))?;

        Ok(access_token.token)
    }

    async fn forgot_password(&self, email: &str) -> Result<ForgotPasswordOutcome, AccountError> {
        let Some(mut user) = self.find_user_by_email(email).await? else {
            return Ok(ForgotPasswordOutcome::UserNotFound);
        };

        if !user.account_confirmation.is_confirmed() {
            return Ok(ForgotPasswordOutcome::ConfirmationRequired);
        }

        let token = secrets::random_id();
        let expiry = Utc::now() + self.settings.password_reset_ttl;
        user.password_reset.request(token.clone(), expiry);
        let user = self.users.update(user).await?;

        let reset_link = format!("{}/reset-password/{}", self.settings.client_url, token);
        self.send_mail(
            &user,
            "Password reset request",
            templates::forgot_password(&reset_link),
        )
        .await?;

        tracing::info!(user_id = %user.id, expires_at = %expiry, "Password reset requested");

        Ok(ForgotPasswordOutcome::ResetLinkSent)
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AccountError> {
        let mut user = self
            .users
            .find_by_reset_token(token)
            .await?
            .ok_or(AccountError::InvalidLink)?;

        let now = Utc::now();
        if user.password_reset.is_expired(now) {
            return Err(AccountError::ResetLinkExpired);
        }

        user.password_hash = self.authenticator.hash_password(new_password)?;
        user.password_reset.complete(now);
        let user = self.users.update(user).await?;

        let revoked = self.refresh_tokens.delete_by_user(&user.id).await?;

        self.send_mail(
            &user,
            "Your password has been reset",
            templates::password_reset_successful(),
        )
        .await?;

        tracing::info!(user_id = %user.id, revoked_sessions = revoked, "Password reset");

        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, AccountError> {
        self.find_user_by_id(id)
            .await?
            .ok_or_else(|| AccountError::NotFound(messages::not_found("User")))
    }

    async fn get_organisation_by_email(
        &self,
        email: &str,
    ) -> Result<Organisation, AccountError> {
        self.find_organisation_by_email(email)
            .await?
            .ok_or_else(|| AccountError::NotFound(messages::not_found("Organisation")))
    }

    async fn purge_expired_refresh_tokens(
        &self,
        now: DateTime<Utc>,
    ) -> Result<u64, AccountError> {
        self.refresh_tokens.delete_expired(now).await
    }
}
