use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::messages;
use crate::account::models::AccountConfirmation;
use crate::account::models::EmailAddress;
use crate::account::models::Name;
use crate::account::models::PasswordReset;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::ports::UserRepository;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_address_key";

const SELECT_USER: &str = r#"
    SELECT id, name, email_address, password_hash, role, consent,
           confirmation_status, confirmation_token, confirmation_code, confirmed_at,
           reset_token, reset_expiry, last_reset_at, last_login_at, created_at
    FROM users
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        clause: &str,
        binds: &[&str],
    ) -> Result<Option<User>, AccountError> {
        let sql = format!("{} WHERE {}", SELECT_USER, clause);
        let mut query = sqlx::query_as::<_, UserRow>(&sql);
        for value in binds {
            query = query.bind(*value);
        }

        query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email_address: String,
    password_hash: String,
    role: String,
    consent: bool,
    confirmation_status: bool,
    confirmation_token: String,
    confirmation_code: String,
    confirmed_at: Option<DateTime<Utc>>,
    reset_token: Option<String>,
    reset_expiry: Option<DateTime<Utc>>,
    last_reset_at: Option<DateTime<Utc>>,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AccountError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(r.id),
            name: Name::new(r.name)?,
            email: EmailAddress::new(r.email_address)?,
            password_hash: r.password_hash,
            role: r.role.parse()?,
            consent: r.consent,
            account_confirmation: AccountConfirmation {
                status: r.confirmation_status,
                token: r.confirmation_token,
                code: r.confirmation_code,
                timestamp: r.confirmed_at,
            },
            password_reset: PasswordReset {
                token: r.reset_token,
                expiry: r.reset_expiry,
                last_reset_at: r.last_reset_at,
            },
            last_login_at: r.last_login_at,
            created_at: r.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email_address, password_hash, role, consent,
                confirmation_status, confirmation_token, confirmation_code, confirmed_at,
                reset_token, reset_expiry, last_reset_at, last_login_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(user.id.0)
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.consent)
        .bind(user.account_confirmation.status)
        .bind(&user.account_confirmation.token)
        .bind(&user.account_confirmation.code)
        .bind(user.account_confirmation.timestamp)
        .bind(&user.password_reset.token)
        .bind(user.password_reset.expiry)
        .bind(user.password_reset.last_reset_at)
        .bind(user.last_login_at)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return AccountError::AlreadyExists(messages::already_exists(
                        "User",
                        "emailAddress",
                    ));
                }
            }
            AccountError::Internal(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        let sql = format!("{} WHERE id = $1", SELECT_USER);
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        self.fetch_one_where("email_address = $1", &[email]).await
    }

    async fn find_by_confirmation(
        &self,
        token: &str,
        code: &str,
    ) -> Result<Option<User>, AccountError> {
        self.fetch_one_where(
            "confirmation_token = $1 AND confirmation_code = $2",
            &[token, code],
        )
        .await
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, AccountError> {
        self.fetch_one_where("reset_token = $1", &[token]).await
    }

    async fn update(&self, user: User) -> Result<User, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, password_hash = $3, role = $4, consent = $5,
                confirmation_status = $6, confirmed_at = $7,
                reset_token = $8, reset_expiry = $9, last_reset_at = $10,
                last_login_at = $11
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.name.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.consent)
        .bind(user.account_confirmation.status)
        .bind(user.account_confirmation.timestamp)
        .bind(&user.password_reset.token)
        .bind(user.password_reset.expiry)
        .bind(user.password_reset.last_reset_at)
        .bind(user.last_login_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::Internal(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(messages::not_found("User")));
        }

        Ok(user)
    }
}
