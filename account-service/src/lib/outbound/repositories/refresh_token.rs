use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::models::RefreshToken;
use crate::account::models::UserId;
use crate::account::ports::RefreshTokenRepository;

pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RefreshTokenRow {
    id: Uuid,
    token: String,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<RefreshTokenRow> for RefreshToken {
    fn from(r: RefreshTokenRow) -> Self {
        RefreshToken {
            id: r.id,
            token: r.token,
            user_id: UserId(r.user_id),
            expires_at: r.expires_at,
            created_at: r.created_at,
        }
    }
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, token, user_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(token.id)
        .bind(&token.token)
        .bind(token.user_id.0)
        .bind(token.expires_at)
        .bind(token.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::Internal(e.to_string()))?;

        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AccountError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT id, token, user_id, expires_at, created_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Internal(e.to_string()))?;

        Ok(row.map(RefreshToken::from))
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), AccountError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        Ok(())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<u64, AccountError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AccountError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
