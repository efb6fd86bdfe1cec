use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::models::EmailAddress;
use crate::organisation::models::Organisation;
use crate::organisation::ports::OrganisationRepository;

pub struct PostgresOrganisationRepository {
    pool: PgPool,
}

impl PostgresOrganisationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OrganisationRow {
    id: Uuid,
    name: String,
    email_address: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl OrganisationRepository for PostgresOrganisationRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Organisation>, AccountError> {
        let row = sqlx::query_as::<_, OrganisationRow>(
            r#"
            SELECT id, name, email_address, created_at
            FROM organisations
            WHERE email_address = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Internal(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Organisation {
                id: r.id,
                name: r.name,
                email: EmailAddress::new(r.email_address)?,
                created_at: r.created_at,
            })),
            None => Ok(None),
        }
    }
}
