use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::models::EmailAddress;

/// Tenant owning a set of user accounts, keyed by its contact email.
#[derive(Debug, Clone, PartialEq)]
pub struct Organisation {
    pub id: Uuid,
    pub name: String,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}
