use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiQuery;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::messages;
use crate::account::models::Role;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::organisation::models::Organisation;

/// Organisation lookup, restricted to administrators.
pub async fn get_organisation(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<OrganisationQuery>,
) -> Result<ApiSuccess<OrganisationData>, ApiError> {
    if authenticated.role != Role::Admin {
        tracing::warn!(user_id = %authenticated.user_id, "Organisation lookup denied");
        return Err(AccountError::Forbidden.into());
    }

    state
        .account_service
        .get_organisation_by_email(&query.email)
        .await
        .map_err(ApiError::from)
        .map(|ref organisation| {
            ApiSuccess::new(
                StatusCode::OK,
                messages::found("Organisation"),
                organisation.into(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrganisationQuery {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationData {
    pub id: String,
    pub name: String,
    pub email_address: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Organisation> for OrganisationData {
    fn from(organisation: &Organisation) -> Self {
        Self {
            id: organisation.id.to_string(),
            name: organisation.name.clone(),
            email_address: organisation.email.as_str().to_string(),
            created_at: organisation.created_at,
        }
    }
}
