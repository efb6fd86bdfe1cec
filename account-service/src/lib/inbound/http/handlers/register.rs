use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::account::errors::EmailError;
use crate::account::errors::NameError;
use crate::account::errors::RoleError;
use crate::account::messages;
use crate::account::models::EmailAddress;
use crate::account::models::Name;
use crate::account::models::RegisterCommand;
use crate::account::models::Role;
use crate::account::models::User;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, messages::SUCCESS, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    name: String,
    email_address: String,
    password: String,
    consent: bool,
    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let name = Name::new(self.name)?;
        let email_address = EmailAddress::new(self.email_address)?;
        let role = match self.role {
            Some(role) => role.parse()?,
            None => Role::default(),
        };
        Ok(RegisterCommand::new(
            name,
            email_address,
            self.password,
            self.consent,
            role,
        ))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Registered user as returned to the caller; confirmation secrets stay server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponseData {
    pub id: String,
    pub name: String,
    pub email_address: String,
    pub role: Role,
    pub consent: bool,
    pub account_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for RegisterResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email_address: user.email.as_str().to_string(),
            role: user.role,
            consent: user.consent,
            account_confirmed: user.account_confirmation.is_confirmed(),
            created_at: user.created_at,
        }
    }
}
