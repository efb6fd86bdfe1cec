use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::messages;
use crate::account::models::LoginCommand;
use crate::account::models::User;
use crate::inbound::http::router::AppState;

/// An unknown email is reported as 422, unlike lookups elsewhere which use 404.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let outcome = state
        .account_service
        .login(LoginCommand {
            email: body.email_address,
            password: body.password,
        })
        .await
        .map_err(|e| match e {
            AccountError::NotFound(message) => ApiError::UnprocessableEntity(message),
            other => other.into(),
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        messages::LOGIN,
        LoginResponseData {
            user: (&outcome.user).into(),
            access_token: outcome.access_token,
            refresh_token: outcome.refresh_token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    email_address: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseData {
    pub user: UserSummary,
    pub access_token: String,
    pub refresh_token: String,
}

/// Minimal user projection returned at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email_address: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email_address: user.email.as_str().to_string(),
        }
    }
}
