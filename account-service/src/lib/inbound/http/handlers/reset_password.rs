use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::account::messages;
use crate::inbound::http::router::AppState;

pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    ApiJson(body): ApiJson<ResetPasswordRequest>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .account_service
        .reset_password(&token, &body.new_password)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::empty(StatusCode::OK, messages::PASSWORD_RESET))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    new_password: String,
}
