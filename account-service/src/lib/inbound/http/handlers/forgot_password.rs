use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Always answers 200 for a well-formed request; the message is the only
/// thing that varies between unknown, unconfirmed and eligible accounts.
pub async fn forgot_password(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ForgotPasswordRequest>,
) -> Result<ApiSuccess<()>, ApiError> {
    let outcome = state
        .account_service
        .forgot_password(&body.email_address)
        .await?;

    Ok(ApiSuccess::empty(StatusCode::OK, outcome.message()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    email_address: String,
}
