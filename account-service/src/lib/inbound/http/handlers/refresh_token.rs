use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::logout::RefreshTokenRequest;
use super::ApiError;
use super::ApiSuccess;
use crate::account::messages;
use crate::inbound::http::router::AppState;

pub async fn refresh_token(
    State(state): State<AppState>,
    body: Option<Json<RefreshTokenRequest>>,
) -> Result<ApiSuccess<RefreshTokenResponseData>, ApiError> {
    let refresh_token = body.and_then(|Json(body)| body.refresh_token);

    let access_token = state
        .account_service
        .refresh_access_token(refresh_token.as_deref())
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        messages::found("Refresh token"),
        RefreshTokenResponseData { access_token },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponseData {
    pub access_token: String,
}
