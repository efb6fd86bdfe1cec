use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::messages;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    body: Option<Json<RefreshTokenRequest>>,
) -> Result<ApiSuccess<()>, ApiError> {
    let refresh_token = body.and_then(|Json(body)| body.refresh_token);

    state
        .account_service
        .logout(refresh_token.as_deref())
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::empty(StatusCode::OK, messages::LOGOUT))
}

/// Body carrying an optional refresh token; shared by logout and refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}
