use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiQuery;
use super::ApiSuccess;
use crate::account::messages;
use crate::inbound::http::router::AppState;

pub async fn verify_account(
    State(state): State<AppState>,
    Path(token): Path<String>,
    ApiQuery(query): ApiQuery<VerifyAccountQuery>,
) -> Result<ApiSuccess<()>, ApiError> {
    let code = query.code.unwrap_or_default();

    state
        .account_service
        .verify_account(&token, &code)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::empty(StatusCode::OK, messages::EMAIL_VERIFIED))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyAccountQuery {
    code: Option<String>,
}
