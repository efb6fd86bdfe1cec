use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;

pub mod forgot_password;
pub mod get_organisation;
pub mod health;
pub mod login;
pub mod logout;
pub mod me;
pub mod not_found;
pub mod refresh_token;
pub mod register;
pub mod reset_password;
pub mod verify_account;

/// Uniform response body: `{success, status, message, data}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiMessage<T: Serialize> {
    success: bool,
    status: u16,
    message: String,
    data: Option<T>,
}

impl<T: Serialize> ApiMessage<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: status.is_success(),
            status: status.as_u16(),
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<ApiMessage<T>>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(status, Json(ApiMessage::new(status, message, Some(data))))
    }
}

impl ApiSuccess<()> {
    /// Success without payload; `data` is rendered as `null`.
    pub fn empty(status: StatusCode, message: impl Into<String>) -> Self {
        ApiSuccess(status, Json(ApiMessage::new(status, message, None)))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        }

        (status, Json(ApiMessage::<()>::new(status, message, None))).into_response()
    }
}

/// JSON body extractor whose rejections are rendered through `ApiError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections are rendered through `ApiError`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::UnprocessableEntity(message),
            _ => ApiError::BadRequest(message),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidName(_)
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidRole(_)
            | AccountError::AlreadyExists(_) => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::InvalidCredentials
            | AccountError::InvalidLink
            | AccountError::AlreadyConfirmed
            | AccountError::ResetLinkExpired => ApiError::BadRequest(err.to_string()),
            AccountError::InvalidToken(_) | AccountError::Unauthorized(_) => {
                ApiError::Unauthorized(err.to_string())
            }
            AccountError::Forbidden => ApiError::Forbidden(err.to_string()),
            AccountError::Internal(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                AccountError::AlreadyExists("taken".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AccountError::NotFound("gone".to_string()), StatusCode::NOT_FOUND),
            (AccountError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (AccountError::InvalidLink, StatusCode::BAD_REQUEST),
            (
                AccountError::InvalidToken("expired".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (AccountError::AlreadyConfirmed, StatusCode::BAD_REQUEST),
            (
                AccountError::Unauthorized("no".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (AccountError::Forbidden, StatusCode::FORBIDDEN),
            (
                AccountError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = ApiError::from(error).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_message_shape() {
        let body = serde_json::to_value(ApiMessage::new(
            StatusCode::OK,
            "Logged out successfully",
            None::<()>,
        ))
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "success": true,
                "status": 200,
                "message": "Logged out successfully",
                "data": null
            })
        );
    }

    #[test]
    fn test_error_message_is_unsuccessful() {
        let body = serde_json::to_value(ApiMessage::<()>::new(
            StatusCode::UNAUTHORIZED,
            "Invalid or expired token",
            None,
        ))
        .unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 401);
    }
}
