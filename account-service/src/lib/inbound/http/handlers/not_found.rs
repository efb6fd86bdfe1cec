use super::ApiError;
use crate::account::messages;

pub async fn not_found() -> ApiError {
    ApiError::NotFound(messages::not_found("Route"))
}
