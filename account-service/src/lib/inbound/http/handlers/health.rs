use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::account::messages;

pub async fn health() -> ApiSuccess<HealthData> {
    ApiSuccess::new(
        StatusCode::OK,
        messages::SERVICE_HEALTHY,
        HealthData {
            application: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub application: &'static str,
    pub version: &'static str,
}
