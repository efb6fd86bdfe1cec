use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::forgot_password::forgot_password;
use super::handlers::get_organisation::get_organisation;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::not_found::not_found;
use super::handlers::refresh_token::refresh_token;
use super::handlers::register::register;
use super::handlers::reset_password::reset_password;
use super::handlers::verify_account::verify_account;
use super::middleware::authenticate as auth_middleware;
use crate::account::ports::AccountServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    authenticator: Arc<Authenticator>,
    allowed_origin: HeaderValue,
) -> Router {
    let state = AppState {
        account_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/confirmation/:token", put(verify_account))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", put(logout))
        .route("/api/v1/auth/refresh-token", post(refresh_token))
        .route("/api/v1/auth/forgot-password", put(forgot_password))
        .route("/api/v1/auth/reset-password/:token", put(reset_password));

    let protected_routes = Router::new()
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/organisations", get(get_organisation))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let cors_layer = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
            Method::HEAD,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(trace_layer)
        .layer(cors_layer)
        .with_state(state)
}
