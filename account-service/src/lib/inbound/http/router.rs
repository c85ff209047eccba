use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
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

use super::handlers::create_user::create_user;
use super::handlers::health::healthz;
use super::handlers::login::login;
use super::handlers::polka_webhook::polka_webhook;
use super::handlers::refresh::refresh;
use super::handlers::revoke::revoke;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_polka_api_key;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub polka_api_key: String,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    authenticator: Arc<Authenticator>,
    polka_api_key: String,
) -> Router {
    let state = AppState {
        user_service,
        authenticator,
        polka_api_key,
    };

    let public_routes = Router::new()
        .route("/api/healthz", get(healthz))
        .route("/api/users", post(create_user))
        .route("/api/login", post(login))
        .route("/api/refresh", post(refresh))
        .route("/api/revoke", post(revoke));

    let webhook_routes = Router::new()
        .route("/api/polka/webhooks", post(polka_webhook))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_polka_api_key,
        ));

    let protected_routes = Router::new()
        .route("/api/users", put(update_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry credentials.
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
        .merge(webhook_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
