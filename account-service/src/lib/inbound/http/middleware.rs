use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the bearer access token and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = auth::extract_bearer_token(req.headers())?;

    let user_id = state
        .authenticator
        .resolve_identity(token)
        .map_err(auth::AuthenticationError::from)?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId::from(user_id),
    });

    Ok(next.run(req).await)
}

/// Middleware that admits only callers presenting `Authorization: ApiKey <key>`
/// with the configured payment provider key
///
/// Runs before body extraction, so unauthenticated callers always get 401.
pub async fn require_polka_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let api_key = auth::extract_api_key(req.headers())?;

    let matches: bool = api_key
        .as_bytes()
        .ct_eq(state.polka_api_key.as_bytes())
        .into();
    if !matches {
        tracing::warn!("Webhook rejected: API key mismatch");
        return Err(ApiError::Unauthorized("Unauthorized".to_string()));
    }

    Ok(next.run(req).await)
}
