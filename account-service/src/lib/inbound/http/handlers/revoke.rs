use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use crate::inbound::http::router::AppState;

pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = auth::extract_bearer_token(&headers)?;

    state.user_service.revoke(refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}
