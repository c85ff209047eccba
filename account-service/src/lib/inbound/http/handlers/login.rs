use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::create_user::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let outcome = state
        .user_service
        .login(LoginCommand {
            email: body.email,
            password: body.password,
            expires_in_seconds: body.expires_in_seconds,
        })
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user: (&outcome.user).into(),
            token: outcome.access_token,
            refresh_token: outcome.refresh_token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
    #[serde(default)]
    expires_in_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    #[serde(flatten)]
    pub user: UserData,
    pub token: String,
    pub refresh_token: String,
}
