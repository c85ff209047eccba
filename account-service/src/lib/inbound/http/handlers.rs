use auth::AuthenticationError;
use auth::HeaderError;
use auth::TokenError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::UserError;

pub mod create_user;
pub mod health;
pub mod login;
pub mod polka_webhook;
pub mod refresh;
pub mod revoke;
pub mod update_user;

const INCORRECT_CREDENTIALS: &str = "Incorrect email or password";
const UNAUTHORIZED: &str = "Unauthorized";
const INTERNAL_SERVER_ERROR: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    fn internal(err: impl std::fmt::Display) -> Self {
        tracing::error!(error = %err, "Request failed");
        ApiError::InternalServerError(INTERNAL_SERVER_ERROR.to_string())
    }

    fn unauthorized(err: impl std::fmt::Display) -> Self {
        tracing::warn!(error = %err, "Request unauthorized");
        ApiError::Unauthorized(UNAUTHORIZED.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<HeaderError> for ApiError {
    fn from(err: HeaderError) -> Self {
        Self::unauthorized(err)
    }
}

impl From<AuthenticationError> for ApiError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => {
                tracing::info!("Login rejected");
                ApiError::Unauthorized(INCORRECT_CREDENTIALS.to_string())
            }
            AuthenticationError::Token(TokenError::EncodingFailed(_)) => Self::internal(err),
            AuthenticationError::Token(_)
            | AuthenticationError::InvalidRefreshToken
            | AuthenticationError::RefreshTokenNotFound => Self::unauthorized(err),
            AuthenticationError::Password(_)
            | AuthenticationError::RefreshToken(_)
            | AuthenticationError::Store(_) => Self::internal(err),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidEmail(_) | UserError::InvalidUserId(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::Authentication(err) => ApiError::from(err),
            UserError::DatabaseError(_) => Self::internal(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use auth::StoreError;

    use super::*;

    #[test]
    fn test_credential_errors_are_generic() {
        let api_error = ApiError::from(UserError::Authentication(
            AuthenticationError::InvalidCredentials,
        ));
        assert_eq!(
            api_error,
            ApiError::Unauthorized("Incorrect email or password".to_string())
        );
    }

    #[test]
    fn test_token_subtypes_are_hidden() {
        let expired = ApiError::from(AuthenticationError::Token(TokenError::TokenExpired));
        let issuer = ApiError::from(AuthenticationError::Token(TokenError::IssuerMismatch));
        let revoked = ApiError::from(AuthenticationError::InvalidRefreshToken);

        assert_eq!(expired, ApiError::Unauthorized("Unauthorized".to_string()));
        assert_eq!(expired, issuer);
        assert_eq!(expired, revoked);
    }

    #[test]
    fn test_store_errors_do_not_leak() {
        let api_error = ApiError::from(AuthenticationError::Store(StoreError(
            "relation \"users\" does not exist".to_string(),
        )));
        assert_eq!(
            api_error,
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_header_errors_are_unauthorized() {
        assert_eq!(
            ApiError::from(HeaderError::MissingHeader),
            ApiError::Unauthorized("Unauthorized".to_string())
        );
    }
}
