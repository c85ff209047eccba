pub mod errors;
pub mod issuer;

pub use errors::RefreshTokenError;
pub use issuer::make_refresh_token;
pub use issuer::RefreshTokenIssuer;
pub use issuer::REFRESH_TOKEN_VALIDITY_DAYS;
