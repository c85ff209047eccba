//! Authentication and token lifecycle library
//!
//! Provides the authentication core of the account service:
//! - Password hashing (Argon2id)
//! - `Authorization` header credential extraction
//! - Access token (JWT, HS256) issuance and validation
//! - Refresh token generation
//! - Login / refresh / revoke coordination over a [`CredentialStore`]
//!
//! Persistence is not handled here: the hosting service implements
//! [`CredentialStore`] over its own tables.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! assert!(hasher.verify("not_my_password", &hash).is_err());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::AccessTokenCodec;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let codec = AccessTokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = codec.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(codec.verify(&token).unwrap(), user_id);
//! ```
//!
//! ## Header Extraction
//! ```
//! use auth::extract_bearer_token;
//! use http::HeaderMap;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("authorization", "Bearer abc123".parse().unwrap());
//! assert_eq!(extract_bearer_token(&headers).unwrap(), "abc123");
//! ```

pub mod authenticator;
pub mod header;
pub mod jwt;
pub mod password;
pub mod refresh;
pub mod store;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::LoginTokens;
pub use header::extract_api_key;
pub use header::extract_bearer_token;
pub use header::HeaderError;
pub use jwt::make_access_token;
pub use jwt::validate_access_token;
pub use jwt::AccessTokenCodec;
pub use jwt::TokenError;
pub use password::check_password_hash;
pub use password::hash_password;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::make_refresh_token;
pub use refresh::RefreshTokenError;
pub use refresh::RefreshTokenIssuer;
pub use store::CredentialStore;
pub use store::NewRefreshToken;
pub use store::StoreError;
pub use store::StoredCredential;
