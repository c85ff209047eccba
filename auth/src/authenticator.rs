use std::sync::OnceLock;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::jwt::clamp_ttl;
use crate::jwt::AccessTokenCodec;
use crate::jwt::TokenError;
use crate::jwt::MAX_ACCESS_TOKEN_TTL_SECONDS;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::RefreshTokenError;
use crate::refresh::RefreshTokenIssuer;
use crate::store::CredentialStore;
use crate::store::NewRefreshToken;
use crate::store::StoreError;

/// Authentication coordinator combining password verification, access token
/// handling and refresh token lifecycle.
///
/// Holds no mutable state; share it behind an `Arc` across request handlers.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: AccessTokenCodec,
    refresh_issuer: RefreshTokenIssuer,
    access_token_ttl: Duration,
    /// Hash verified against when the email is unknown, so both rejection
    /// paths pay the same Argon2 cost. Built lazily with the current hasher.
    decoy_password_hash: OnceLock<String>,
}

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginTokens {
    pub user_id: Uuid,
    /// Signed access token
    pub access_token: String,
    /// Opaque refresh token, already persisted
    pub refresh_token: String,
    pub refresh_token_expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Refresh token is unknown, expired, or revoked")]
    InvalidRefreshToken,

    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Refresh token error: {0}")]
    RefreshToken(#[from] RefreshTokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    ///
    /// # Returns
    /// Authenticator with a 3600 second access token lifetime and a 60 day
    /// refresh token validity window
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: AccessTokenCodec::new(jwt_secret),
            refresh_issuer: RefreshTokenIssuer::new(),
            access_token_ttl: Duration::seconds(MAX_ACCESS_TOKEN_TTL_SECONDS),
            decoy_password_hash: OnceLock::new(),
        }
    }

    /// Override the access token lifetime used by `login` when the caller
    /// requests none (clamped to 3600 seconds).
    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = clamp_ttl(ttl);
        self
    }

    /// Override the refresh token validity window.
    pub fn with_refresh_token_validity(mut self, validity: Duration) -> Self {
        self.refresh_issuer = RefreshTokenIssuer::with_validity(validity);
        self
    }

    /// Replace the password hasher, e.g. to tune its cost.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self.decoy_password_hash = OnceLock::new();
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token plus a persisted refresh token.
    ///
    /// # Arguments
    /// * `store` - Credential store holding users and refresh tokens
    /// * `email` - Email the user registered with
    /// * `password` - Plaintext password to verify
    /// * `requested_ttl` - Caller-requested access token lifetime, clamped
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Token` - Access token generation failed
    /// * `RefreshToken` - No entropy for the refresh token
    /// * `Store` - Credential lookup or refresh token persistence failed
    pub async fn login<S>(
        &self,
        store: &S,
        email: &str,
        password: &str,
        requested_ttl: Option<Duration>,
    ) -> Result<LoginTokens, AuthenticationError>
    where
        S: CredentialStore + ?Sized,
    {
        let Some(credential) = store.find_credential_by_email(email).await? else {
            // Burn the same hashing work as a real mismatch.
            let _ = self.password_hasher.verify(password, self.decoy_password_hash());
            tracing::debug!("Login rejected: no user for email");
            return Err(AuthenticationError::InvalidCredentials);
        };

        self.password_hasher
            .verify(password, &credential.password_hash)
            .map_err(|_| {
                tracing::debug!(user_id = %credential.user_id, "Login rejected: password mismatch");
                AuthenticationError::InvalidCredentials
            })?;

        let ttl = requested_ttl.map_or(self.access_token_ttl, clamp_ttl);
        let access_token = self.token_codec.issue(credential.user_id, ttl)?;

        let refresh_token = self.refresh_issuer.generate()?;
        let refresh_token_expires_at = self.refresh_issuer.expires_at(Utc::now());

        store
            .save_refresh_token(&NewRefreshToken {
                token: refresh_token.clone(),
                user_id: credential.user_id,
                expires_at: refresh_token_expires_at,
            })
            .await?;

        tracing::info!(user_id = %credential.user_id, "User logged in");

        Ok(LoginTokens {
            user_id: credential.user_id,
            access_token,
            refresh_token,
            refresh_token_expires_at,
        })
    }

    /// Exchange an active refresh token for a new access token.
    ///
    /// The new access token always lives 3600 seconds. The refresh token
    /// itself is neither rotated nor consumed.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token unknown, revoked, or expired
    /// * `Token` - Access token generation failed
    /// * `Store` - Lookup failed
    pub async fn refresh<S>(&self, store: &S, refresh_token: &str) -> Result<String, AuthenticationError>
    where
        S: CredentialStore + ?Sized,
    {
        let user_id = store
            .find_refresh_token_owner(refresh_token)
            .await?
            .ok_or(AuthenticationError::InvalidRefreshToken)?;

        let ttl = Duration::seconds(MAX_ACCESS_TOKEN_TTL_SECONDS);
        Ok(self.token_codec.issue(user_id, ttl)?)
    }

    /// Revoke a refresh token.
    ///
    /// # Errors
    /// * `RefreshTokenNotFound` - Token unknown to the store
    /// * `Store` - Update failed
    pub async fn revoke<S>(&self, store: &S, refresh_token: &str) -> Result<(), AuthenticationError>
    where
        S: CredentialStore + ?Sized,
    {
        if store.revoke_refresh_token(refresh_token).await? {
            Ok(())
        } else {
            Err(AuthenticationError::RefreshTokenNotFound)
        }
    }

    fn decoy_password_hash(&self) -> &str {
        self.decoy_password_hash.get_or_init(|| {
            self.password_hasher.hash(DECOY_PASSWORD).unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to build decoy password hash");
                String::new()
            })
        })
    }

    /// Resolve the user identified by a bearer access token.
    ///
    /// # Errors
    /// * `TokenError` - Token rejected; the subtype is logged, not meant for clients
    pub fn resolve_identity(&self, bearer_token: &str) -> Result<Uuid, TokenError> {
        self.token_codec.verify(bearer_token).map_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
            e
        })
    }
}
