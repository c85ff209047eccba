use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

/// Opaque failure reported by a credential store implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Credential store error: {0}")]
pub struct StoreError(pub String);

/// Credential of a registered user as held by the store.
#[derive(Debug, Clone)]
pub struct StoredCredential {
    pub user_id: Uuid,
    pub password_hash: String,
}

/// Refresh token row to persist after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRefreshToken {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Persistence the authenticator depends on.
///
/// Implemented by the service that owns the users and refresh token tables.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Look up the credential of the user registered under `email`.
    ///
    /// # Returns
    /// Optional credential (None if no user has this email)
    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredential>, StoreError>;

    /// Persist a freshly issued refresh token.
    async fn save_refresh_token(&self, token: &NewRefreshToken) -> Result<(), StoreError>;

    /// Resolve the owner of an active refresh token.
    ///
    /// # Returns
    /// Owning user id, or None if the token is unknown, revoked, or expired
    async fn find_refresh_token_owner(&self, token: &str) -> Result<Option<Uuid>, StoreError>;

    /// Mark a refresh token revoked.
    ///
    /// Revoking an already revoked token succeeds and keeps the original
    /// revocation time.
    ///
    /// # Returns
    /// False if the token is unknown
    async fn revoke_refresh_token(&self, token: &str) -> Result<bool, StoreError>;
}
