use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::CredentialStore;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// Credential checks and token lifecycle are delegated to the shared
/// [`Authenticator`], which reaches persistence through `CS`.
pub struct UserService<UR, CS>
where
    UR: UserRepository,
    CS: CredentialStore,
{
    repository: Arc<UR>,
    credential_store: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<UR, CS> UserService<UR, CS>
where
    UR: UserRepository,
    CS: CredentialStore,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `credential_store` - Credential and refresh token persistence
    /// * `authenticator` - Password and token coordinator
    pub fn new(
        repository: Arc<UR>,
        credential_store: Arc<CS>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            credential_store,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR, CS> UserServicePort for UserService<UR, CS>
where
    UR: UserRepository,
    CS: CredentialStore,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            is_chirpy_red: false,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User created");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        user.email = command.email;
        user.password_hash = self.authenticator.hash_password(&command.password)?;
        user.updated_at = Utc::now();

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User credentials updated");

        Ok(updated_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError> {
        let requested_ttl = command.expires_in_seconds.map(auth::jwt::clamp_ttl_seconds);

        let tokens = self
            .authenticator
            .login(
                self.credential_store.as_ref(),
                &command.email,
                &command.password,
                requested_ttl,
            )
            .await?;

        let user_id = UserId(tokens.user_id);
        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(UserError::NotFound(user_id.to_string()))?;

        Ok(LoginOutcome {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, UserError> {
        Ok(self
            .authenticator
            .refresh(self.credential_store.as_ref(), refresh_token)
            .await?)
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), UserError> {
        self.authenticator
            .revoke(self.credential_store.as_ref(), refresh_token)
            .await?;
        tracing::info!("Refresh token revoked");
        Ok(())
    }

    async fn upgrade_to_chirpy_red(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.upgrade_to_chirpy_red(id).await?;
        tracing::info!(user_id = %id, "User upgraded to Chirpy Red");
        Ok(())
    }
}
