use async_trait::async_trait;
use auth::CredentialStore;
use auth::NewRefreshToken;
use auth::StoreError;
use auth::StoredCredential;
use sqlx::PgPool;
use uuid::Uuid;

/// Credential store over the `users` and `refresh_tokens` tables.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_error(e: sqlx::Error) -> StoreError {
    StoreError(e.to_string())
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_credential_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredential>, StoreError> {
        let row = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            SELECT id, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(|(user_id, password_hash)| StoredCredential {
            user_id,
            password_hash,
        }))
    }

    async fn save_refresh_token(&self, token: &NewRefreshToken) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&token.token)
        .bind(token.user_id)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn find_refresh_token_owner(&self, token: &str) -> Result<Option<Uuid>, StoreError> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT user_id
            FROM refresh_tokens
            WHERE token = $1 AND revoked_at IS NULL AND expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = COALESCE(revoked_at, NOW()), updated_at = NOW()
            WHERE token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}
