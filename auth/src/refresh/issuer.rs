use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::errors::RefreshTokenError;

/// Default refresh token validity window, in days.
pub const REFRESH_TOKEN_VALIDITY_DAYS: i64 = 60;

const TOKEN_BYTES: usize = 32;

/// Manufactures opaque refresh tokens.
///
/// Only the token value and its validity policy live here; persistence and
/// revocation belong to the credential store.
#[derive(Debug, Clone)]
pub struct RefreshTokenIssuer {
    validity: Duration,
}

impl RefreshTokenIssuer {
    pub fn new() -> Self {
        Self::with_validity(Duration::days(REFRESH_TOKEN_VALIDITY_DAYS))
    }

    pub fn with_validity(validity: Duration) -> Self {
        Self { validity }
    }

    /// Generate a new refresh token.
    ///
    /// # Returns
    /// 32 bytes from the operating system CSPRNG, hex encoded (64 characters)
    ///
    /// # Errors
    /// * `EntropyUnavailable` - The OS random source could not be read
    pub fn generate(&self) -> Result<String, RefreshTokenError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| RefreshTokenError::EntropyUnavailable(e.to_string()))?;

        Ok(hex::encode(bytes))
    }

    /// Expiry of a token issued at `issued_at`.
    pub fn expires_at(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + self.validity
    }
}

impl Default for RefreshTokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a refresh token with the default issuer.
pub fn make_refresh_token() -> Result<String, RefreshTokenError> {
    RefreshTokenIssuer::new().generate()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_generate_is_64_hex_chars() {
        let token = make_refresh_token().expect("Failed to generate refresh token");

        assert_eq!(token.len(), 64);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_generate_is_unique() {
        let issuer = RefreshTokenIssuer::new();
        let tokens: HashSet<String> = (0..100).map(|_| issuer.generate().unwrap()).collect();
        assert_eq!(tokens.len(), 100);
    }

    #[test]
    fn test_expires_after_sixty_days() {
        let issuer = RefreshTokenIssuer::new();
        let now = Utc::now();
        assert_eq!(issuer.expires_at(now) - now, Duration::days(60));
    }

    #[test]
    fn test_custom_validity() {
        let issuer = RefreshTokenIssuer::with_validity(Duration::days(7));
        let now = Utc::now();
        assert_eq!(issuer.expires_at(now), now + Duration::days(7));
    }
}
