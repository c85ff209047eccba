use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::TokenError;

/// Issuer stamped into every access token signed by this service.
pub const ISSUER: &str = "chirpy";

/// Longest lifetime an access token may be issued with, in seconds.
pub const MAX_ACCESS_TOKEN_TTL_SECONDS: i64 = 3600;

/// Clamp a requested access token lifetime into `(0, 3600]` seconds.
///
/// Non-positive or oversized requests fall back to the maximum.
pub fn clamp_ttl(requested: Duration) -> Duration {
    let max = Duration::seconds(MAX_ACCESS_TOKEN_TTL_SECONDS);
    if requested <= Duration::zero() || requested > max {
        max
    } else {
        requested
    }
}

/// Clamp a requested access token lifetime given in whole seconds.
///
/// Takes the raw client value, so it never builds a `Duration` from an
/// out-of-range integer.
pub fn clamp_ttl_seconds(requested: i64) -> Duration {
    if requested <= 0 || requested > MAX_ACCESS_TOKEN_TTL_SECONDS {
        Duration::seconds(MAX_ACCESS_TOKEN_TTL_SECONDS)
    } else {
        Duration::seconds(requested)
    }
}

/// Access token codec for issuing and verifying signed tokens.
///
/// Uses HS256 (HMAC with SHA-256) keyed by the server secret. Tokens are
/// stateless: validity is decided entirely by signature, issuer and expiry.
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
}

impl AccessTokenCodec {
    /// Create a new codec with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - The secret must stay constant for as long as issued tokens must validate
    pub fn new(secret: &[u8]) -> Self {
        Self::with_issuer(secret, ISSUER)
    }

    /// Create a codec that signs and expects a different issuer.
    pub fn with_issuer(secret: &[u8], issuer: impl ToString) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: issuer.to_string(),
        }
    }

    /// Issue an access token for a user, valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(user_id, ttl, Utc::now())
    }

    /// Issue an access token with an explicit issue instant.
    ///
    /// `ttl` is clamped with [`clamp_ttl`].
    pub fn issue_at(
        &self,
        user_id: Uuid,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::for_user(&self.issuer, user_id, now, clamp_ttl(ttl));
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify an access token and return the user it identifies.
    ///
    /// # Errors
    /// * `Malformed` - Not a well-formed token
    /// * `SignatureInvalid` - Signed with another secret, or tampered with
    /// * `IssuerMismatch` - Issued by someone else
    /// * `TokenExpired` - Current time is at or past `exp`
    /// * `MalformedSubject` - Subject missing or not a user identifier
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify an access token against an explicit current instant.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Uuid, TokenError> {
        let claims = self.decode(token)?;

        // Issuer first: a token minted elsewhere with the same secret must
        // never have its subject trusted here.
        if claims.iss.as_deref() != Some(self.issuer.as_str()) {
            return Err(TokenError::IssuerMismatch);
        }

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::TokenExpired);
        }

        claims.subject().ok_or(TokenError::MalformedSubject)
    }

    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry and issuer are checked by `verify_at` in a fixed order
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::SignatureInvalid
                }
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}

/// Issue an access token for `user_id` signed with `secret`.
pub fn make_access_token(user_id: Uuid, secret: &[u8], ttl: Duration) -> Result<String, TokenError> {
    AccessTokenCodec::new(secret).issue(user_id, ttl)
}

/// Validate an access token signed with `secret` and return its user.
pub fn validate_access_token(token: &str, secret: &[u8]) -> Result<Uuid, TokenError> {
    AccessTokenCodec::new(secret).verify(token)
}
