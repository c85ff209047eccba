use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Access token claims.
///
/// Fixed shape: every token this service signs carries exactly these four
/// registered claims. `iss` and `sub` are optional on the way in so a token
/// lacking them is reported as an issuer or subject failure rather than a
/// decoding failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Subject (user identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, valid from `now` for `ttl`.
    ///
    /// # Arguments
    /// * `issuer` - Issuer string stamped into `iss`
    /// * `user_id` - Subject of the token
    /// * `now` - Issue instant
    /// * `ttl` - Lifetime of the token
    pub fn for_user(issuer: &str, user_id: Uuid, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            iss: Some(issuer.to_string()),
            sub: Some(user_id.to_string()),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is expired from the `exp` second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Parse the subject claim as a user identifier.
    pub fn subject(&self) -> Option<Uuid> {
        self.sub.as_deref().and_then(|s| Uuid::parse_str(s).ok())
    }
}
