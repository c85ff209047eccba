use thiserror::Error;

/// Error type for password operations.
///
/// A malformed stored hash is reported as `CredentialMismatch` so callers
/// cannot tell a corrupt row apart from a wrong password.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password does not match")]
    CredentialMismatch,
}
