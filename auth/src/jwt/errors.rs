use thiserror::Error;

/// Error type for access token operations.
///
/// Every variant maps to the same "unauthorized" answer at the HTTP edge;
/// the subtype exists for server-side logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token issuer does not match")]
    IssuerMismatch,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token subject is missing or invalid")]
    MalformedSubject,
}
