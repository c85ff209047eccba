use thiserror::Error;

/// Error type for `Authorization` header extraction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Malformed Authorization header")]
    MalformedHeader,
}
