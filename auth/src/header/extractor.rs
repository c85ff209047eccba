use http::header::AUTHORIZATION;
use http::HeaderMap;

use super::errors::HeaderError;

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme word is consumed but not compared against `Bearer`; any
/// two-field header yields its second field.
///
/// # Errors
/// * `MissingHeader` - No `Authorization` header present
/// * `MalformedHeader` - Header is not exactly two whitespace-separated fields
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, HeaderError> {
    credential(headers)
}

/// Extract the key from an `Authorization: ApiKey <key>` header.
///
/// Same parsing rules as [`extract_bearer_token`].
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, HeaderError> {
    credential(headers)
}

fn credential(headers: &HeaderMap) -> Result<&str, HeaderError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(HeaderError::MissingHeader)?
        .to_str()
        .map_err(|_| HeaderError::MalformedHeader)?;

    let mut fields = value.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(_scheme), Some(token), None) => Ok(token),
        _ => Err(HeaderError::MalformedHeader),
    }
}
