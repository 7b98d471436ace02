//! `Authorization: Bearer` header parsing

use http::HeaderMap;
use http::header::AUTHORIZATION;
use thiserror::Error;

/// Why a bearer token could not be read from a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("authorization header is missing")]
    Missing,

    #[error("authorization header is malformed")]
    Malformed,
}

/// Extract the token from `Authorization: Bearer <token>`
///
/// The scheme is matched case-sensitively and the header must consist of
/// exactly two space-separated parts.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    if value.is_empty() {
        return Err(BearerError::Missing);
    }

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(BearerError::Malformed),
    }
}
