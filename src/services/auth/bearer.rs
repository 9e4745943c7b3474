//! `Authorization: Bearer <token>` extraction.
use axum::http::{HeaderMap, header};

use crate::services::auth::error::AuthError;

/// Returns the token part of the `Authorization` header, verbatim.
///
/// The value must be exactly two whitespace-separated parts; the scheme is compared
/// case-insensitively.
pub fn token_from_headers(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let mut parts = value.split_whitespace();
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(AuthError::MalformedHeader);
    };

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedHeader);
    }

    Ok(token)
}
