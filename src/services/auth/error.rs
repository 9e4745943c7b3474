//! Failure modes of the authorization pipeline.
//!
//! Every variant carries a machine-readable code, a human description and an HTTP status.
//! The HTTP layer turns them into responses (see `crate::error::AppError`).
use axum::http::StatusCode;
use thiserror::Error;

use crate::services::auth::jwks::JwksError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header is missing")]
    MissingHeader,
    #[error("authorization header must be of the form 'Bearer <token>'")]
    MalformedHeader,
    #[error("token header has no 'kid'")]
    InvalidHeader,
    #[error("no signing key matches kid '{kid}'")]
    KeyNotFound { kid: String },
    #[error("token expired")]
    TokenExpired,
    #[error("incorrect claims: {reason}")]
    InvalidClaims { reason: String },
    #[error("unable to parse authentication token: {reason}")]
    TokenParseError { reason: String },
    #[error("'permissions' claim is missing")]
    PermissionsClaimMissing,
    #[error("permission '{permission}' not granted")]
    PermissionDenied { permission: String },
    #[error("signing keys unavailable")]
    KeySetUnavailable(#[from] JwksError),
}

impl AuthError {
    pub fn invalid_claims(reason: impl Into<String>) -> Self {
        Self::InvalidClaims {
            reason: reason.into(),
        }
    }

    pub fn parse_error(reason: impl Into<String>) -> Self {
        Self::TokenParseError {
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingHeader
            | Self::MalformedHeader
            | Self::InvalidHeader
            | Self::TokenExpired
            | Self::InvalidClaims { .. }
            | Self::PermissionsClaimMissing => StatusCode::UNAUTHORIZED,
            Self::KeyNotFound { .. } | Self::TokenParseError { .. } => StatusCode::BAD_REQUEST,
            Self::PermissionDenied { .. } => StatusCode::FORBIDDEN,
            Self::KeySetUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingHeader => "authorization_header_missing",
            Self::MalformedHeader | Self::InvalidHeader | Self::KeyNotFound { .. } => {
                "invalid_header"
            }
            Self::TokenExpired => "token_expired",
            Self::InvalidClaims { .. } | Self::PermissionsClaimMissing => "invalid_claims",
            Self::TokenParseError { .. } => "invalid_token",
            Self::PermissionDenied { .. } => "forbidden",
            Self::KeySetUnavailable(_) => "jwks_unavailable",
        }
    }

    /// Client-facing text. Internal detail (key ids, decoder messages) stays in the logs.
    pub fn description(&self) -> &'static str {
        match self {
            Self::MissingHeader => "Authorization header is expected.",
            Self::MalformedHeader => "Authorization header must be a bearer token.",
            Self::InvalidHeader => "Authorization malformed.",
            Self::KeyNotFound { .. } => "Unable to find the appropriate key.",
            Self::TokenExpired => "Token expired.",
            Self::InvalidClaims { .. } => "Incorrect claims. Please check the audience and issuer.",
            Self::TokenParseError { .. } => "Unable to parse authentication token.",
            Self::PermissionsClaimMissing => "Permissions not included in token.",
            Self::PermissionDenied { .. } => "Permission not found.",
            Self::KeySetUnavailable(_) => "Unable to fetch signing keys.",
        }
    }
}
