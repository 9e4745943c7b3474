//! Bearer header → verified claims → permission check.
//!
//! Each step short-circuits; there is no partial success and nothing is retried.
use axum::http::HeaderMap;

use crate::services::auth::bearer;
use crate::services::auth::claims::Claims;
use crate::services::auth::error::AuthError;
use crate::services::auth::permissions;
use crate::services::auth::verifier::TokenVerifier;

#[derive(Clone, Debug)]
pub struct Authorizer {
    verifier: TokenVerifier,
}

impl Authorizer {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self { verifier }
    }

    pub async fn authorize(
        &self,
        permission: &str,
        headers: &HeaderMap,
    ) -> Result<Claims, AuthError> {
        let token = bearer::token_from_headers(headers)?;
        let claims = self.verifier.verify_decode(token).await?;
        permissions::check_permission(permission, &claims)?;

        Ok(claims)
    }
}
