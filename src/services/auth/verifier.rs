use std::str::FromStr;
use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::{AlgorithmParameters, Jwk};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};

use crate::services::auth::claims::Claims;
use crate::services::auth::error::AuthError;
use crate::services::auth::jwks::JwksSource;

/// What a token has to match. Fixed at start-up.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub issuer: String,
    pub audience: String,
    pub algorithms: Vec<Algorithm>,
    pub leeway_seconds: u64,
}

/// Verifies RS-signed access tokens against the identity provider's key set.
#[derive(Clone)]
pub struct TokenVerifier {
    settings: AuthSettings,
    keys: Arc<dyn JwksSource>,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("settings", &self.settings)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(settings: AuthSettings, keys: Arc<dyn JwksSource>) -> Self {
        Self { settings, keys }
    }

    /// Verify signature, `exp`, `iss` and `aud`, then hand back the full payload.
    ///
    /// The key set is fetched before the token is even looked at, so an unreachable
    /// provider fails every request the same way.
    pub async fn verify_decode(&self, token: &str) -> Result<Claims, AuthError> {
        let jwks = self.keys.key_set().await?;

        let header = jsonwebtoken::decode_header(token)
            .map_err(|e| AuthError::parse_error(format!("unreadable header: {e}")))?;
        let kid = header.kid.ok_or(AuthError::InvalidHeader)?;

        let jwk = match jwks.find(&kid) {
            Some(jwk) => jwk.clone(),
            None => self
                .keys
                .refreshed_key_set()
                .await?
                .and_then(|fresh| fresh.find(&kid).cloned())
                .ok_or(AuthError::KeyNotFound { kid })?,
        };

        if !self.settings.algorithms.contains(&header.alg) {
            return Err(AuthError::parse_error(format!(
                "algorithm {:?} is not allowed",
                header.alg
            )));
        }

        let decoding_key = decoding_key_for(&jwk, header.alg)?;
        let validation = self.validation_for(header.alg);

        let data = jsonwebtoken::decode::<Map<String, Value>>(token, &decoding_key, &validation)
            .map_err(classify)?;

        Ok(Claims::new(data.claims))
    }

    // Pinned to the header's algorithm: the key family has to match every entry.
    fn validation_for(&self, alg: Algorithm) -> Validation {
        let mut validation = Validation::new(alg);
        validation.set_issuer(&[&self.settings.issuer]);
        validation.set_audience(&[&self.settings.audience]);
        validation.leeway = self.settings.leeway_seconds;
        validation.validate_nbf = true;
        validation
    }
}

fn decoding_key_for(jwk: &Jwk, alg: Algorithm) -> Result<DecodingKey, AuthError> {
    if !matches!(jwk.algorithm, AlgorithmParameters::RSA(_)) {
        return Err(AuthError::parse_error("signing key is not an RSA key"));
    }

    // KeyAlgorithm and Algorithm share variant names for the RS/PS family.
    if let Some(key_alg) = jwk.common.key_algorithm.as_ref()
        && Algorithm::from_str(&format!("{key_alg:?}")).ok() != Some(alg)
    {
        return Err(AuthError::parse_error(format!(
            "key is published for {key_alg:?}, token uses {alg:?}"
        )));
    }

    DecodingKey::from_jwk(jwk)
        .map_err(|e| AuthError::parse_error(format!("unusable signing key: {e}")))
}

fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidAudience
        | ErrorKind::InvalidIssuer
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::invalid_claims(err.to_string()),
        _ => AuthError::parse_error(err.to_string()),
    }
}
