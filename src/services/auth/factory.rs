//! Factory: build the `Authorizer` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::jwks::{CachedJwks, JwksError, JwksSource, RemoteJwks};
use crate::services::auth::verifier::{AuthSettings, TokenVerifier};
use crate::services::auth::Authorizer;

pub fn build_authorizer(config: &Config) -> Result<Arc<Authorizer>, JwksError> {
    let settings = AuthSettings {
        issuer: config.auth_issuer.clone(),
        audience: config.auth_audience.clone(),
        algorithms: config.auth_algorithms.clone(),
        leeway_seconds: config.access_token_leeway_seconds,
    };

    let remote = RemoteJwks::new(config.auth_jwks_url.clone(), config.jwks_fetch_timeout)?;

    tracing::info!(
        jwks_url = %remote.url(),
        issuer = %settings.issuer,
        audience = %settings.audience,
        cache_ttl_seconds = config.jwks_cache_ttl.as_secs(),
        "token authorizer configured"
    );

    let keys: Arc<dyn JwksSource> = if config.jwks_cache_ttl.is_zero() {
        Arc::new(remote)
    } else {
        Arc::new(CachedJwks::new(remote, config.jwks_cache_ttl))
    };

    Ok(Arc::new(Authorizer::new(TokenVerifier::new(settings, keys))))
}
