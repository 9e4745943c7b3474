//! JSON Web Key Set retrieval.
//!
//! The identity provider publishes its RSA signing keys at
//! `https://<domain>/.well-known/jwks.json`. `RemoteJwks` fetches that document on every
//! call. `CachedJwks` wraps any source with a TTL and is only used when a TTL is configured.
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use thiserror::Error;
use tokio::sync::RwLock;
use url::Url;

#[derive(Debug, Error)]
pub enum JwksError {
    #[error("jwks request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("jwks endpoint answered with status {0}")]
    Status(u16),
    #[error("jwks document is invalid: {0}")]
    Document(String),
}

#[async_trait]
pub trait JwksSource: Send + Sync + 'static {
    /// Key set to verify the current token against.
    async fn key_set(&self) -> Result<Arc<JwkSet>, JwksError>;

    /// A fresher key set than the last `key_set()` answer, when the source keeps one around.
    ///
    /// Called after a `kid` miss. Sources that always fetch have nothing fresher to offer.
    async fn refreshed_key_set(&self) -> Result<Option<Arc<JwkSet>>, JwksError> {
        Ok(None)
    }
}

/// Fetches the key set over HTTP on every call.
#[derive(Debug, Clone)]
pub struct RemoteJwks {
    http: reqwest::Client,
    url: Url,
}

impl RemoteJwks {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, JwksError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn fetch(&self) -> Result<JwkSet, JwksError> {
        tracing::debug!(url = %self.url, "fetching jwks");

        let response = self
            .http
            .get(self.url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(JwksError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let jwks: JwkSet =
            serde_json::from_slice(&body).map_err(|e| JwksError::Document(e.to_string()))?;

        tracing::debug!(keys = jwks.keys.len(), "fetched jwks");
        Ok(jwks)
    }
}

#[async_trait]
impl JwksSource for RemoteJwks {
    async fn key_set(&self) -> Result<Arc<JwkSet>, JwksError> {
        self.fetch().await.map(Arc::new)
    }
}

/// TTL cache in front of another source.
///
/// A `kid` miss forces one refresh, so rotated keys are picked up before the TTL runs out.
pub struct CachedJwks<S> {
    inner: S,
    ttl: Duration,
    cached: RwLock<Option<(Instant, Arc<JwkSet>)>>,
}

impl<S: JwksSource> CachedJwks<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: RwLock::new(None),
        }
    }

    async fn reload(&self) -> Result<Arc<JwkSet>, JwksError> {
        let fresh = self.inner.key_set().await?;
        *self.cached.write().await = Some((Instant::now(), fresh.clone()));
        Ok(fresh)
    }
}

#[async_trait]
impl<S: JwksSource> JwksSource for CachedJwks<S> {
    async fn key_set(&self) -> Result<Arc<JwkSet>, JwksError> {
        {
            let cached = self.cached.read().await;
            if let Some((fetched_at, jwks)) = cached.as_ref()
                && fetched_at.elapsed() < self.ttl
            {
                return Ok(jwks.clone());
            }
        }

        self.reload().await
    }

    async fn refreshed_key_set(&self) -> Result<Option<Arc<JwkSet>>, JwksError> {
        self.reload().await.map(Some)
    }
}
