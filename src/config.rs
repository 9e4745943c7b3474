/*
 * Responsibility
 * - 環境変数の読み込み (DATABASE_URL, CORS 許可、Auth0 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,
    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,

    pub database_url: String,
    pub database_max_connections: u32,

    pub auth0_domain: String,
    pub auth_issuer: String,
    pub auth_audience: String,
    pub auth_algorithms: Vec<Algorithm>,
    pub auth_jwks_url: Url,
    pub access_token_leeway_seconds: u64,

    // 0 = fetch the key set on every verification
    pub jwks_cache_ttl: Duration,
    pub jwks_fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 5000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let request_timeout = Duration::from_secs(
            lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(30),
        );

        let request_body_limit_bytes = lookup("REQUEST_BODY_LIMIT_BYTES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(64 * 1024);

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(5);

        let auth0_domain = lookup("AUTH0_DOMAIN")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("AUTH0_DOMAIN"))?;

        // Auth0 issues tokens with `iss` = "https://<domain>/" (trailing slash included)
        let issuer_url = Url::parse(&format!("https://{}/", auth0_domain))
            .map_err(|_| ConfigError::Invalid("AUTH0_DOMAIN"))?;
        let auth_issuer = issuer_url.to_string();

        let auth_audience = lookup("AUTH_AUDIENCE")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("AUTH_AUDIENCE"))?;

        let auth_algorithms = parse_algorithms(lookup("AUTH_ALGORITHMS").as_deref())?;

        let auth_jwks_url = match lookup("AUTH_JWKS_URL") {
            Some(raw) => Url::parse(raw.trim()).map_err(|_| ConfigError::Invalid("AUTH_JWKS_URL"))?,
            None => issuer_url
                .join(".well-known/jwks.json")
                .map_err(|_| ConfigError::Invalid("AUTH0_DOMAIN"))?,
        };

        let access_token_leeway_seconds = lookup("ACCESS_TOKEN_LEEWAY_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let jwks_cache_ttl = Duration::from_secs(
            lookup("JWKS_CACHE_TTL_SECONDS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(0),
        );

        let jwks_fetch_timeout = Duration::from_secs(
            lookup("JWKS_FETCH_TIMEOUT_SECONDS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(10),
        );

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            request_timeout,
            request_body_limit_bytes,
            database_url,
            database_max_connections,
            auth0_domain,
            auth_issuer,
            auth_audience,
            auth_algorithms,
            auth_jwks_url,
            access_token_leeway_seconds,
            jwks_cache_ttl,
            jwks_fetch_timeout,
        })
    }
}

fn parse_algorithms(raw: Option<&str>) -> Result<Vec<Algorithm>, ConfigError> {
    let raw = raw.unwrap_or("RS256");

    let algorithms = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Algorithm::from_str(s).map_err(|_| ConfigError::Invalid("AUTH_ALGORITHMS")))
        .collect::<Result<Vec<_>, _>>()?;

    if algorithms.is_empty() {
        return Err(ConfigError::Invalid("AUTH_ALGORITHMS"));
    }

    Ok(algorithms)
}
