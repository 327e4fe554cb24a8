/*
 * Responsibility
 * - Load settings from environment variables (.env supported via dotenvy)
 * - Validate them (missing key material / missing DB in production => fail at startup)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::services::auth::{JwtSettings, Principal};

pub const DEFAULT_PUBLIC_PATHS: &str = "/api/v1/auth/**";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
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

/// Token verification key material.
#[derive(Clone)]
pub enum JwtKeyConfig {
    /// EdDSA, Ed25519 public key in PEM format.
    Ed25519PublicKeyPem(String),
    /// HS256, base64-encoded shared secret.
    HmacBase64Secret(String),
}

impl fmt::Debug for JwtKeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519PublicKeyPem(_) => f.write_str("Ed25519PublicKeyPem(..)"),
            Self::HmacBase64Secret(_) => f.write_str("HmacBase64Secret(<redacted>)"),
        }
    }
}

/// Where principals are looked up.
#[derive(Debug, Clone)]
pub enum PrincipalSource {
    Postgres {
        url: String,
        max_connections: u32,
        acquire_timeout: Duration,
    },
    Static(Vec<Principal>),
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            body_limit_bytes: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub principals: PrincipalSource,

    pub jwt_key: JwtKeyConfig,
    pub jwt: JwtSettings,

    pub public_paths: Vec<String>,

    pub http: HttpConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in `from_env`).
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str| get(key).and_then(|v| v.parse::<u64>().ok());

        let port: u16 = get("PORT").and_then(|s| s.parse().ok()).unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(get("APP_ENV").as_deref());

        let principals = match get("DATABASE_URL") {
            Some(url) => PrincipalSource::Postgres {
                url,
                max_connections: get("DATABASE_MAX_CONNECTIONS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5),
                acquire_timeout: Duration::from_secs(
                    parsed("DATABASE_ACQUIRE_TIMEOUT_SECONDS").unwrap_or(5),
                ),
            },
            // In-memory principals are a development convenience only.
            None if app_env.is_production() => return Err(ConfigError::Missing("DATABASE_URL")),
            None => PrincipalSource::Static(parse_static_principals(
                &get("AUTH_STATIC_PRINCIPALS").unwrap_or_default(),
            )?),
        };

        let jwt_key = match (get("ACCESS_JWT_PUBLIC_KEY_PEM"), get("ACCESS_JWT_SECRET")) {
            (Some(pem), _) => JwtKeyConfig::Ed25519PublicKeyPem(pem.replace("\\n", "\n")),
            (None, Some(secret)) => JwtKeyConfig::HmacBase64Secret(secret),
            (None, None) => {
                return Err(ConfigError::Missing(
                    "ACCESS_JWT_PUBLIC_KEY_PEM or ACCESS_JWT_SECRET",
                ));
            }
        };

        let jwt = JwtSettings {
            issuer: get("AUTH_ISSUER"),
            audience: get("AUTH_AUDIENCE"),
            leeway_seconds: parsed("ACCESS_TOKEN_LEEWAY_SECONDS").unwrap_or(60),
        };

        let public_paths =
            parse_list(&get("PUBLIC_PATHS").unwrap_or_else(|| DEFAULT_PUBLIC_PATHS.to_string()));

        let defaults = HttpConfig::default();
        let http = HttpConfig {
            request_timeout: parsed("REQUEST_TIMEOUT_SECONDS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            body_limit_bytes: get("REQUEST_BODY_LIMIT_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.body_limit_bytes),
        };

        Ok(Self {
            addr,
            app_env,
            principals,
            jwt_key,
            jwt,
            public_paths,
            http,
        })
    }
}

/// Comma-separated list, blanks dropped.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// `alice@example.com:USER,ADMIN;bob@example.com:USER`
///
/// An entry without `:` is a principal with no authorities.
pub fn parse_static_principals(raw: &str) -> Result<Vec<Principal>, ConfigError> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (identity, authorities) = entry.split_once(':').unwrap_or((entry, ""));
            let identity = identity.trim();
            if identity.is_empty() {
                return Err(ConfigError::Invalid("AUTH_STATIC_PRINCIPALS"));
            }
            Ok(Principal::new(identity, parse_list(authorities)))
        })
        .collect()
}
