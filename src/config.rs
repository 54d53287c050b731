/*
 * Responsibility
 * - Load runtime settings from the environment (PORT, APP_ENV, AUTH_*)
 * - Validate settings at startup (missing or unusable values fail fast)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
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

/// Symmetric key material for session token signing.
///
/// Decoded once at startup from standard base64. HS256 wants at least
/// 256 bits of key, so anything shorter is rejected outright.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub const MIN_BYTES: usize = 32;

    pub fn from_base64(raw: &str) -> Result<Self, ConfigError> {
        let bytes = STANDARD
            .decode(raw.trim())
            .map_err(|_| ConfigError::Invalid("AUTH_TOKEN_SECRET"))?;

        if bytes.len() < Self::MIN_BYTES {
            return Err(ConfigError::Invalid("AUTH_TOKEN_SECRET"));
        }

        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// Do not print key material.
impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecret").finish_non_exhaustive()
    }
}

/// Where the session token travels on the wire.
///
/// Exactly one carrier is active per deployment: the session filter reads
/// only the configured one, and login sets a cookie only in cookie mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenCarrier {
    Bearer,
    Cookie { name: String },
}

impl TokenCarrier {
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("AUTH_TOKEN_CARRIER")
            .unwrap_or_else(|_| "bearer".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "bearer" => Ok(Self::Bearer),
            "cookie" => {
                let name = std::env::var("AUTH_TOKEN_COOKIE_NAME")
                    .unwrap_or_else(|_| "session_token".to_string());
                if !is_valid_cookie_name(&name) {
                    return Err(ConfigError::Invalid("AUTH_TOKEN_COOKIE_NAME"));
                }
                Ok(Self::Cookie { name })
            }
            _ => Err(ConfigError::Invalid("AUTH_TOKEN_CARRIER")),
        }
    }
}

fn is_valid_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub token_secret: SigningSecret,
    pub token_ttl_seconds: i64,
    pub carrier: TokenCarrier,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let token_secret = std::env::var("AUTH_TOKEN_SECRET")
            .map_err(|_| ConfigError::Missing("AUTH_TOKEN_SECRET"))
            .and_then(|raw| SigningSecret::from_base64(&raw))?;

        // A TTL that is present but unparseable is a startup failure, not a
        // silent default. Out-of-range values are rejected where the token
        // provider is built.
        let token_ttl_seconds = match std::env::var("AUTH_TOKEN_TTL_SECONDS") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::Invalid("AUTH_TOKEN_TTL_SECONDS"))?,
            Err(_) => 3600, // 1 hour
        };

        let carrier = TokenCarrier::from_env()?;

        Ok(Self {
            addr,
            app_env,
            token_secret,
            token_ttl_seconds,
            carrier,
        })
    }
}
