//! Application configuration loaded from environment variables.

use std::env;

use crate::cache::DEFAULT_TOKEN_TTL_SECS;
use crate::error::AppError;
use crate::state::security_config::DEFAULT_AUTH_SCHEME;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Security
    pub jwt_secret: String,
    pub auth_scheme: String,

    // Storage
    pub database_url: String,
    /// When unset, tokens are cached in-process.
    pub redis_url: Option<String>,
    pub token_cache_ttl_secs: u64,
}

impl Config {
    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("CONDUIT_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("CONDUIT_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!(
                    "CONDUIT_PORT must be a valid port number, got '{raw}'"
                ))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let jwt_secret = required("CONDUIT_JWT_SECRET")?;

        let auth_scheme = env::var("CONDUIT_AUTH_SCHEME")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTH_SCHEME.to_string());
        if auth_scheme.contains(' ') {
            return Err(AppError::config(
                "CONDUIT_AUTH_SCHEME must be a single word",
            ));
        }

        let database_url = required("DATABASE_URL")?;

        let redis_url = env::var("REDIS_URL").ok().filter(|s| !s.trim().is_empty());

        let token_cache_ttl_secs = match env::var("CONDUIT_TOKEN_CACHE_TTL_SECS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(AppError::config(format!(
                        "CONDUIT_TOKEN_CACHE_TTL_SECS must be a positive integer, got '{raw}'"
                    )))
                }
            },
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        Ok(Config {
            host,
            port,
            jwt_secret,
            auth_scheme,
            database_url,
            redis_url,
            token_cache_ttl_secs,
        })
    }
}

fn required(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(AppError::config(format!("{name} must not be empty"))),
        Err(_) => Err(AppError::config(format!("{name} must be set"))),
    }
}
