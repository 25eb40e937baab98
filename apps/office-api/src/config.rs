use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    CORS_ALLOWED_ORIGINS, DATABASE_URL, DB_CONNECT_RETRIES, DEFAULT_DB_CONNECT_RETRIES,
    DEFAULT_OFFICE_API_PORT, ENV, MAX_BODY_SIZE_BYTES, OFFICE_API_PORT, RATE_LIMIT_BURST,
    RATE_LIMIT_PER_MINUTE, REQUEST_TIMEOUT_SECS, SHUTDOWN_TIMEOUT_SECS,
};

/// Reads `key` and parses it, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(env_var = key, value = %raw, "ignoring unparsable configuration value");
            default
        }),
        Err(_) => default,
    }
}

fn required(key: &str) -> Result<String, String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{} environment variable must be set", key)),
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub env: String,
    pub database_url: String,
    pub db_connect_retries: u32,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            env: required(ENV)?,
            database_url: required(DATABASE_URL)?,
            db_connect_retries: env_or(DB_CONNECT_RETRIES, DEFAULT_DB_CONNECT_RETRIES),
            port: env_or(OFFICE_API_PORT, DEFAULT_OFFICE_API_PORT),
        })
    }
}

#[derive(Debug, Clone)]
pub struct MiddlewareConfig {
    pub rate_limit_per_minute: u32,
    pub rate_limit_burst: u32,
    pub request_timeout: Duration,
    pub max_body_size: usize,
    pub shutdown_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            rate_limit_per_minute: 100,
            rate_limit_burst: 150,
            request_timeout: Duration::from_secs(30),
            max_body_size: 1_048_576, // 1MB
            shutdown_timeout: Duration::from_secs(30),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl MiddlewareConfig {
    pub fn from_env() -> Self {
        let default = Self::default();

        let cors_allowed_origins = std::env::var(CORS_ALLOWED_ORIGINS)
            .ok()
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or(default.cors_allowed_origins);

        Self {
            // governor needs a non-zero replenish rate
            rate_limit_per_minute: env_or(RATE_LIMIT_PER_MINUTE, default.rate_limit_per_minute).max(1),
            rate_limit_burst: env_or(RATE_LIMIT_BURST, default.rate_limit_burst).max(1),
            request_timeout: Duration::from_secs(env_or(
                REQUEST_TIMEOUT_SECS,
                default.request_timeout.as_secs(),
            )),
            max_body_size: env_or(MAX_BODY_SIZE_BYTES, default.max_body_size),
            shutdown_timeout: Duration::from_secs(env_or(
                SHUTDOWN_TIMEOUT_SECS,
                default.shutdown_timeout.as_secs(),
            )),
            cors_allowed_origins,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == "*")
    }

    /// Milliseconds between two replenished rate limit tokens.
    pub fn replenish_interval_ms(&self) -> u64 {
        (60_000 / u64::from(self.rate_limit_per_minute.max(1))).max(1)
    }
}
