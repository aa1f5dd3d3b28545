//! Server configuration, sourced from the environment.
//!
//! Recognized variables:
//!
//! - `API_HOST`: bind address (default "0.0.0.0")
//! - `API_PORT`: listen port (default 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: trace/debug/info/warn/error (default "info")
//! - `API_CORS_ORIGINS`: comma-separated allowed origins; CORS is off when
//!   unset
//! - `API_REQUEST_TIMEOUT_SECONDS`: per-request timeout (default 30)

use std::env;

use eyre::{Result, WrapErr};
use tracing::Level;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub log_level: Level,
    /// Allowed CORS origins; `None` disables the CORS layer entirely.
    pub cors_origins: Option<Vec<String>>,
    /// Per-request timeout in seconds.
    pub request_timeout: u64,
}

impl ApiConfig {
    /// Reads the configuration from the environment.
    ///
    /// Fails when `DATABASE_URL` is missing or `API_PORT` is not a valid
    /// port number; everything else falls back to a default.
    pub fn from_env() -> Result<Self> {
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        let log_level = env::var("LOG_LEVEL")
            .ok()
            .and_then(|level| level.parse().ok())
            .unwrap_or(Level::INFO);

        let cors_origins = env::var("API_CORS_ORIGINS")
            .ok()
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|timeout| timeout.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
