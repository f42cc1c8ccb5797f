use std::path::PathBuf;
use std::str::FromStr;

use crate::session::JwtConfig;

/// Configuration loading failure. Raised instead of panicking so `main` can
/// report it and exit cleanly.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local use.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Hosted store connection string. When absent an in-memory store is used.
    pub database_url: Option<String>,
    /// Verification settings for the auth provider's access tokens.
    pub jwt: JwtConfig,
    /// Directory holding uploaded objects (default: `./storage`).
    pub storage_root: PathBuf,
    /// Base URL objects are served from.
    pub storage_public_url: String,
    /// Directory backing on-device key/value state (default: `./.local-state`).
    pub local_state_dir: PathBuf,
}

fn var_or(var: &'static str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(var: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = var_or(var, default);
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `127.0.0.1`                      |
    /// | `PORT`                 | `3000`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `DATABASE_URL`         | unset (in-memory store)          |
    /// | `JWT_SECRET`           | **required**                     |
    /// | `JWT_AUDIENCE`         | `authenticated`                  |
    /// | `STORAGE_ROOT`         | `./storage`                      |
    /// | `STORAGE_PUBLIC_URL`   | `http://localhost:3000/storage`  |
    /// | `LOCAL_STATE_DIR`      | `./.local-state`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = var_or("HOST", "127.0.0.1");
        let port: u16 = parse_var("PORT", "3000")?;

        let cors_origins: Vec<String> = var_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_var("REQUEST_TIMEOUT_SECS", "30")?;

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let jwt = JwtConfig {
            secret,
            audience: var_or("JWT_AUDIENCE", "authenticated"),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            jwt,
            storage_root: var_or("STORAGE_ROOT", "./storage").into(),
            storage_public_url: var_or("STORAGE_PUBLIC_URL", "http://localhost:3000/storage"),
            local_state_dir: var_or("LOCAL_STATE_DIR", "./.local-state").into(),
        })
    }
}
