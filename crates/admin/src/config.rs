//! Admin panel configuration from environment variables

use anyhow::{Context, Result};
use std::env;

/// Admin panel configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Plain admin password checked at login
    pub admin_password: String,
    /// Secret used to sign session cookies
    pub session_secret: String,
    /// Session lifetime in seconds (default: 12 hours)
    pub session_ttl_secs: i64,
    /// Filesystem path of the SQLite database, for backup/restore
    pub database_path: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env(database_path: String) -> Result<Self> {
        Self::from_lookup(database_path, |key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    /// [`from_env`](Self::from_env) passes the process environment; tests
    /// pass a plain map.
    pub fn from_lookup(
        database_path: String,
        get: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            host: get("ADMIN_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: get("ADMIN_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("Failed to parse ADMIN_PORT as u16")?,
            admin_password: get("ADMIN_PASSWORD")
                .context("ADMIN_PASSWORD environment variable not set")?,
            session_secret: get("SESSION_SECRET")
                .context("SESSION_SECRET environment variable not set")?,
            session_ttl_secs: get("SESSION_TTL_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(12 * 60 * 60),
            database_path,
        })
    }
}
