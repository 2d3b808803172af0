//! Shared configuration logic
//!
//! Handles loading of common environment variables.

use crate::error::GameError;
use std::env;

/// Common configuration used across services
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// SQLite connection URL (e.g. "sqlite:data/trackquiz.sqlite3")
    pub database_url: String,

    /// Telegram bot token
    pub telegram_bot_token: String,

    /// Maximum database connections (default: 5)
    pub db_max_connections: u32,
}

impl CoreConfig {
    /// Load common configuration from environment variables
    ///
    /// This will also initialize dotenv if it hasn't been done yet.
    pub fn from_env() -> Result<Self, GameError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    /// [`from_env`](Self::from_env) passes the process environment; tests
    /// pass a plain map.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, GameError> {
        Ok(Self {
            database_url: get("DATABASE_URL").ok_or_else(|| {
                GameError::Validation("DATABASE_URL environment variable not set".to_string())
            })?,
            telegram_bot_token: get("TELEGRAM_BOT_TOKEN").ok_or_else(|| {
                GameError::Validation("TELEGRAM_BOT_TOKEN environment variable not set".to_string())
            })?,
            db_max_connections: get("DATABASE_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        })
    }

    /// Filesystem path of the database file, derived from the URL.
    ///
    /// Used by the admin backup/restore handlers, which operate on the
    /// whole file.
    #[must_use]
    pub fn database_path(&self) -> String {
        let trimmed = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))
            .unwrap_or(&self.database_url);
        trimmed.split('?').next().unwrap_or(trimmed).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<CoreConfig, GameError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CoreConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_core_config_with_defaults() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite:data/test.sqlite3"),
            ("TELEGRAM_BOT_TOKEN", "test_token"),
        ])
        .unwrap();

        assert_eq!(config.database_url, "sqlite:data/test.sqlite3");
        assert_eq!(config.telegram_bot_token, "test_token");
        assert_eq!(config.db_max_connections, 5);
    }

    #[test]
    fn test_core_config_reads_max_connections() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite:db.sqlite3"),
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();

        assert_eq!(config.db_max_connections, 12);
    }

    #[test]
    fn test_core_config_missing_database_url_fails() {
        let result = config_from(&[("TELEGRAM_BOT_TOKEN", "t")]);
        assert!(matches!(result, Err(GameError::Validation(_))));
    }

    #[test]
    fn test_database_path_strips_scheme_and_params() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite:data/db.sqlite3?mode=rwc"),
            ("TELEGRAM_BOT_TOKEN", "t"),
        ])
        .unwrap();

        assert_eq!(config.database_path(), "data/db.sqlite3");
    }

    #[test]
    fn test_database_path_strips_double_slash_scheme() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite://data/db.sqlite3"),
            ("TELEGRAM_BOT_TOKEN", "t"),
        ])
        .unwrap();

        assert_eq!(config.database_path(), "data/db.sqlite3");
    }
}
