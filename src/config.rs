use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::KnexError;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3306
}

/// Connection settings for the shared database handle.
///
/// Deserializes from the usual JSON shape:
/// ```rust
/// use knex_sql::DbConfig;
///
/// let cfg = DbConfig::from_json_str(
///     r#"{"host": "db.internal", "port": 3307, "user": "app", "password": "s3cret", "database": "shop"}"#,
/// ).unwrap();
/// assert_eq!(cfg.port, 3307);
/// ```
///
/// The schema name is read from `database`; older configs that spell it `name` are accepted
/// too. A config carrying both keys is rejected rather than guessing which one is meant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(alias = "name")]
    pub database: String,
}

impl DbConfig {
    #[must_use]
    pub fn new(host: String, user: String, password: String, database: String) -> Self {
        Self {
            host,
            port: default_port(),
            user,
            password,
            database,
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Parse a JSON config document.
    ///
    /// # Errors
    /// Returns `KnexError::ConfigError` if the JSON is malformed or a required field is missing.
    pub fn from_json_str(json: &str) -> Result<Self, KnexError> {
        serde_json::from_str(json)
            .map_err(|e| KnexError::ConfigError(format!("invalid database config: {e}")))
    }

    /// Read and parse a JSON config file.
    ///
    /// # Errors
    /// Returns `KnexError::ConfigError` if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, KnexError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            KnexError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }
}
