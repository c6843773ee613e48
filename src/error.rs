use thiserror::Error;

#[cfg(feature = "mysql")]
use mysql_async;
#[cfg(feature = "sqlite")]
use rusqlite;

#[derive(Debug, Error)]
pub enum KnexError {
    #[cfg(feature = "mysql")]
    #[error(transparent)]
    MySqlError(#[from] mysql_async::Error),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("No rows found: {0}")]
    NotFound(String),

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    #[error("Refusing whole-table write: {0}")]
    UnguardedWrite(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Unimplemented feature: {0}")]
    Unimplemented(String),
}

impl KnexError {
    /// True when a single-row fetch matched nothing, as opposed to the query failing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Errors from opening, pinging or closing the shared handle.
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}
