use async_trait::async_trait;

use crate::error::KnexError;
use crate::pool::Database;
use crate::results::{ExecResult, Record, ResultSet};
use crate::types::Value;

#[cfg(feature = "mysql")]
use crate::mysql;
#[cfg(feature = "sqlite")]
use crate::sqlite;

/// What a query builder needs from a database handle.
///
/// [`Database`] implements this by dispatching to its backend; any other implementor (a test
/// double, an instrumented wrapper) can drive a builder just as well.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Executes a single INSERT, UPDATE or DELETE and reports affected rows / generated id.
    async fn execute(&self, query: &str, params: &[Value]) -> Result<ExecResult, KnexError>;

    /// Executes a single SELECT statement and returns the result set.
    async fn query_rows(&self, query: &str, params: &[Value]) -> Result<ResultSet, KnexError>;

    /// Executes a SELECT and returns its first row.
    ///
    /// # Errors
    /// Returns `KnexError::NotFound` when the query matches no rows.
    async fn query_row(&self, query: &str, params: &[Value]) -> Result<Record, KnexError> {
        self.query_rows(query, params)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| KnexError::NotFound(query.to_string()))
    }
}

#[async_trait]
impl Executor for Database {
    async fn execute(&self, query: &str, params: &[Value]) -> Result<ExecResult, KnexError> {
        match self {
            #[cfg(feature = "mysql")]
            Database::MySql(pool) => mysql::execute_dml(pool, query, params).await,
            #[cfg(feature = "sqlite")]
            Database::Sqlite(conn) => sqlite::execute_dml(conn, query, params).await,
        }
    }

    async fn query_rows(&self, query: &str, params: &[Value]) -> Result<ResultSet, KnexError> {
        match self {
            #[cfg(feature = "mysql")]
            Database::MySql(pool) => mysql::execute_select(pool, query, params).await,
            #[cfg(feature = "sqlite")]
            Database::Sqlite(conn) => sqlite::execute_select(conn, query, params).await,
        }
    }
}

impl Database {
    /// Executes parameterless SQL (DDL, fixtures) by delegating to the backend.
    ///
    /// # Errors
    /// Returns an error if the backend cannot execute the batch or the database responds with an error.
    pub async fn execute_batch(&self, query: &str) -> Result<(), KnexError> {
        match self {
            #[cfg(feature = "mysql")]
            Database::MySql(pool) => mysql::execute_batch(pool, query).await,
            #[cfg(feature = "sqlite")]
            Database::Sqlite(conn) => sqlite::execute_batch(conn, query).await,
        }
    }
}
