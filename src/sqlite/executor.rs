use crate::error::KnexError;
use crate::results::{ExecResult, ResultSet};
use crate::types::{ParamConverter, Value};

use super::connection::{SqliteConnection, run_blocking};
use super::params::Params;
use super::query::build_result_set;

/// Execute a batch of SQL statements for `SQLite` using auto-commit.
///
/// # Errors
///
/// Returns `KnexError::SqliteError` if execution fails.
pub async fn execute_batch(sqlite_client: &SqliteConnection, query: &str) -> Result<(), KnexError> {
    let query = query.to_string();
    run_blocking(sqlite_client.conn.clone(), move |conn| {
        conn.execute_batch(&query)?;
        Ok(())
    })
    .await
}

/// Execute a SELECT query in `SQLite`.
///
/// # Errors
///
/// Returns `KnexError::SqliteError` if preparation, execution or row extraction fails.
pub async fn execute_select(
    sqlite_client: &SqliteConnection,
    query: &str,
    params: &[Value],
) -> Result<ResultSet, KnexError> {
    let params = Params::convert_sql_params(params)?;
    let query = query.to_string();
    run_blocking(sqlite_client.conn.clone(), move |conn| {
        let mut stmt = conn.prepare(&query)?;
        build_result_set(&mut stmt, &params.as_refs())
    })
    .await
}

/// Execute a DML query (INSERT, UPDATE, DELETE) in `SQLite`.
///
/// `last_insert_id` is only reported for INSERTs that produced a new rowid.
///
/// # Errors
///
/// Returns `KnexError::SqliteError` if execution fails.
pub async fn execute_dml(
    sqlite_client: &SqliteConnection,
    query: &str,
    params: &[Value],
) -> Result<ExecResult, KnexError> {
    let params = Params::convert_sql_params(params)?;
    let query = query.to_string();
    run_blocking(sqlite_client.conn.clone(), move |conn| {
        let before = conn.last_insert_rowid();
        let rows = conn.execute(&query, &params.as_refs()[..])?;
        let after = conn.last_insert_rowid();
        let last_insert_id = if after != before || (rows > 0 && is_insert(&query)) {
            u64::try_from(after).ok()
        } else {
            None
        };
        Ok(ExecResult {
            rows_affected: rows as u64,
            last_insert_id,
        })
    })
    .await
}

fn is_insert(query: &str) -> bool {
    query
        .trim_start()
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("insert"))
}
