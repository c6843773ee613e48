use mysql_async::prelude::Queryable;
use mysql_async::{Pool, Row};

use crate::error::KnexError;
use crate::results::{ExecResult, ResultSet};
use crate::types::{ParamConverter, Value};

use super::params::Params;
use super::query::build_result_set;

/// Execute parameterless SQL over the text protocol (DDL, fixtures, several statements at once).
///
/// # Errors
/// Returns `KnexError::MySqlError` if checkout or execution fails.
pub async fn execute_batch(pool: &Pool, query: &str) -> Result<(), KnexError> {
    let mut conn = pool.get_conn().await?;
    conn.query_drop(query).await?;
    Ok(())
}

/// Execute a SELECT as a prepared statement and collect every row.
///
/// # Errors
/// Returns `KnexError::ParameterError` if a parameter cannot be converted, or
/// `KnexError::MySqlError` if the server rejects the statement.
pub async fn execute_select(
    pool: &Pool,
    query: &str,
    params: &[Value],
) -> Result<ResultSet, KnexError> {
    let params = Params::convert_sql_params(params)?;
    let mut conn = pool.get_conn().await?;
    let rows: Vec<Row> = conn.exec(query, params.into_driver()).await?;
    Ok(build_result_set(rows))
}

/// Execute an INSERT, UPDATE or DELETE and report what the server says it changed.
///
/// # Errors
/// Returns `KnexError::ParameterError` if a parameter cannot be converted, or
/// `KnexError::MySqlError` if the server rejects the statement.
pub async fn execute_dml(
    pool: &Pool,
    query: &str,
    params: &[Value],
) -> Result<ExecResult, KnexError> {
    let params = Params::convert_sql_params(params)?;
    let mut conn = pool.get_conn().await?;
    conn.exec_drop(query, params.into_driver()).await?;
    Ok(ExecResult {
        rows_affected: conn.affected_rows(),
        last_insert_id: conn.last_insert_id(),
    })
}
