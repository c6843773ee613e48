use std::sync::Arc;

use rusqlite::types::Value as SqliteValue;
use rusqlite::Statement;

use crate::error::KnexError;
use crate::results::ResultSet;
use crate::types::Value;

/// Extract a `Value` from a `SQLite` row.
///
/// # Errors
///
/// Returns `KnexError::SqliteError` if the column cannot be read.
pub fn sqlite_extract_value_sync(row: &rusqlite::Row, idx: usize) -> Result<Value, KnexError> {
    let value: SqliteValue = row.get(idx)?;
    Ok(match value {
        SqliteValue::Null => Value::Null,
        SqliteValue::Integer(i) => Value::Int(i),
        SqliteValue::Real(f) => Value::Float(f),
        SqliteValue::Text(s) => Value::Text(s),
        SqliteValue::Blob(b) => Value::Blob(b),
    })
}

/// Run a prepared statement and collect every row.
///
/// # Errors
/// Returns `KnexError::SqliteError` if execution or row extraction fails.
pub fn build_result_set(
    stmt: &mut Statement,
    params: &[&dyn rusqlite::ToSql],
) -> Result<ResultSet, KnexError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(Arc::new(column_names));

    let mut rows_iter = stmt.query(params)?;
    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(sqlite_extract_value_sync(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}
