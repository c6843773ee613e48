use std::sync::Arc;

use crate::error::KnexError;

use super::connection::SqliteConnection;

/// Open a `SQLite` database and check it answers a trivial query.
///
/// `":memory:"` opens a private in-memory database that lives as long as the handle.
///
/// # Errors
/// Returns `KnexError::ConnectionError` if the file cannot be opened or the check fails.
pub async fn connect(path: &str) -> Result<SqliteConnection, KnexError> {
    let owned = path.to_string();
    let conn = tokio::task::spawn_blocking(move || rusqlite::Connection::open(owned))
        .await
        .map_err(|e| KnexError::ConnectionError(format!("sqlite open task failed: {e}")))?
        .map_err(|e| {
            KnexError::ConnectionError(format!("Failed to open SQLite database {path}: {e}"))
        })?;

    let handle = SqliteConnection::new(conn, path);
    handle
        .with_connection(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .map_err(|e| KnexError::ConnectionError(format!("SQLite ping failed: {e}")))
        })
        .await?;

    Ok(handle)
}

/// Close the database for every holder of the handle.
///
/// The connection is only released once this is the last clone; `SQLite` then flushes and
/// closes the file.
///
/// # Errors
/// Returns `KnexError::ConnectionError` if other clones are still alive (they stay usable) or
/// if `SQLite` refuses to close the connection.
pub async fn close(handle: SqliteConnection) -> Result<(), KnexError> {
    let SqliteConnection { conn, path } = handle;
    let conn = Arc::try_unwrap(conn)
        .map_err(|shared| {
            KnexError::ConnectionError(format!(
                "cannot close SQLite database {path}: {} other handle(s) still open",
                Arc::strong_count(&shared) - 1
            ))
        })?
        .into_inner();

    tokio::task::spawn_blocking(move || conn.close())
        .await
        .map_err(|e| KnexError::ExecutionError(format!("sqlite close task failed: {e}")))?
        .map_err(|(_, e)| {
            KnexError::ConnectionError(format!("Failed to close SQLite database {path}: {e}"))
        })
}
