use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::KnexError;

pub(crate) type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;

/// One `SQLite` connection shared by every clone of the handle.
///
/// Calls are serialized on the inner mutex and run on tokio's blocking pool.
#[derive(Clone)]
pub struct SqliteConnection {
    pub(crate) conn: SharedSqliteConnection,
    pub(crate) path: Arc<str>,
}

impl SqliteConnection {
    pub(crate) fn new(conn: rusqlite::Connection, path: &str) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Arc::from(path),
        }
    }

    /// Run `func` against the raw `rusqlite` connection on a blocking thread.
    ///
    /// # Errors
    /// Returns whatever `func` returns, or `KnexError::ExecutionError` if the task panics.
    pub async fn with_connection<F, R>(&self, func: F) -> Result<R, KnexError>
    where
        F: FnOnce(&mut rusqlite::Connection) -> Result<R, KnexError> + Send + 'static,
        R: Send + 'static,
    {
        run_blocking(Arc::clone(&self.conn), func).await
    }

    /// Path this connection was opened with.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

pub(crate) async fn run_blocking<F, R>(
    conn: SharedSqliteConnection,
    func: F,
) -> Result<R, KnexError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, KnexError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = conn.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(|e| KnexError::ExecutionError(format!("sqlite spawn_blocking join error: {e}")))?
}
