#[cfg(feature = "mysql")]
use mysql_async::Pool as MySqlPool;

#[cfg(feature = "sqlite")]
use crate::sqlite::SqliteConnection;

use crate::config::DbConfig;
use crate::error::KnexError;
use crate::query_builder::QueryBuilder;
use crate::types::DatabaseType;

#[cfg(feature = "mysql")]
use crate::mysql;
#[cfg(feature = "sqlite")]
use crate::sqlite;

/// The single shared database handle.
///
/// Open it once at startup, clone it freely (clones share the same pool or connection), and
/// close it once at shutdown. Query builders borrow it:
/// ```rust,no_run
/// use knex_sql::prelude::*;
///
/// # async fn demo() -> Result<(), KnexError> {
/// let cfg = DbConfig::from_json_file("db.json")?;
/// let db = Database::connect(&cfg).await?;
/// let adults = db
///     .table("users")
///     .where_condition("age", ">", 18)
///     .order_by("age", "ASC")
///     .fetch_all()
///     .await?;
/// # let _ = adults;
/// db.close().await?;
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub enum Database {
    /// `MySQL` connection pool
    #[cfg(feature = "mysql")]
    MySql(MySqlPool),
    /// Shared `SQLite` connection
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteConnection),
}

impl Database {
    /// Open a `MySQL` pool from `cfg` and ping the server.
    ///
    /// # Errors
    /// Returns `KnexError::ConnectionError` if the server cannot be reached or rejects the login.
    #[allow(unused_variables)]
    pub async fn connect(cfg: &DbConfig) -> Result<Self, KnexError> {
        #[cfg(feature = "mysql")]
        {
            let pool = mysql::connect(cfg).await?;
            tracing::info!(
                host = %cfg.host,
                port = cfg.port,
                database = %cfg.database,
                "connected to MySQL"
            );
            Ok(Database::MySql(pool))
        }
        #[cfg(not(feature = "mysql"))]
        {
            Err(KnexError::Unimplemented(
                "MySQL support is not enabled in the current build".to_string(),
            ))
        }
    }

    /// Open a `SQLite` database (`":memory:"` for a private in-memory one).
    ///
    /// # Errors
    /// Returns `KnexError::ConnectionError` if the file cannot be opened.
    #[cfg(feature = "sqlite")]
    pub async fn connect_sqlite(path: &str) -> Result<Self, KnexError> {
        let conn = sqlite::connect(path).await?;
        tracing::info!(path, "connected to SQLite");
        Ok(Database::Sqlite(conn))
    }

    /// Startup entry point: connect or stop the process.
    ///
    /// On failure the error is logged with `tracing::error!` and the process exits with status 1.
    /// The library installs no subscriber; without one the exit is silent. Use
    /// [`Database::connect`] to handle the error yourself.
    pub async fn init(cfg: &DbConfig) -> Self {
        match Self::connect(cfg).await {
            Ok(db) => db,
            Err(err) => {
                tracing::error!(error = %err, "cannot open database connection");
                std::process::exit(1);
            }
        }
    }

    /// Release the handle for every clone.
    ///
    /// `MySQL` disconnects the pool. `SQLite` closes the connection, which requires this to be
    /// the last clone of the handle.
    ///
    /// # Errors
    /// Returns `KnexError::ConnectionError` if the backend fails to shut down cleanly, or on
    /// `SQLite` if other clones are still alive.
    pub async fn close(self) -> Result<(), KnexError> {
        match self {
            #[cfg(feature = "mysql")]
            Database::MySql(pool) => mysql::close(pool).await?,
            #[cfg(feature = "sqlite")]
            Database::Sqlite(conn) => sqlite::close(conn).await?,
        }
        tracing::info!("database connection closed");
        Ok(())
    }

    /// Shutdown counterpart of [`Database::init`]: close or stop the process.
    ///
    /// Like `init`, the failure reason only reaches the output through a `tracing` subscriber.
    pub async fn shutdown(self) {
        if let Err(err) = self.close().await {
            tracing::error!(error = %err, "error closing database connection");
            std::process::exit(1);
        }
    }

    /// Which backend this handle talks to.
    #[must_use]
    pub fn db_type(&self) -> DatabaseType {
        match self {
            #[cfg(feature = "mysql")]
            Database::MySql(_) => DatabaseType::MySql,
            #[cfg(feature = "sqlite")]
            Database::Sqlite(_) => DatabaseType::Sqlite,
        }
    }

    /// Start a query builder for `table` bound to this handle.
    #[must_use]
    pub fn table<'db>(&'db self, table: &str) -> QueryBuilder<'db> {
        QueryBuilder::new(self, table)
    }
}
