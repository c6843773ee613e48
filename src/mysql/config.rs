use mysql_async::prelude::Queryable;
use mysql_async::{Opts, OptsBuilder, Pool};

use crate::config::DbConfig;
use crate::error::KnexError;

pub(crate) fn build_opts(cfg: &DbConfig) -> Opts {
    OptsBuilder::default()
        .ip_or_hostname(cfg.host.clone())
        .tcp_port(cfg.port)
        .user(Some(cfg.user.clone()))
        .pass(Some(cfg.password.clone()))
        .db_name(Some(cfg.database.clone()))
        .into()
}

/// Open a `MySQL` pool and ping the server once before handing it out.
///
/// # Errors
/// Returns `KnexError::ConnectionError` if no connection can be checked out or the ping fails.
pub async fn connect(cfg: &DbConfig) -> Result<Pool, KnexError> {
    let pool = Pool::new(build_opts(cfg));

    {
        let mut conn = pool.get_conn().await.map_err(|e| {
            KnexError::ConnectionError(format!(
                "Failed to open MySQL connection to {}:{}/{}: {e}",
                cfg.host, cfg.port, cfg.database
            ))
        })?;
        conn.ping().await.map_err(|e| {
            KnexError::ConnectionError(format!("MySQL ping failed: {e}"))
        })?;
    }

    Ok(pool)
}

/// Disconnect every pooled connection.
///
/// # Errors
/// Returns `KnexError::ConnectionError` if the pool fails to shut down cleanly.
pub async fn close(pool: Pool) -> Result<(), KnexError> {
    pool.disconnect()
        .await
        .map_err(|e| KnexError::ConnectionError(format!("Failed to close MySQL pool: {e}")))
}
