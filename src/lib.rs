//! # knex-sql
//!
//! A Knex-style fluent query builder over one shared database handle.
//!
//! Open a [`Database`] once, then build statements against it table by table:
//!
//! ```rust,no_run
//! use knex_sql::prelude::*;
//!
//! # async fn demo() -> Result<(), KnexError> {
//! let db = Database::connect(&DbConfig::from_json_file("db.json")?).await?;
//!
//! db.table("users")
//!     .insert([("name", Value::from("alice")), ("age", Value::from(30))])
//!     .await?;
//!
//! let alice = db.table("users").where_equal([("name", "alice")]).first().await?;
//! assert_eq!(alice.get("age"), Some(&Value::Int(30)));
//!
//! db.table("users")
//!     .where_condition("age", "<", 18)
//!     .update([("minor", true)])
//!     .await?;
//!
//! db.close().await?;
//! # Ok(()) }
//! ```
//!
//! Statements use `?` placeholders, which both backends (`MySQL` and `SQLite`) accept.
//! Byte-string columns are handed back as text when they hold UTF-8.

#[cfg(not(any(feature = "mysql", feature = "sqlite")))]
compile_error!("enable at least one backend feature: `mysql` or `sqlite`");

pub mod config;
pub mod error;
pub mod executor;
pub mod pool;
pub mod prelude;
pub mod query;
pub mod query_builder;
pub mod results;
pub mod types;

#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::DbConfig;
pub use error::KnexError;
pub use executor::Executor;
pub use pool::Database;
pub use query::QueryAndParams;
pub use query_builder::QueryBuilder;
pub use results::{ExecResult, Record, ResultSet};
pub use types::{DatabaseType, Value};
