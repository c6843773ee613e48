//! Convenient imports for common functionality.

pub use crate::config::DbConfig;
pub use crate::error::KnexError;
pub use crate::executor::Executor;
pub use crate::pool::Database;
pub use crate::query::QueryAndParams;
pub use crate::query_builder::QueryBuilder;
pub use crate::results::{ExecResult, Record, ResultSet};
pub use crate::types::{DatabaseType, Value};
