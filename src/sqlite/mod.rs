// SQLite module - embedded backend on `rusqlite`
//
// - config: opening a database file (or `:memory:`), the liveness check, closing
// - connection: the shared connection handle and the blocking-task bridge
// - params: `Value` -> `rusqlite` value conversion
// - query: row extraction into `ResultSet`
// - executor: statement execution

pub mod config;
pub mod connection;
pub mod executor;
pub mod params;
pub mod query;

pub use config::{close, connect};
pub use connection::SqliteConnection;
pub use executor::{execute_batch, execute_dml, execute_select};
pub use params::Params;
pub use query::build_result_set;
