// MySQL module - the primary backend, built on `mysql_async`
//
// - config: pool setup and liveness check from a `DbConfig`
// - params: `Value` -> `mysql_async::Value` conversion
// - query: row extraction into `ResultSet`
// - executor: statement execution

pub mod config;
pub mod executor;
pub mod params;
pub mod query;

pub use config::{close, connect};
pub use executor::{execute_batch, execute_dml, execute_select};
pub use params::Params;
pub use query::build_result_set;
