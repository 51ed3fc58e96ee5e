// MySQL module - primary backend, built on mysql_async.
//
// - config: options, builder and session setup
// - params: parameter conversion between crate and mysql_async types
// - query: result extraction with native int/float typing
// - executor: statement execution against a `MysqlConnection`
// - connection: the session handle and transaction passthrough

pub mod config;
pub mod connection;
pub mod executor;
pub mod params;
pub mod query;

pub use config::{MysqlOptions, MysqlOptionsBuilder};
pub use connection::MysqlConnection;
pub use executor::{execute_batch, execute_dml, execute_select, raw_query};
pub use params::Params;
pub use query::build_result_set;
