// SQLite module - embedded backend, also used for hermetic tests.
//
// - config: options, builder and connection setup
// - params: parameter conversion between crate and SQLite types
// - query: result extraction and building
// - executor: statement execution against a `SqliteConnection`
// - connection: the session handle and its blocking bridge

pub mod config;
pub mod connection;
pub mod executor;
pub mod params;
pub mod query;

pub use config::{SqliteOptions, SqliteOptionsBuilder};
pub use connection::SqliteConnection;
pub use executor::{execute_batch, execute_dml, execute_select, raw_query};
pub use params::Params;
pub use query::build_result_set;
