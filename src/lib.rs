//! Minimal CRUD helper for `MySQL` (and `SQLite`).
//!
//! A [`CrudConnection`] wraps one live session. On top of it sit table-level
//! helpers (`search`, `count`, `find`, `create`, `update`, `delete`) built from
//! pure, connection-free statement builders in [`sql`]. Every value reaches the
//! engine as a bound `?` parameter; identifiers are backtick-quoted.
//!
//! ```rust,no_run
//! use sql_crud::prelude::*;
//!
//! # async fn demo() -> Result<(), SqlCrudError> {
//! let mut conn = CrudConnection::mysql_builder("127.0.0.1", "app", "secret", "shop")
//!     .connect()
//!     .await?;
//!
//! let id = conn
//!     .create("users", &RowData::new().set("name", "ann").set("age", 30))
//!     .await?;
//! let adults = conn
//!     .search(
//!         "users",
//!         &Filter::new().gte("age", 18),
//!         1,
//!         20,
//!         &Columns::All,
//!         &OrderBy::new().desc("id"),
//!     )
//!     .await?;
//! assert!(id > 0 && !adults.is_empty());
//! conn.close().await?;
//! # Ok(()) }
//! ```

#[cfg(not(any(feature = "mysql", feature = "sqlite")))]
compile_error!("enable at least one backend feature: `mysql` or `sqlite`");

pub mod prelude;

pub mod connection;
pub mod crud;
pub mod error;
pub mod query_builder;
pub mod results;
pub mod sql;
pub mod types;

#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use connection::CrudConnection;
pub use error::{ErrorKind, SqlCrudError};
pub use query_builder::QueryBuilder;
pub use results::{DmlOutcome, Record, ResultSet};
pub use types::{DatabaseType, ParamConverter, RowValues};
