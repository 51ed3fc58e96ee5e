//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::connection::CrudConnection;
pub use crate::error::{ErrorKind, SqlCrudError};
pub use crate::query_builder::QueryBuilder;
pub use crate::results::{DmlOutcome, Record, ResultSet};
pub use crate::sql::{
    Columns, Condition, Dialect, Direction, Filter, Fragment, Limit, OrderBy, RowData, Statement,
    build_columns, build_count, build_delete, build_insert, build_order_by, build_select,
    build_update, build_where, quote_ident,
};
pub use crate::types::{DatabaseType, RowValues};

#[cfg(feature = "mysql")]
pub use crate::mysql::{MysqlOptions, MysqlOptionsBuilder};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteOptions, SqliteOptionsBuilder};
