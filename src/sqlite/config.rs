use serde::Deserialize;

use crate::connection::CrudConnection;
use crate::error::SqlCrudError;

use super::connection::SqliteConnection;

/// Options for opening a `SQLite` database.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteOptions {
    /// File path, or `:memory:` for a private in-memory database.
    pub db_path: String,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self { db_path }
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Open the database and wrap it in a `CrudConnection`.
    ///
    /// # Errors
    ///
    /// Returns `SqlCrudError::ConnectionFail` if the database cannot be opened.
    pub async fn connect(self) -> Result<CrudConnection, SqlCrudError> {
        CrudConnection::new_sqlite(self.finish()).await
    }
}

impl CrudConnection {
    #[must_use]
    pub fn sqlite_builder(db_path: impl Into<String>) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path.into())
    }

    /// Open a `SQLite` database.
    ///
    /// # Errors
    /// Returns `SqlCrudError::ConnectionFail` if the file cannot be opened.
    pub async fn new_sqlite(opts: SqliteOptions) -> Result<Self, SqlCrudError> {
        let db_path = opts.db_path;
        tracing::debug!(backend = "sqlite", path = %db_path, "opening connection");
        let conn = SqliteConnection::open(db_path).await?;
        Ok(CrudConnection::Sqlite(conn))
    }
}
