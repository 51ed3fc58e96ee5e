use crate::error::SqlCrudError;
use crate::query_builder::QueryBuilder;
use crate::results::{DmlOutcome, ResultSet};
use crate::sql::{Dialect, Fragment, Statement};
use crate::types::{DatabaseType, RowValues};

#[cfg(feature = "mysql")]
use crate::mysql::{self, MysqlConnection};
#[cfg(feature = "sqlite")]
use crate::sqlite::{self, SqliteConnection};

/// One live database session.
///
/// Created by `CrudConnection::mysql_builder(..).connect()` or
/// `CrudConnection::sqlite_builder(..).connect()`, consumed by [`CrudConnection::close`].
/// Every operation takes `&mut self`; share across tasks only behind your own lock.
#[derive(Debug)]
pub enum CrudConnection {
    #[cfg(feature = "mysql")]
    Mysql(MysqlConnection),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteConnection),
}

impl DatabaseType {
    /// String-literal escaping used when flattening statements for logs.
    #[must_use]
    pub fn dialect(self) -> Dialect {
        match self {
            #[cfg(feature = "mysql")]
            DatabaseType::Mysql => Dialect::Mysql,
            #[cfg(feature = "sqlite")]
            DatabaseType::Sqlite => Dialect::Sqlite,
        }
    }
}

impl CrudConnection {
    #[must_use]
    pub fn database_type(&self) -> DatabaseType {
        match self {
            #[cfg(feature = "mysql")]
            CrudConnection::Mysql(_) => DatabaseType::Mysql,
            #[cfg(feature = "sqlite")]
            CrudConnection::Sqlite(_) => DatabaseType::Sqlite,
        }
    }

    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.database_type().dialect()
    }

    /// Whether `begin_transaction` has been called without a matching commit/rollback.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        match self {
            #[cfg(feature = "mysql")]
            CrudConnection::Mysql(conn) => conn.in_transaction(),
            #[cfg(feature = "sqlite")]
            CrudConnection::Sqlite(conn) => conn.in_transaction(),
        }
    }

    /// Release the session.
    ///
    /// # Errors
    /// Returns `SqlCrudError::ConnectionFail` if the server-side disconnect fails.
    pub async fn close(self) -> Result<(), SqlCrudError> {
        tracing::debug!(db = ?self.database_type(), "closing connection");
        match self {
            #[cfg(feature = "mysql")]
            CrudConnection::Mysql(conn) => conn.close().await,
            #[cfg(feature = "sqlite")]
            CrudConnection::Sqlite(conn) => {
                drop(conn);
                Ok(())
            }
        }
    }

    /// # Errors
    /// Returns `SqlCrudError::BeginError` if a transaction is already open or the engine refuses.
    pub async fn begin_transaction(&mut self) -> Result<(), SqlCrudError> {
        tracing::debug!(db = ?self.database_type(), "begin transaction");
        match self {
            #[cfg(feature = "mysql")]
            CrudConnection::Mysql(conn) => conn.begin().await,
            #[cfg(feature = "sqlite")]
            CrudConnection::Sqlite(conn) => conn.begin().await,
        }
    }

    /// # Errors
    /// Returns `SqlCrudError::CommitError` if no transaction is open or the engine refuses.
    pub async fn commit(&mut self) -> Result<(), SqlCrudError> {
        tracing::debug!(db = ?self.database_type(), "commit");
        match self {
            #[cfg(feature = "mysql")]
            CrudConnection::Mysql(conn) => conn.commit().await,
            #[cfg(feature = "sqlite")]
            CrudConnection::Sqlite(conn) => conn.commit().await,
        }
    }

    /// # Errors
    /// Returns `SqlCrudError::RollbackError` if no transaction is open or the engine refuses.
    pub async fn rollback(&mut self) -> Result<(), SqlCrudError> {
        tracing::debug!(db = ?self.database_type(), "rollback");
        match self {
            #[cfg(feature = "mysql")]
            CrudConnection::Mysql(conn) => conn.rollback().await,
            #[cfg(feature = "sqlite")]
            CrudConnection::Sqlite(conn) => conn.rollback().await,
        }
    }

    /// Execute arbitrary SQL text, unparameterized.
    ///
    /// Row-producing statements return their rows; anything else returns an empty row list
    /// with `rows_affected` and `last_insert_id` filled in.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if execution fails.
    pub async fn raw_query(&mut self, sql: &str) -> Result<ResultSet, SqlCrudError> {
        tracing::debug!(db = ?self.database_type(), sql, "raw query");
        let result = match self {
            #[cfg(feature = "mysql")]
            CrudConnection::Mysql(conn) => mysql::raw_query(conn, sql).await,
            #[cfg(feature = "sqlite")]
            CrudConnection::Sqlite(conn) => sqlite::raw_query(conn, sql).await,
        };
        result.inspect_err(|e| tracing::warn!(error = %e, sql, "raw query failed"))
    }

    /// Execute several `;`-separated statements without parameters.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if any statement fails.
    pub async fn execute_batch(&mut self, sql: &str) -> Result<(), SqlCrudError> {
        tracing::debug!(db = ?self.database_type(), "execute batch");
        let result = match self {
            #[cfg(feature = "mysql")]
            CrudConnection::Mysql(conn) => mysql::execute_batch(conn, sql).await,
            #[cfg(feature = "sqlite")]
            CrudConnection::Sqlite(conn) => sqlite::execute_batch(conn, sql).await,
        };
        result.inspect_err(|e| tracing::warn!(error = %e, "batch failed"))
    }

    /// Start a fluent parameterized query.
    ///
    /// # Examples
    /// ```rust,no_run
    /// use sql_crud::prelude::*;
    ///
    /// # async fn demo() -> Result<(), SqlCrudError> {
    /// let mut conn = CrudConnection::sqlite_builder(":memory:").connect().await?;
    /// conn.execute_batch("CREATE TABLE t (id INTEGER)").await?;
    ///
    /// let rows = conn
    ///     .query("SELECT id FROM t WHERE id = ?")
    ///     .params(&[RowValues::Int(1)])
    ///     .select()
    ///     .await?;
    /// assert!(rows.results.is_empty());
    /// # Ok(()) }
    /// ```
    pub fn query<'a>(&'a mut self, sql: &'a str) -> QueryBuilder<'a, 'a> {
        QueryBuilder::new(self, sql)
    }

    /// Run a built row-producing statement.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if execution fails.
    pub async fn fetch(&mut self, stmt: &Statement) -> Result<ResultSet, SqlCrudError> {
        self.run_select(&stmt.sql, &stmt.params).await
    }

    /// Run a built DML statement.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if execution fails.
    pub async fn execute(&mut self, stmt: &Statement) -> Result<DmlOutcome, SqlCrudError> {
        self.run_dml(&stmt.sql, &stmt.params).await
    }

    fn log_statement(&self, sql: &str, params: &[RowValues]) {
        tracing::debug!(db = ?self.database_type(), sql, params = params.len(), "executing");
        if tracing::enabled!(tracing::Level::TRACE) {
            let literal = Fragment::new(sql, params.to_vec()).to_literal_sql(self.dialect());
            tracing::trace!(sql = %literal, "literal statement");
        }
    }

    pub(crate) async fn run_select(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, SqlCrudError> {
        self.log_statement(sql, params);
        let result = match self {
            #[cfg(feature = "mysql")]
            CrudConnection::Mysql(conn) => mysql::execute_select(conn, sql, params).await,
            #[cfg(feature = "sqlite")]
            CrudConnection::Sqlite(conn) => sqlite::execute_select(conn, sql, params).await,
        };
        result.inspect_err(|e| tracing::warn!(error = %e, sql, "select failed"))
    }

    pub(crate) async fn run_dml(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<DmlOutcome, SqlCrudError> {
        self.log_statement(sql, params);
        let result = match self {
            #[cfg(feature = "mysql")]
            CrudConnection::Mysql(conn) => mysql::execute_dml(conn, sql, params).await,
            #[cfg(feature = "sqlite")]
            CrudConnection::Sqlite(conn) => sqlite::execute_dml(conn, sql, params).await,
        };
        result.inspect_err(|e| tracing::warn!(error = %e, sql, "statement failed"))
    }
}
