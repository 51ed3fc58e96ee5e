use std::borrow::Cow;

use crate::connection::CrudConnection;
use crate::error::SqlCrudError;
use crate::results::{DmlOutcome, ResultSet};
use crate::types::RowValues;

/// Fluent builder for a single parameterized statement.
pub struct QueryBuilder<'conn, 'q> {
    conn: &'conn mut CrudConnection,
    sql: Cow<'q, str>,
    params: Cow<'q, [RowValues]>,
}

impl<'conn, 'q> QueryBuilder<'conn, 'q> {
    pub(crate) fn new(conn: &'conn mut CrudConnection, sql: &'q str) -> Self {
        Self {
            conn,
            sql: Cow::Borrowed(sql),
            params: Cow::Borrowed(&[]),
        }
    }

    /// Provide parameters for this statement, one per `?` in order.
    #[must_use]
    pub fn params(mut self, params: &'q [RowValues]) -> Self {
        self.params = Cow::Borrowed(params);
        self
    }

    /// Provide owned parameters.
    #[must_use]
    pub fn params_owned(mut self, params: Vec<RowValues>) -> Self {
        self.params = Cow::Owned(params);
        self
    }

    /// Execute a SELECT and return the result set.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if execution fails.
    pub async fn select(self) -> Result<ResultSet, SqlCrudError> {
        self.conn
            .run_select(self.sql.as_ref(), self.params.as_ref())
            .await
    }

    /// Execute a DML statement and return rows affected plus any generated id.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if execution fails.
    pub async fn dml(self) -> Result<DmlOutcome, SqlCrudError> {
        self.conn
            .run_dml(self.sql.as_ref(), self.params.as_ref())
            .await
    }

    /// Execute as a batch (params are ignored).
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if any statement fails.
    pub async fn batch(self) -> Result<(), SqlCrudError> {
        self.conn.execute_batch(&self.sql).await
    }
}
