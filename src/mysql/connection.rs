use std::fmt;

use mysql_async::prelude::Queryable;
use mysql_async::{Conn, Params as MysqlParams, Row};

use crate::error::{ErrorKind, SqlCrudError};
use crate::results::{DmlOutcome, ResultSet};

use super::query::build_result_set;

const BEGIN_SQL: &str = "START TRANSACTION WITH CONSISTENT SNAPSHOT";

/// Single `MySQL` session.
pub struct MysqlConnection {
    pub(crate) conn: Conn,
    pub(crate) in_transaction: bool,
}

impl MysqlConnection {
    pub(crate) fn new(conn: Conn) -> Self {
        Self {
            conn,
            in_transaction: false,
        }
    }

    pub(crate) async fn set_names(&mut self, charset: &str) -> Result<(), SqlCrudError> {
        self.conn.query_drop(format!("SET NAMES {charset}")).await?;
        Ok(())
    }

    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    /// Borrow the underlying `mysql_async` connection.
    pub fn raw_conn(&mut self) -> &mut Conn {
        &mut self.conn
    }

    /// Execute a prepared, row-producing statement.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if the server rejects the statement.
    pub async fn execute_select(
        &mut self,
        query: &str,
        params: MysqlParams,
    ) -> Result<ResultSet, SqlCrudError> {
        let rows: Vec<Row> = self.conn.exec(query, params).await?;
        Ok(build_result_set(&rows))
    }

    /// Execute a prepared DML statement.
    ///
    /// `rows_affected` follows the server: without `CLIENT_FOUND_ROWS`, an UPDATE counts only
    /// rows whose values changed.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if the server rejects the statement.
    pub async fn execute_dml(
        &mut self,
        query: &str,
        params: MysqlParams,
    ) -> Result<DmlOutcome, SqlCrudError> {
        self.conn.exec_drop(query, params).await?;
        Ok(self.dml_outcome())
    }

    /// Execute `;`-separated statements over the text protocol.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if any statement fails.
    pub async fn execute_batch(&mut self, query: &str) -> Result<(), SqlCrudError> {
        self.conn.query_drop(query).await?;
        Ok(())
    }

    /// Execute arbitrary text over the text protocol.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if the server rejects the statement.
    pub async fn raw_query(&mut self, query: &str) -> Result<ResultSet, SqlCrudError> {
        let rows: Vec<Row> = self.conn.query(query).await?;
        if rows.is_empty() {
            let outcome = self.dml_outcome();
            return Ok(ResultSet::from_dml(
                outcome.rows_affected,
                outcome.last_insert_id,
            ));
        }
        Ok(build_result_set(&rows))
    }

    fn dml_outcome(&self) -> DmlOutcome {
        DmlOutcome {
            rows_affected: usize::try_from(self.conn.affected_rows()).unwrap_or(usize::MAX),
            last_insert_id: self.conn.last_insert_id().filter(|id| *id > 0),
        }
    }

    /// Begin a transaction with a consistent snapshot.
    ///
    /// # Errors
    /// Returns `SqlCrudError::BeginError` if one is already active or the server refuses.
    pub async fn begin(&mut self) -> Result<(), SqlCrudError> {
        if self.in_transaction {
            return Err(SqlCrudError::BeginError(
                "MySQL transaction already in progress".into(),
            ));
        }
        self.conn
            .query_drop(BEGIN_SQL)
            .await
            .map_err(|e| SqlCrudError::from(e).retag(ErrorKind::BeginError))?;
        self.in_transaction = true;
        Ok(())
    }

    /// Commit the open transaction.
    ///
    /// # Errors
    /// Returns `SqlCrudError::CommitError` if no transaction is active or `COMMIT` fails.
    pub async fn commit(&mut self) -> Result<(), SqlCrudError> {
        if !self.in_transaction {
            return Err(SqlCrudError::CommitError(
                "MySQL transaction not active".into(),
            ));
        }
        self.conn
            .query_drop("COMMIT")
            .await
            .map_err(|e| SqlCrudError::from(e).retag(ErrorKind::CommitError))?;
        self.in_transaction = false;
        Ok(())
    }

    /// Roll back the open transaction.
    ///
    /// # Errors
    /// Returns `SqlCrudError::RollbackError` if no transaction is active or `ROLLBACK` fails.
    pub async fn rollback(&mut self) -> Result<(), SqlCrudError> {
        if !self.in_transaction {
            return Err(SqlCrudError::RollbackError(
                "MySQL transaction not active".into(),
            ));
        }
        let result = self
            .conn
            .query_drop("ROLLBACK")
            .await
            .map_err(|e| SqlCrudError::from(e).retag(ErrorKind::RollbackError));
        self.in_transaction = false;
        result
    }

    /// Send `COM_QUIT` and drop the session.
    ///
    /// # Errors
    /// Returns `SqlCrudError::ConnectionFail` if the disconnect handshake fails.
    pub async fn close(self) -> Result<(), SqlCrudError> {
        self.conn
            .disconnect()
            .await
            .map_err(|e| SqlCrudError::ConnectionFail(e.to_string()))
    }
}

impl fmt::Debug for MysqlConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MysqlConnection")
            .field("id", &self.conn.id())
            .field("in_transaction", &self.in_transaction)
            .finish()
    }
}
