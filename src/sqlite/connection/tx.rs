use crate::error::{ErrorKind, SqlCrudError};

use super::{SqliteConnection, run_blocking};

impl SqliteConnection {
    /// Begin a transaction.
    ///
    /// # Errors
    /// Returns `SqlCrudError::BeginError` if one is already active or `BEGIN` fails.
    pub async fn begin(&mut self) -> Result<(), SqlCrudError> {
        if self.in_transaction && !self.engine_autocommit().await? {
            return Err(SqlCrudError::BeginError(
                "SQLite transaction already in progress".into(),
            ));
        }
        run_blocking(self.conn_handle(), |guard| {
            guard
                .execute_batch("BEGIN")
                .map_err(|e| SqlCrudError::from(e).retag(ErrorKind::BeginError))
        })
        .await?;
        self.in_transaction = true;
        Ok(())
    }

    /// Commit the open transaction.
    ///
    /// # Errors
    /// Returns `SqlCrudError::CommitError` if no transaction is active, the engine already
    /// rolled it back, or `COMMIT` fails.
    pub async fn commit(&mut self) -> Result<(), SqlCrudError> {
        if !self.in_transaction {
            return Err(SqlCrudError::CommitError(
                "SQLite transaction not active".into(),
            ));
        }
        let result = run_blocking(self.conn_handle(), |guard| {
            if guard.is_autocommit() {
                return Err(SqlCrudError::CommitError(
                    "SQLite transaction was already rolled back by the engine".into(),
                ));
            }
            guard
                .execute_batch("COMMIT")
                .map_err(|e| SqlCrudError::from(e).retag(ErrorKind::CommitError))
        })
        .await;
        // a failed COMMIT (e.g. SQLITE_BUSY) leaves the transaction open
        self.in_transaction = !self.engine_autocommit().await?;
        result
    }

    /// Roll back the open transaction.
    ///
    /// Succeeds without touching the engine if it has already rolled back on its own.
    ///
    /// # Errors
    /// Returns `SqlCrudError::RollbackError` if no transaction is active or `ROLLBACK` fails.
    pub async fn rollback(&mut self) -> Result<(), SqlCrudError> {
        if !self.in_transaction {
            return Err(SqlCrudError::RollbackError(
                "SQLite transaction not active".into(),
            ));
        }
        let result = run_blocking(self.conn_handle(), |guard| {
            if guard.is_autocommit() {
                return Ok(());
            }
            guard
                .execute_batch("ROLLBACK")
                .map_err(|e| SqlCrudError::from(e).retag(ErrorKind::RollbackError))
        })
        .await;
        // cleared on failure too
        self.in_transaction = false;
        result
    }

    async fn engine_autocommit(&self) -> Result<bool, SqlCrudError> {
        run_blocking(self.conn_handle(), |guard| Ok(guard.is_autocommit())).await
    }
}
