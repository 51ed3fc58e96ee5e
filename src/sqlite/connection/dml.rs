use rusqlite::types::Value;

use crate::error::SqlCrudError;
use crate::results::{DmlOutcome, ResultSet};

use super::{SqliteConnection, run_blocking};
use crate::sqlite::query::build_result_set;

/// `last_insert_rowid` is sticky per connection; only a value that moved during a
/// statement which touched rows belongs to that statement.
fn inserted_rowid(
    conn: &rusqlite::Connection,
    before: i64,
    rows_affected: usize,
) -> Option<u64> {
    let after = conn.last_insert_rowid();
    if rows_affected == 0 || after == before {
        return None;
    }
    u64::try_from(after).ok().filter(|id| *id > 0)
}

impl SqliteConnection {
    /// Execute a batch of `;`-separated statements.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if any statement fails.
    pub async fn execute_batch(&mut self, query: &str) -> Result<(), SqlCrudError> {
        let sql_owned = query.to_owned();
        run_blocking(self.conn_handle(), move |guard| {
            guard.execute_batch(&sql_owned)?;
            Ok(())
        })
        .await
    }

    /// Execute a DML statement and report rows affected plus the last insert rowid.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if preparing or executing the statement fails.
    pub async fn execute_dml(
        &mut self,
        query: &str,
        params: Vec<Value>,
    ) -> Result<DmlOutcome, SqlCrudError> {
        let sql_owned = query.to_owned();
        run_blocking(self.conn_handle(), move |guard| {
            let before = guard.last_insert_rowid();
            let mut stmt = guard.prepare_cached(&sql_owned)?;
            let refs: Vec<&dyn rusqlite::ToSql> =
                params.iter().map(|v| v as &dyn rusqlite::ToSql).collect();
            let rows_affected = stmt.execute(&refs[..])?;
            drop(stmt);
            Ok(DmlOutcome {
                rows_affected,
                last_insert_id: inserted_rowid(guard, before, rows_affected),
            })
        })
        .await
    }

    /// Execute one statement of arbitrary text, returning rows if it produces any.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if preparing or executing fails.
    pub async fn raw_query(&mut self, query: &str) -> Result<ResultSet, SqlCrudError> {
        let sql_owned = query.to_owned();
        run_blocking(self.conn_handle(), move |guard| {
            let before = guard.last_insert_rowid();
            let mut stmt = guard.prepare(&sql_owned)?;
            if stmt.column_count() > 0 {
                return build_result_set(&mut stmt, &[]);
            }
            let rows_affected = stmt.execute([])?;
            drop(stmt);
            Ok(ResultSet::from_dml(
                rows_affected,
                inserted_rowid(guard, before, rows_affected),
            ))
        })
        .await
    }
}
