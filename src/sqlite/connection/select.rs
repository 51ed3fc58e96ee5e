use rusqlite::types::Value;

use crate::error::SqlCrudError;
use crate::results::ResultSet;

use super::{SqliteConnection, run_blocking};
use crate::sqlite::query::build_result_set;

impl SqliteConnection {
    /// Execute a SELECT and materialize into a `ResultSet`.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` if preparing or executing the query fails.
    pub async fn execute_select(
        &mut self,
        query: &str,
        params: Vec<Value>,
    ) -> Result<ResultSet, SqlCrudError> {
        let sql_owned = query.to_owned();
        run_blocking(self.conn_handle(), move |guard| {
            let mut stmt = guard.prepare_cached(&sql_owned)?;
            build_result_set(&mut stmt, &params)
        })
        .await
    }
}
