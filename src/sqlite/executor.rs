use crate::error::SqlCrudError;
use crate::results::{DmlOutcome, ResultSet};
use crate::types::{ParamConverter, RowValues};

use super::connection::SqliteConnection;
use super::params::Params;

/// Execute a batch of SQL statements for `SQLite`.
///
/// # Errors
///
/// Returns `SqlCrudError::SqlError` if execution fails.
pub async fn execute_batch(
    sqlite_client: &mut SqliteConnection,
    query: &str,
) -> Result<(), SqlCrudError> {
    sqlite_client.execute_batch(query).await
}

/// Execute a SELECT query in `SQLite`.
///
/// # Errors
///
/// Returns `SqlCrudError::SqlError` if execution or result processing fails.
pub async fn execute_select(
    sqlite_client: &mut SqliteConnection,
    query: &str,
    params: &[RowValues],
) -> Result<ResultSet, SqlCrudError> {
    let Params(converted) = Params::convert_sql_params(params)?;
    sqlite_client.execute_select(query, converted).await
}

/// Execute a DML query (INSERT, UPDATE, DELETE) in `SQLite`.
///
/// # Errors
///
/// Returns `SqlCrudError::SqlError` if execution fails.
pub async fn execute_dml(
    sqlite_client: &mut SqliteConnection,
    query: &str,
    params: &[RowValues],
) -> Result<DmlOutcome, SqlCrudError> {
    let Params(converted) = Params::convert_sql_params(params)?;
    sqlite_client.execute_dml(query, converted).await
}

/// Execute arbitrary SQL text without parameters.
///
/// # Errors
///
/// Returns `SqlCrudError::SqlError` if preparing or executing fails.
pub async fn raw_query(
    sqlite_client: &mut SqliteConnection,
    query: &str,
) -> Result<ResultSet, SqlCrudError> {
    sqlite_client.raw_query(query).await
}
