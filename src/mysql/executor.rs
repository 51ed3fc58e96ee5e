use crate::error::SqlCrudError;
use crate::results::{DmlOutcome, ResultSet};
use crate::types::{ParamConverter, RowValues};

use super::connection::MysqlConnection;
use super::params::Params;

/// Execute a batch of SQL statements for `MySQL`.
///
/// # Errors
///
/// Returns `SqlCrudError::SqlError` if execution fails.
pub async fn execute_batch(
    mysql_client: &mut MysqlConnection,
    query: &str,
) -> Result<(), SqlCrudError> {
    mysql_client.execute_batch(query).await
}

/// Execute a SELECT query in `MySQL`.
///
/// # Errors
///
/// Returns `SqlCrudError::SqlError` if execution or result processing fails.
pub async fn execute_select(
    mysql_client: &mut MysqlConnection,
    query: &str,
    params: &[RowValues],
) -> Result<ResultSet, SqlCrudError> {
    let Params(converted) = Params::convert_sql_params(params)?;
    mysql_client.execute_select(query, converted).await
}

/// Execute a DML query (INSERT, UPDATE, DELETE) in `MySQL`.
///
/// # Errors
///
/// Returns `SqlCrudError::SqlError` if execution fails.
pub async fn execute_dml(
    mysql_client: &mut MysqlConnection,
    query: &str,
    params: &[RowValues],
) -> Result<DmlOutcome, SqlCrudError> {
    let Params(converted) = Params::convert_sql_params(params)?;
    mysql_client.execute_dml(query, converted).await
}

/// Execute arbitrary SQL text without parameters.
///
/// # Errors
///
/// Returns `SqlCrudError::SqlError` if the server rejects the statement.
pub async fn raw_query(
    mysql_client: &mut MysqlConnection,
    query: &str,
) -> Result<ResultSet, SqlCrudError> {
    mysql_client.raw_query(query).await
}
