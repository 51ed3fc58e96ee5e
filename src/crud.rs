//! Table-level CRUD helpers built on the pure statement builders.

use crate::connection::CrudConnection;
use crate::error::SqlCrudError;
use crate::results::Record;
use crate::sql::{
    Columns, Filter, Limit, OrderBy, RowData, build_count, build_delete, build_insert,
    build_select, build_update,
};
use crate::types::RowValues;

fn require_table(table: &str) -> Result<(), SqlCrudError> {
    if table.trim().is_empty() {
        return Err(SqlCrudError::invalid_input("table name is empty"));
    }
    Ok(())
}

fn require_data(data: &RowData) -> Result<(), SqlCrudError> {
    if data.is_empty() {
        return Err(SqlCrudError::invalid_input("no fields supplied"));
    }
    Ok(())
}

fn count_from(value: &RowValues) -> u64 {
    match value {
        RowValues::Int(n) => u64::try_from(*n).unwrap_or(0),
        RowValues::Text(s) => s.trim().parse().unwrap_or(0),
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        RowValues::Float(f) if *f > 0.0 => *f as u64,
        _ => 0,
    }
}

impl CrudConnection {
    /// Filtered, ordered, paginated listing.
    ///
    /// `page` is 1-based; pagination applies only when both `page` and `page_size` are non-zero.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` for an empty table name or a failed query.
    pub async fn search(
        &mut self,
        table: &str,
        filter: &Filter,
        page: u64,
        page_size: u64,
        columns: &Columns,
        order: &OrderBy,
    ) -> Result<Vec<Record>, SqlCrudError> {
        require_table(table)?;
        let stmt = build_select(
            table,
            filter,
            Limit::from_page(page, page_size),
            columns,
            order,
        );
        Ok(self.fetch(&stmt).await?.into_records())
    }

    /// Number of rows matching `filter`.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` for an empty table name or a failed query.
    pub async fn count(&mut self, table: &str, filter: &Filter) -> Result<u64, SqlCrudError> {
        require_table(table)?;
        let stmt = build_count(table, filter);
        let result = self.fetch(&stmt).await?;
        Ok(result
            .results
            .first()
            .and_then(|row| row.get("count"))
            .map_or(0, count_from))
    }

    /// First row matching `filter` under `order`, if any.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` for an empty table name or a failed query.
    pub async fn find(
        &mut self,
        table: &str,
        filter: &Filter,
        columns: &Columns,
        order: &OrderBy,
    ) -> Result<Option<Record>, SqlCrudError> {
        let rows = self.search(table, filter, 1, 1, columns, order).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert one row; returns the generated key, or 0 when the table has none.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` for an empty table name, empty `data`, or a failed insert.
    pub async fn create(&mut self, table: &str, data: &RowData) -> Result<u64, SqlCrudError> {
        require_table(table)?;
        require_data(data)?;
        let stmt = build_insert(table, data);
        let outcome = self.execute(&stmt).await?;
        Ok(outcome.last_insert_id.unwrap_or(0))
    }

    /// Update rows matching `filter`; an empty filter updates every row.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` for an empty table name, empty `data`, or a failed update.
    pub async fn update(
        &mut self,
        table: &str,
        filter: &Filter,
        data: &RowData,
    ) -> Result<u64, SqlCrudError> {
        require_table(table)?;
        require_data(data)?;
        let stmt = build_update(table, filter, data);
        let outcome = self.execute(&stmt).await?;
        Ok(outcome.rows_affected as u64)
    }

    /// Delete rows matching `filter`.
    ///
    /// A filter that renders no predicates is refused rather than wiping the table.
    ///
    /// # Errors
    /// Returns `SqlCrudError::SqlError` for an empty table name, a filter without
    /// predicates, or a failed delete.
    pub async fn delete(&mut self, table: &str, filter: &Filter) -> Result<u64, SqlCrudError> {
        require_table(table)?;
        if !filter.has_predicates() {
            return Err(SqlCrudError::invalid_input(
                "delete requires at least one filter predicate",
            ));
        }
        let stmt = build_delete(table, filter);
        let outcome = self.execute(&stmt).await?;
        Ok(outcome.rows_affected as u64)
    }
}
