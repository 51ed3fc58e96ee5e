use std::collections::HashMap;
use std::sync::Arc;

use super::row::{Record, index_columns};
use crate::types::RowValues;

/// A result set from a database query
///
/// Rows for statements that produce them; `rows_affected` and `last_insert_id`
/// for statements that do not.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<Record>,
    /// Rows returned (SELECT) or rows affected (DML)
    pub rows_affected: usize,
    /// Generated id of the last inserted row, when the engine reports one
    pub last_insert_id: Option<u64>,
    column_names: Option<Arc<Vec<String>>>,
    column_index_cache: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a new result set with a known capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            ..ResultSet::default()
        }
    }

    /// Result of a statement that produced no rows.
    #[must_use]
    pub fn from_dml(rows_affected: usize, last_insert_id: Option<u64>) -> ResultSet {
        ResultSet {
            rows_affected,
            last_insert_id,
            ..ResultSet::default()
        }
    }

    /// Set the column names for this result set (to be shared by all rows)
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index_cache = Some(Arc::new(index_columns(&column_names)));
        self.column_names = Some(column_names);
    }

    /// Get the column names for this result set
    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Add a row to the result set. Ignored until column names are set.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        if let (Some(column_names), Some(cache)) = (&self.column_names, &self.column_index_cache) {
            self.results.push(Record::with_cache(
                Arc::clone(column_names),
                row_values,
                Arc::clone(cache),
            ));
            self.rows_affected += 1;
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Consume the set, keeping only the rows.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.results
    }
}
