mod result_set;
mod row;

pub use result_set::ResultSet;
pub use row::Record;

/// Outcome of a statement that produces no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DmlOutcome {
    pub rows_affected: usize,
    /// Generated id of the last inserted row, when the engine reports one
    pub last_insert_id: Option<u64>,
}
