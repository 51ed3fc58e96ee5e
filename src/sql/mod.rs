//! Pure SQL construction: identifiers, column lists, ORDER BY, WHERE and whole statements.
//!
//! Nothing here touches a connection. Every builder returns SQL text with `?` placeholders
//! plus the values to bind, in placeholder order.

mod clause;
mod data;
mod escape;
mod filter;
mod literal;
mod statement;

pub use clause::{Columns, Direction, OrderBy, build_columns, build_order_by};
pub use data::RowData;
pub use escape::{Dialect, quote_ident};
pub use filter::{Condition, Filter, build_where};
pub use statement::{
    Limit, build_count, build_delete, build_insert, build_select, build_update,
};

use crate::types::RowValues;

/// A piece of SQL text with `?` placeholders and the values bound to them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub params: Vec<RowValues>,
}

/// A complete, executable statement.
pub type Statement = Fragment;

impl Fragment {
    #[must_use]
    pub fn new(sql: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Flatten placeholders into escaped literals.
    ///
    /// For logging and debugging only; execution always binds `params`.
    #[must_use]
    pub fn to_literal_sql(&self, dialect: Dialect) -> String {
        literal::inline_params(&self.sql, &self.params, dialect)
    }
}

/// Join non-empty clauses with single spaces.
pub(crate) fn join_clauses<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for part in parts.into_iter().filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}
