//! WHERE descriptors.
//!
//! A [`Filter`] is an ordered list of `(field, Condition)` entries. Entries render as
//! predicates joined with `AND`, in insertion order; a field added twice contributes two
//! predicates.

use super::Fragment;
use super::escape::quote_ident;
use crate::types::RowValues;

/// Operator plus operand(s) for one field.
///
/// # Example
/// ```rust
/// use sql_crud::prelude::*;
///
/// let filter = Filter::new()
///     .push("status", Condition::In(vec!["new".into(), "open".into()]))
///     .push("age", Condition::Between(18, 30));
/// assert_eq!(
///     build_where(&filter).to_literal_sql(Dialect::Mysql),
///     "WHERE `status` IN ('new','open') AND `age` >= 18 AND `age` <= 30"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `field = value`; a `Null` operand drops the entry.
    Eq(RowValues),
    /// `field <> value`; a `Null` operand drops the entry.
    Ne(RowValues),
    /// `field LIKE pattern`, pattern used exactly as given.
    Like(String),
    Lt(i64),
    Lte(i64),
    Gt(i64),
    Gte(i64),
    /// Inclusive range: `field >= lo AND field <= hi`.
    Between(i64, i64),
    /// `field IN (...)`; an empty list matches nothing.
    In(Vec<RowValues>),
}

impl Condition {
    fn is_skipped(&self) -> bool {
        matches!(self, Condition::Eq(v) | Condition::Ne(v) if v.is_null())
    }

    fn render(&self, field: &str, params: &mut Vec<RowValues>) -> String {
        let col = quote_ident(field);
        match self {
            Condition::Eq(v) => {
                params.push(v.clone());
                format!("{col} = ?")
            }
            Condition::Ne(v) => {
                params.push(v.clone());
                format!("{col} <> ?")
            }
            Condition::Like(pattern) => {
                params.push(RowValues::Text(pattern.clone()));
                format!("{col} LIKE ?")
            }
            Condition::Lt(n) => compare(&col, "<", *n, params),
            Condition::Lte(n) => compare(&col, "<=", *n, params),
            Condition::Gt(n) => compare(&col, ">", *n, params),
            Condition::Gte(n) => compare(&col, ">=", *n, params),
            Condition::Between(lo, hi) => {
                params.push(RowValues::Int(*lo));
                params.push(RowValues::Int(*hi));
                format!("{col} >= ? AND {col} <= ?")
            }
            Condition::In(values) if values.is_empty() => "1 = 0".to_string(),
            Condition::In(values) => {
                params.extend(values.iter().cloned());
                let marks = vec!["?"; values.len()].join(",");
                format!("{col} IN ({marks})")
            }
        }
    }
}

fn compare(col: &str, op: &str, n: i64, params: &mut Vec<RowValues>) -> String {
    params.push(RowValues::Int(n));
    format!("{col} {op} ?")
}

/// Structured WHERE clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    entries: Vec<(String, Condition)>,
}

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn push(mut self, field: impl Into<String>, condition: Condition) -> Self {
        self.entries.push((field.into(), condition));
        self
    }

    /// Scalar equality; `None`/`Null` values are skipped at render time.
    #[must_use]
    pub fn eq(self, field: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.push(field, Condition::Eq(value.into()))
    }

    #[must_use]
    pub fn ne(self, field: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.push(field, Condition::Ne(value.into()))
    }

    #[must_use]
    pub fn like(self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.push(field, Condition::Like(pattern.into()))
    }

    #[must_use]
    pub fn lt(self, field: impl Into<String>, value: i64) -> Self {
        self.push(field, Condition::Lt(value))
    }

    #[must_use]
    pub fn lte(self, field: impl Into<String>, value: i64) -> Self {
        self.push(field, Condition::Lte(value))
    }

    #[must_use]
    pub fn gt(self, field: impl Into<String>, value: i64) -> Self {
        self.push(field, Condition::Gt(value))
    }

    #[must_use]
    pub fn gte(self, field: impl Into<String>, value: i64) -> Self {
        self.push(field, Condition::Gte(value))
    }

    #[must_use]
    pub fn between(self, field: impl Into<String>, lo: i64, hi: i64) -> Self {
        self.push(field, Condition::Between(lo, hi))
    }

    #[must_use]
    pub fn in_list<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<RowValues>,
    {
        self.push(
            field,
            Condition::In(values.into_iter().map(Into::into).collect()),
        )
    }

    /// No entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// At least one entry survives null-skipping.
    #[must_use]
    pub fn has_predicates(&self) -> bool {
        self.entries.iter().any(|(_, c)| !c.is_skipped())
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Condition)> {
        self.entries.iter()
    }
}

impl<S: Into<String>> FromIterator<(S, Condition)> for Filter {
    fn from_iter<T: IntoIterator<Item = (S, Condition)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(f, c)| (f.into(), c)).collect(),
        }
    }
}

/// Render `WHERE ...` with placeholders, or an empty fragment when nothing survives.
#[must_use]
pub fn build_where(filter: &Filter) -> Fragment {
    let mut params = Vec::new();
    let predicates: Vec<String> = filter
        .iter()
        .filter(|(_, cond)| !cond.is_skipped())
        .map(|(field, cond)| cond.render(field, &mut params))
        .collect();

    if predicates.is_empty() {
        return Fragment::empty();
    }
    Fragment::new(format!("WHERE {}", predicates.join(" AND ")), params)
}
