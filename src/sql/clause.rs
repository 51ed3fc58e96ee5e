use std::fmt;
use std::str::FromStr;

use super::escape::quote_ident;
use crate::error::SqlCrudError;

/// Which columns a SELECT returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Columns {
    /// `*`
    #[default]
    All,
    /// Named columns, in output order.
    List(Vec<String>),
}

impl Columns {
    #[must_use]
    pub fn list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Columns::List(names.into_iter().map(Into::into).collect())
    }

    /// True for `All`, for an empty list, and for the single-entry `["*"]` sentinel.
    #[must_use]
    pub fn is_all(&self) -> bool {
        match self {
            Columns::All => true,
            Columns::List(names) => {
                names.is_empty() || (names.len() == 1 && names[0] == "*")
            }
        }
    }
}

impl<S: Into<String>> From<Vec<S>> for Columns {
    fn from(names: Vec<S>) -> Self {
        Columns::list(names)
    }
}

impl<S: Into<String> + Clone> From<&[S]> for Columns {
    fn from(names: &[S]) -> Self {
        Columns::list(names.iter().cloned())
    }
}

/// Render a column list: `*`, or `` `a`,`b` `` in descriptor order.
#[must_use]
pub fn build_columns(columns: &Columns) -> String {
    match columns {
        Columns::List(names) if !columns.is_all() => join_idents(names),
        _ => "*".to_string(),
    }
}

pub(crate) fn join_idents(names: &[String]) -> String {
    names
        .iter()
        .map(|n| quote_ident(n))
        .collect::<Vec<_>>()
        .join(",")
}

/// Sort direction token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => f.write_str("ASC"),
            Direction::Desc => f.write_str("DESC"),
        }
    }
}

impl FromStr for Direction {
    type Err = SqlCrudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Direction::Asc),
            "DESC" => Ok(Direction::Desc),
            other => Err(SqlCrudError::SqlError(format!(
                "unknown sort direction: {other}"
            ))),
        }
    }
}

/// Ordered `(field, direction)` list; entry order is clause order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBy {
    entries: Vec<(String, Direction)>,
}

impl OrderBy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn asc(self, field: impl Into<String>) -> Self {
        self.push(field, Direction::Asc)
    }

    #[must_use]
    pub fn desc(self, field: impl Into<String>) -> Self {
        self.push(field, Direction::Desc)
    }

    #[must_use]
    pub fn push(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.entries.push((field.into(), direction));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Direction)> {
        self.entries.iter()
    }
}

impl<S: Into<String>> FromIterator<(S, Direction)> for OrderBy {
    fn from_iter<T: IntoIterator<Item = (S, Direction)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(f, d)| (f.into(), d)).collect(),
        }
    }
}

/// Render `ORDER BY` or an empty string.
#[must_use]
pub fn build_order_by(order: &OrderBy) -> String {
    if order.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = order
        .iter()
        .map(|(field, dir)| format!("{} {dir}", quote_ident(field)))
        .collect();
    format!("ORDER BY {}", parts.join(","))
}
