use rusqlite::types::Value;

use crate::error::SqlCrudError;
use crate::types::{ParamConverter, RowValues};

/// Convert a single `RowValue` to a rusqlite `Value`.
#[must_use]
pub fn row_value_to_sqlite_value(value: &RowValues) -> Value {
    match value {
        RowValues::Int(i) => Value::Integer(*i),
        RowValues::Float(f) => Value::Real(*f),
        RowValues::Text(s) => Value::Text(s.clone()),
        RowValues::Bool(b) => Value::Integer(i64::from(*b)),
        RowValues::Timestamp(dt) => Value::Text(dt.format("%F %T%.f").to_string()),
        RowValues::Null => Value::Null,
        RowValues::JSON(jval) => Value::Text(jval.to_string()),
        RowValues::Blob(bytes) => Value::Blob(bytes.clone()),
    }
}

/// Unified `SQLite` parameter container.
pub struct Params(pub Vec<Value>);

impl Params {
    /// Convert crate row values into `SQLite` values.
    ///
    /// # Errors
    ///
    /// Infallible today; the `Result` matches the other backends.
    pub fn convert(params: &[RowValues]) -> Result<Self, SqlCrudError> {
        Ok(Params(params.iter().map(row_value_to_sqlite_value).collect()))
    }
}

impl ParamConverter for Params {
    type Converted = Params;

    fn convert_sql_params(params: &[RowValues]) -> Result<Self::Converted, SqlCrudError> {
        Self::convert(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn converts_each_variant() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let Params(values) = Params::convert(&[
            RowValues::Bool(true),
            RowValues::Timestamp(dt),
            RowValues::JSON(serde_json::json!({"k": 1})),
            RowValues::Null,
        ])
        .unwrap();
        assert_eq!(values[0], Value::Integer(1));
        assert_eq!(values[1], Value::Text("2024-01-02 03:04:05".into()));
        assert_eq!(values[2], Value::Text("{\"k\":1}".into()));
        assert_eq!(values[3], Value::Null);
    }
}
