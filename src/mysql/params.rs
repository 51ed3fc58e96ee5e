use chrono::{Datelike, Timelike};
use mysql_async::{Params as MysqlParams, Value};

use crate::error::SqlCrudError;
use crate::types::{ParamConverter, RowValues};

/// Convert a single `RowValue` to a `mysql_async` `Value`.
///
/// # Errors
/// Returns `SqlCrudError::SqlError` for timestamps outside MySQL's year range.
pub fn row_value_to_mysql_value(value: &RowValues) -> Result<Value, SqlCrudError> {
    Ok(match value {
        RowValues::Int(i) => Value::Int(*i),
        RowValues::Float(f) => Value::Double(*f),
        RowValues::Text(s) => Value::Bytes(s.as_bytes().to_vec()),
        RowValues::Bool(b) => Value::Int(i64::from(*b)),
        RowValues::Timestamp(dt) => {
            let year = u16::try_from(dt.year()).map_err(|_| {
                SqlCrudError::SqlError(format!("timestamp year out of range: {dt}"))
            })?;
            let narrow = |v: u32| u8::try_from(v).unwrap_or(u8::MAX);
            Value::Date(
                year,
                narrow(dt.month()),
                narrow(dt.day()),
                narrow(dt.hour()),
                narrow(dt.minute()),
                narrow(dt.second()),
                dt.nanosecond() / 1_000,
            )
        }
        RowValues::Null => Value::NULL,
        RowValues::JSON(jval) => Value::Bytes(jval.to_string().into_bytes()),
        RowValues::Blob(bytes) => Value::Bytes(bytes.clone()),
    })
}

/// Unified `MySQL` parameter container.
pub struct Params(pub MysqlParams);

impl Params {
    /// Convert crate row values into positional `mysql_async` params.
    ///
    /// # Errors
    ///
    /// Returns `SqlCrudError::SqlError` if any value cannot be represented.
    pub fn convert(params: &[RowValues]) -> Result<Self, SqlCrudError> {
        if params.is_empty() {
            return Ok(Params(MysqlParams::Empty));
        }
        let values = params
            .iter()
            .map(row_value_to_mysql_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Params(MysqlParams::Positional(values)))
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
    fn empty_params_are_empty() {
        assert!(matches!(Params::convert(&[]).unwrap().0, MysqlParams::Empty));
    }

    #[test]
    fn converts_each_variant() {
        let dt = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_micro_opt(23, 59, 58, 123_456)
            .unwrap();
        let Params(MysqlParams::Positional(values)) = Params::convert(&[
            RowValues::Text("a'b".into()),
            RowValues::Bool(false),
            RowValues::Timestamp(dt),
            RowValues::Null,
        ])
        .unwrap() else {
            panic!("expected positional params");
        };
        assert_eq!(values[0], Value::Bytes(b"a'b".to_vec()));
        assert_eq!(values[1], Value::Int(0));
        assert_eq!(values[2], Value::Date(2024, 2, 29, 23, 59, 58, 123_456));
        assert_eq!(values[3], Value::NULL);
    }
}
