use std::sync::Arc;

use chrono::NaiveDate;
use mysql_async::consts::ColumnType;
use mysql_async::{Column, Row, Value};

use crate::results::ResultSet;
use crate::types::RowValues;

fn is_integer_column(column_type: ColumnType) -> bool {
    matches!(
        column_type,
        ColumnType::MYSQL_TYPE_TINY
            | ColumnType::MYSQL_TYPE_SHORT
            | ColumnType::MYSQL_TYPE_INT24
            | ColumnType::MYSQL_TYPE_LONG
            | ColumnType::MYSQL_TYPE_LONGLONG
            | ColumnType::MYSQL_TYPE_YEAR
    )
}

fn is_float_column(column_type: ColumnType) -> bool {
    matches!(
        column_type,
        ColumnType::MYSQL_TYPE_FLOAT | ColumnType::MYSQL_TYPE_DOUBLE
    )
}

/// Text-protocol values arrive as bytes; numeric columns are parsed back to numbers so
/// both protocols yield the same `RowValues`.
fn bytes_to_row_value(bytes: &[u8], column: &Column) -> RowValues {
    let Ok(text) = std::str::from_utf8(bytes) else {
        return RowValues::Blob(bytes.to_vec());
    };
    let column_type = column.column_type();
    if is_integer_column(column_type) {
        if let Ok(i) = text.parse::<i64>() {
            return RowValues::Int(i);
        }
    } else if is_float_column(column_type) {
        if let Ok(f) = text.parse::<f64>() {
            return RowValues::Float(f);
        }
    }
    RowValues::Text(text.to_string())
}

/// Convert one `mysql_async` value, using its column for text-protocol typing.
#[must_use]
pub fn mysql_extract_value(value: &Value, column: &Column) -> RowValues {
    match value {
        Value::NULL => RowValues::Null,
        Value::Bytes(bytes) => bytes_to_row_value(bytes, column),
        Value::Int(i) => RowValues::Int(*i),
        Value::UInt(u) => {
            i64::try_from(*u).map_or_else(|_| RowValues::Text(u.to_string()), RowValues::Int)
        }
        Value::Float(f) => RowValues::Float(f64::from(*f)),
        Value::Double(d) => RowValues::Float(*d),
        Value::Date(year, month, day, hour, minute, second, micros) => {
            NaiveDate::from_ymd_opt(i32::from(*year), u32::from(*month), u32::from(*day))
                .and_then(|date| {
                    date.and_hms_micro_opt(
                        u32::from(*hour),
                        u32::from(*minute),
                        u32::from(*second),
                        *micros,
                    )
                })
                // zero dates ('0000-00-00') have no chrono representation
                .map_or(RowValues::Null, RowValues::Timestamp)
        }
        Value::Time(negative, days, hours, minutes, seconds, micros) => {
            let total_hours = u64::from(*days) * 24 + u64::from(*hours);
            let sign = if *negative { "-" } else { "" };
            RowValues::Text(format!(
                "{sign}{total_hours:02}:{minutes:02}:{seconds:02}.{micros:06}"
            ))
        }
    }
}

/// Materialize `mysql_async` rows into a `ResultSet`.
#[must_use]
pub fn build_result_set(rows: &[Row]) -> ResultSet {
    let mut result_set = ResultSet::with_capacity(rows.len());
    let Some(first) = rows.first() else {
        return result_set;
    };

    let columns = first.columns_ref();
    let column_names: Vec<String> = columns.iter().map(|c| c.name_str().into_owned()).collect();
    result_set.set_column_names(Arc::new(column_names));

    for row in rows {
        let row_values = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                row.as_ref(i)
                    .map_or(RowValues::Null, |value| mysql_extract_value(value, column))
            })
            .collect();
        result_set.add_row_values(row_values);
    }
    result_set
}
