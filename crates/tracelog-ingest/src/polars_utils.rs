//! Polars AnyValue conversion into trace log cells.

use polars::prelude::*;

use tracelog_model::CellValue;

/// Converts a Polars AnyValue into a typed cell.
/// Null and empty strings become `Missing`.
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::Int8(v) => CellValue::Integer(i64::from(v)),
        AnyValue::Int16(v) => CellValue::Integer(i64::from(v)),
        AnyValue::Int32(v) => CellValue::Integer(i64::from(v)),
        AnyValue::Int64(v) => CellValue::Integer(v),
        AnyValue::UInt8(v) => CellValue::Integer(i64::from(v)),
        AnyValue::UInt16(v) => CellValue::Integer(i64::from(v)),
        AnyValue::UInt32(v) => CellValue::Integer(i64::from(v)),
        AnyValue::UInt64(v) => match i64::try_from(v) {
            Ok(v) => CellValue::Integer(v),
            Err(_) => CellValue::Text(v.to_string()),
        },
        AnyValue::Float32(v) => CellValue::Float(f64::from(v)),
        AnyValue::Float64(v) => CellValue::Float(v),
        AnyValue::Boolean(b) => CellValue::Boolean(b),
        AnyValue::String(s) => CellValue::from(s),
        AnyValue::StringOwned(s) => CellValue::from(s.as_str()),
        other => CellValue::Text(other.to_string()),
    }
}

/// Materialize every row of a frame as cells, in column order.
pub fn frame_rows(df: &DataFrame) -> Vec<Vec<CellValue>> {
    let columns = df.get_columns();
    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|column| any_to_cell(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        rows.push(row);
    }
    rows
}
