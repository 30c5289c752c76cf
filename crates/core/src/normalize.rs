//! Conversion of source rows into jsonifiable rows.
//!
//! Rules, applied per field:
//! 1. Lists collapse to their unique values joined with `,`; an empty result is null.
//! 2. Strings are trimmed.
//! 3. Absent values become null.
//! 4. Other scalars pass through.

use crate::types::{MediaRow, MediaValue, Row, Scalar, Value};

/// Normalize every row. The input is left untouched.
pub fn normalize_rows(rows: &[MediaRow]) -> Vec<Row> {
    rows.iter().map(normalize_row).collect()
}

pub fn normalize_row(row: &MediaRow) -> Row {
    row.map_values(normalize_value)
}

pub fn normalize_value(value: &MediaValue) -> Value {
    match value {
        MediaValue::Absent => Value::Null,
        MediaValue::List(items) => unique_join(items).map_or(Value::Null, Value::String),
        MediaValue::Scalar(Scalar::String(s)) => Value::String(s.trim().to_string()),
        MediaValue::Scalar(other) => Value::from(other.clone()),
    }
}

/// Unique values in first-seen order, comma joined and trimmed. `None` when
/// nothing is left.
pub fn unique_join(items: &[Scalar]) -> Option<String> {
    let mut unique: Vec<&Scalar> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }

    let joined = unique
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let joined = joined.trim();
    (!joined.is_empty()).then(|| joined.to_string())
}
