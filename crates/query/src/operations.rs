//! Post-filter operations: `SORT`, `EXCLUDE` and `LIMIT`.

use std::cmp::Ordering;

use inspectarr_core::fields::raw_twin;
use inspectarr_core::{FieldType, Row, Schema, Value};
use tracing::debug;

use crate::QueryError;
use crate::collate::natural_cmp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Sort,
    Exclude,
    Limit,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sort => "SORT",
            Self::Exclude => "EXCLUDE",
            Self::Limit => "LIMIT",
        }
    }

    /// Operation names are matched case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "SORT" => Some(Self::Sort),
            "EXCLUDE" => Some(Self::Exclude),
            "LIMIT" => Some(Self::Limit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub kind: OperationKind,
    pub args: Vec<String>,
}

impl Operation {
    pub fn new(kind: OperationKind, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            kind,
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

pub(crate) fn apply_all(
    rows: &[Row],
    operations: &[Operation],
    schema: &Schema,
) -> Result<Vec<Row>, QueryError> {
    let mut current = rows.to_vec();
    for op in operations {
        current = apply(&current, op, schema)?;
        debug!(operation = op.kind.as_str(), rows = current.len(), "applied operation");
    }
    Ok(current)
}

fn apply(rows: &[Row], op: &Operation, schema: &Schema) -> Result<Vec<Row>, QueryError> {
    match op.kind {
        OperationKind::Sort => sort(rows, &op.args, schema),
        OperationKind::Exclude => Ok(exclude(rows, &op.args, schema)),
        OperationKind::Limit => limit(rows, &op.args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Asc,
    Desc,
}

/// `SORT <field> [asc|desc]`.
///
/// `size` and `resolution` sort by their raw numeric twins. Number fields
/// compare numerically when both cells are numbers; everything else uses
/// natural collation with null as the empty string. The sort is stable.
fn sort(rows: &[Row], args: &[String], schema: &Schema) -> Result<Vec<Row>, QueryError> {
    let requested = args
        .first()
        .ok_or(QueryError::MissingArgument(OperationKind::Sort.as_str()))?;
    let field = schema
        .resolve_name(requested)
        .ok_or_else(|| QueryError::UnknownOperationField {
            field: requested.clone(),
            operation: OperationKind::Sort.as_str(),
        })?;
    let field = raw_twin(field).unwrap_or(field);

    let direction = match args.get(1).map(String::as_str).unwrap_or("asc") {
        "asc" => Direction::Asc,
        "desc" => Direction::Desc,
        other => return Err(QueryError::InvalidDirection(other.to_string())),
    };

    let numeric = schema
        .field(field)
        .is_some_and(|f| f.field_type == FieldType::Number);

    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare_cells(a.get(field), b.get(field), numeric);
        match direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    });
    Ok(sorted)
}

fn compare_cells(a: Option<&Value>, b: Option<&Value>, numeric: bool) -> Ordering {
    if numeric {
        if let (Some(x), Some(y)) = (a.and_then(Value::as_f64), b.and_then(Value::as_f64)) {
            return x.total_cmp(&y);
        }
    }
    let text = |v: Option<&Value>| v.map(Value::to_string).unwrap_or_default();
    natural_cmp(&text(a), &text(b))
}

/// `EXCLUDE <field>...`. Names that do not resolve are ignored.
fn exclude(rows: &[Row], args: &[String], schema: &Schema) -> Vec<Row> {
    let fields: Vec<&str> = args
        .iter()
        .filter_map(|name| schema.resolve_name(name))
        .collect();
    if fields.is_empty() {
        return rows.to_vec();
    }
    rows.iter().map(|row| row.without(&fields)).collect()
}

/// `LIMIT <n>`: the first `n` rows.
fn limit(rows: &[Row], args: &[String]) -> Result<Vec<Row>, QueryError> {
    let raw = args
        .first()
        .ok_or(QueryError::MissingArgument(OperationKind::Limit.as_str()))?;
    let n: usize = raw.parse().map_err(|_| QueryError::InvalidArgument {
        operation: OperationKind::Limit.as_str(),
        argument: raw.clone(),
        reason: "expected a non-negative integer".into(),
    })?;
    Ok(rows.iter().take(n).cloned().collect())
}
