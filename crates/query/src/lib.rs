#![allow(clippy::collapsible_if)]
pub mod collate;
pub mod filter;
mod lexer;
pub mod operations;
pub mod parser;

use inspectarr_core::{FieldType, Row, Schema};
use thiserror::Error;

pub use filter::{Comparator, Filter, Literal};
pub use operations::{Operation, OperationKind};
pub use parser::Query;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },
    #[error("Unknown field '{0}'")]
    UnknownField(String),
    #[error("Unknown field '{field}' for operation '{operation}'")]
    UnknownOperationField {
        field: String,
        operation: &'static str,
    },
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),
    #[error("missing argument for operation '{0}'")]
    MissingArgument(&'static str),
    #[error(
        "Invalid direction argument '{0}' for operation 'SORT': should be either 'asc' or 'desc'"
    )]
    InvalidDirection(String),
    #[error("invalid argument '{argument}' for operation '{operation}': {reason}")]
    InvalidArgument {
        operation: &'static str,
        argument: String,
        reason: String,
    },
    #[error("invalid {field_type} value '{value}' for field '{field}'")]
    InvalidValue {
        field: String,
        field_type: FieldType,
        value: String,
    },
    #[error("operator '{operator}' cannot be used with {field_type} field '{field}'")]
    InvalidOperator {
        field: String,
        field_type: FieldType,
        operator: Comparator,
    },
    #[error("invalid regular expression '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Parses queries against one schema and runs them over rows.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    schema: &'a Schema,
}

impl<'a> QueryEngine<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Canonical name for a field name or alias.
    pub fn resolve_field(&self, name: &str) -> Result<&'static str, QueryError> {
        self.schema
            .resolve_name(name)
            .ok_or_else(|| QueryError::UnknownField(name.to_string()))
    }

    pub fn parse(&self, input: &str) -> Result<Query, QueryError> {
        parser::parse(input, self.schema)
    }

    /// Rows for which the filter holds, in input order.
    pub fn apply_filter(&self, rows: &[Row], filter: &Filter) -> Vec<Row> {
        rows.iter().filter(|row| filter.matches(row)).cloned().collect()
    }

    /// Run operations in order, each producing a new row set.
    pub fn apply_operations(
        &self,
        rows: &[Row],
        operations: &[Operation],
    ) -> Result<Vec<Row>, QueryError> {
        operations::apply_all(rows, operations, self.schema)
    }
}
