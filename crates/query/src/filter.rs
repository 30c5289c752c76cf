//! Filter expressions and their evaluation against rows.

use std::cmp::Ordering;
use std::fmt;

use inspectarr_core::{Row, Value};
use regex::Regex;

use crate::collate::natural_cmp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    NotEq,
    Contains,
    StartsWith,
    EndsWith,
    Matches,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Contains => "*=",
            Self::StartsWith => "^=",
            Self::EndsWith => "$=",
            Self::Matches => "~=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Gt | Self::Gte | Self::Lt | Self::Lte
        )
    }

    fn holds(self, ord: Ordering) -> bool {
        match self {
            Self::Eq => ord == Ordering::Equal,
            Self::NotEq => ord != Ordering::Equal,
            Self::Gt => ord == Ordering::Greater,
            Self::Gte => ord != Ordering::Less,
            Self::Lt => ord == Ordering::Less,
            Self::Lte => ord != Ordering::Greater,
            _ => false,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a comparison, typed by the field it is compared with.
#[derive(Debug, Clone)]
pub enum Literal {
    Number(f64),
    Bool(bool),
    /// Lowercased text for case-insensitive string operators.
    Text(String),
    Pattern(Regex),
}

#[derive(Debug, Clone)]
pub enum Filter {
    /// Matches every row.
    All,
    /// Bare field: boolean `true`, or any non-empty value.
    Truthy(String),
    Compare {
        field: String,
        op: Comparator,
        value: Literal,
    },
    Not(Box<Filter>),
    And(Box<Filter>, Box<Filter>),
    Or(Box<Filter>, Box<Filter>),
}

impl Filter {
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Self::All => true,
            Self::Truthy(field) => cell(row, field).is_truthy(),
            Self::Compare { field, op, value } => compare(cell(row, field), *op, value),
            Self::Not(inner) => !inner.matches(row),
            Self::And(lhs, rhs) => lhs.matches(row) && rhs.matches(row),
            Self::Or(lhs, rhs) => lhs.matches(row) || rhs.matches(row),
        }
    }
}

fn cell<'r>(row: &'r Row, field: &str) -> &'r Value {
    const NULL: &Value = &Value::Null;
    row.get(field).unwrap_or(NULL)
}

fn compare(cell: &Value, op: Comparator, literal: &Literal) -> bool {
    match literal {
        Literal::Number(expected) => match cell.as_f64() {
            Some(actual) => actual
                .partial_cmp(expected)
                .is_some_and(|ord| op.holds(ord)),
            None => op == Comparator::NotEq,
        },
        Literal::Bool(expected) => {
            let equal = cell.as_bool() == Some(*expected);
            if op == Comparator::NotEq { !equal } else { equal }
        }
        Literal::Pattern(re) => re.is_match(&cell.to_string()),
        Literal::Text(expected) => {
            let actual = cell.to_string().to_lowercase();
            match op {
                Comparator::Eq => actual == *expected,
                Comparator::NotEq => actual != *expected,
                Comparator::Contains => actual.contains(expected.as_str()),
                Comparator::StartsWith => actual.starts_with(expected.as_str()),
                Comparator::EndsWith => actual.ends_with(expected.as_str()),
                ordering => ordering.holds(natural_cmp(&actual, expected)),
            }
        }
    }
}
