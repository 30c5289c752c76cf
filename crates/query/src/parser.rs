//! Query text → filter expression plus operations.
//!
//! ```text
//! query      := [filter] ('|' operation)*
//! filter     := '*' | or
//! or         := and ('||' and)*
//! and        := unary ('&&' unary)*
//! unary      := '!' unary | '(' or ')' | comparison
//! comparison := field [op value]
//! operation  := NAME arg*
//! ```

use inspectarr_core::{FieldType, Schema};
use regex::RegexBuilder;

use crate::QueryError;
use crate::filter::{Comparator, Filter, Literal};
use crate::lexer::{Spanned, Token, tokenize};
use crate::operations::{Operation, OperationKind};

#[derive(Debug, Clone)]
pub struct Query {
    pub filter: Filter,
    pub operations: Vec<Operation>,
}

impl Query {
    /// Matches everything, no operations.
    pub fn all() -> Self {
        Self {
            filter: Filter::All,
            operations: Vec::new(),
        }
    }

    /// Copy of the query without operations of `kind`.
    pub fn without_operation(&self, kind: OperationKind) -> Self {
        Self {
            filter: self.filter.clone(),
            operations: self
                .operations
                .iter()
                .filter(|op| op.kind != kind)
                .cloned()
                .collect(),
        }
    }
}

pub fn parse(input: &str, schema: &Schema) -> Result<Query, QueryError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: input.len(),
        schema,
    };
    parser.query()
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    end: usize,
    schema: &'a Schema,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn position(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |s| s.pos)
    }

    fn error(&self, message: impl Into<String>) -> QueryError {
        QueryError::Syntax {
            position: self.position(),
            message: message.into(),
        }
    }

    fn unexpected(&self, expected: &str) -> QueryError {
        match self.peek() {
            Some(token) => self.error(format!("expected {expected}, found {}", token.describe())),
            None => self.error(format!("expected {expected}, found end of query")),
        }
    }

    fn query(&mut self) -> Result<Query, QueryError> {
        let filter = match self.peek() {
            None | Some(Token::Pipe) => Filter::All,
            Some(Token::Star) => {
                self.next();
                Filter::All
            }
            Some(_) => self.or()?,
        };

        let mut operations = Vec::new();
        while let Some(token) = self.peek() {
            if *token != Token::Pipe {
                return Err(self.unexpected("'&&', '||' or '|'"));
            }
            self.next();
            operations.push(self.operation()?);
        }

        Ok(Query { filter, operations })
    }

    fn or(&mut self) -> Result<Filter, QueryError> {
        let mut lhs = self.and()?;
        while self.peek() == Some(&Token::Or) {
            self.next();
            let rhs = self.and()?;
            lhs = Filter::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<Filter, QueryError> {
        let mut lhs = self.unary()?;
        while self.peek() == Some(&Token::And) {
            self.next();
            let rhs = self.unary()?;
            lhs = Filter::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Filter, QueryError> {
        match self.peek() {
            Some(Token::Not) => {
                self.next();
                Ok(Filter::Not(Box::new(self.unary()?)))
            }
            Some(Token::LParen) => {
                self.next();
                let inner = self.or()?;
                if self.peek() != Some(&Token::RParen) {
                    return Err(self.unexpected("')'"));
                }
                self.next();
                Ok(inner)
            }
            Some(Token::Word(_)) | Some(Token::Quoted(_)) => self.comparison(),
            _ => Err(self.unexpected("a field")),
        }
    }

    fn comparison(&mut self) -> Result<Filter, QueryError> {
        let name = match self.next() {
            Some(Token::Word(name)) | Some(Token::Quoted(name)) => name,
            _ => return Err(self.unexpected("a field")),
        };
        let field = self
            .schema
            .resolve(name)
            .ok_or_else(|| QueryError::UnknownField(name.clone()))?;

        let op = match self.peek() {
            Some(Token::Op(op)) => *op,
            _ => return Ok(Filter::Truthy(field.name.to_string())),
        };
        self.next();

        let raw = match self.peek() {
            Some(Token::Word(v)) | Some(Token::Quoted(v)) => v,
            _ => return Err(self.unexpected("a value")),
        };
        self.next();

        let value = literal(field.name, field.field_type, op, raw)?;
        Ok(Filter::Compare {
            field: field.name.to_string(),
            op,
            value,
        })
    }

    fn operation(&mut self) -> Result<Operation, QueryError> {
        let name = match self.peek() {
            Some(Token::Word(name)) => name,
            _ => return Err(self.unexpected("an operation name")),
        };
        self.next();
        let kind =
            OperationKind::from_name(name).ok_or_else(|| QueryError::UnknownOperation(name.clone()))?;

        let mut args = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Word(arg)) | Some(Token::Quoted(arg)) => {
                    args.push(arg.clone());
                    self.next();
                }
                None | Some(Token::Pipe) => break,
                Some(_) => return Err(self.unexpected("an argument or '|'")),
            }
        }

        Ok(Operation { kind, args })
    }
}

fn literal(
    field: &str,
    field_type: FieldType,
    op: Comparator,
    raw: &str,
) -> Result<Literal, QueryError> {
    let invalid_operator = || QueryError::InvalidOperator {
        field: field.to_string(),
        field_type,
        operator: op,
    };

    if op == Comparator::Matches {
        if field_type == FieldType::Boolean {
            return Err(invalid_operator());
        }
        return RegexBuilder::new(raw)
            .case_insensitive(true)
            .build()
            .map(Literal::Pattern)
            .map_err(|e| QueryError::InvalidPattern {
                pattern: raw.to_string(),
                reason: e.to_string(),
            });
    }

    match field_type {
        FieldType::Number if op.is_relational() => {
            raw.trim()
                .parse()
                .map(Literal::Number)
                .map_err(|_| QueryError::InvalidValue {
                    field: field.to_string(),
                    field_type,
                    value: raw.to_string(),
                })
        }
        FieldType::Boolean => {
            if !matches!(op, Comparator::Eq | Comparator::NotEq) {
                return Err(invalid_operator());
            }
            match raw.to_ascii_lowercase().as_str() {
                "true" => Ok(Literal::Bool(true)),
                "false" => Ok(Literal::Bool(false)),
                _ => Err(QueryError::InvalidValue {
                    field: field.to_string(),
                    field_type,
                    value: raw.to_string(),
                }),
            }
        }
        _ => Ok(Literal::Text(raw.to_lowercase())),
    }
}
