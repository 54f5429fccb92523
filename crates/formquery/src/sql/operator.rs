//! Comparison operators.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::diagnostic::QueryError;

/// The fixed set of comparison operators a search field may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    In,
    Between,
}

impl Operator {
    /// Parse an operator from its SQL text, ignoring case.
    pub fn parse(s: &str) -> Result<Self, QueryError> {
        match s.trim().to_uppercase().as_str() {
            "=" => Ok(Operator::Eq),
            "<>" => Ok(Operator::NotEq),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::LtEq),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::GtEq),
            "LIKE" => Ok(Operator::Like),
            "IN" => Ok(Operator::In),
            "BETWEEN" => Ok(Operator::Between),
            _ => Err(QueryError::UnsupportedOperator {
                operator: s.to_string(),
            }),
        }
    }

    /// Convert to SQL text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "<>",
            Operator::Lt => "<",
            Operator::LtEq => "<=",
            Operator::Gt => ">",
            Operator::GtEq => ">=",
            Operator::Like => "LIKE",
            Operator::In => "IN",
            Operator::Between => "BETWEEN",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Operator {
    type Error = QueryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Operator::parse(&s)
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}
