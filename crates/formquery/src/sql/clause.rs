//! The accumulating where clause.

use std::fmt;

use super::Operator;

/// Base clause used when no existing where clause is supplied.
pub const EMPTY_WHERE: &str = "1=1";

/// A conjunctive where clause.
///
/// Never empty: it starts from an existing clause or from `1=1`, and every
/// addition is joined with ` AND `.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    sql: String,
}

impl WhereClause {
    /// Starts from `existing` when it is non-empty, else from `1=1`.
    pub fn new(existing: Option<&str>) -> Self {
        let sql = match existing {
            Some(existing) if !existing.is_empty() => existing.to_string(),
            _ => EMPTY_WHERE.to_string(),
        };
        Self { sql }
    }

    /// Conjoins a raw boolean expression.
    pub fn and(&mut self, expression: &str) -> &mut Self {
        self.sql.push_str(" AND ");
        self.sql.push_str(expression);
        self
    }

    /// Conjoins `<field> <operator> <value>`; `IN` lists are parenthesized.
    pub fn push_predicate(&mut self, field: &str, operator: Operator, value: &str) -> &mut Self {
        self.sql = append_to_where(&self.sql, field, operator, value);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.sql
    }

    pub fn into_string(self) -> String {
        self.sql
    }
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Returns `where` with ` AND <field> <operator> <value>` appended.
pub fn append_to_where(clause: &str, field: &str, operator: Operator, value: &str) -> String {
    match operator {
        Operator::In => format!("{} AND {} {} ({})", clause, field, operator, value),
        _ => format!("{} AND {} {} {}", clause, field, operator, value),
    }
}
