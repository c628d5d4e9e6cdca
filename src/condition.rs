use std::cmp::Ordering;

use crate::column_type::ColumnType;
use crate::error::DbError;
use crate::table::Table;
use crate::tokenizer::Tokens;

/// Binary comparison operator of a WHERE condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl CompareOp {
    pub fn parse(token: &str) -> Result<Self, DbError> {
        match token {
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Ge),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Le),
            "==" => Ok(Self::Eq),
            "!=" => Ok(Self::Ne),
            _ => Err(DbError::InvalidOperator(token.to_string())),
        }
    }

    /// Maps an ordering between two values to the operator's verdict.
    fn holds(self, ord: Ordering) -> bool {
        match self {
            Self::Gt => ord == Ordering::Greater,
            Self::Ge => ord != Ordering::Less,
            Self::Lt => ord == Ordering::Less,
            Self::Le => ord != Ordering::Greater,
            Self::Eq => ord == Ordering::Equal,
            Self::Ne => ord != Ordering::Equal,
        }
    }
}

/// A single `<column> <operator> <literal>` comparison.
///
/// The literal is kept as text; the referenced column's declared type decides
/// whether the comparison domain is numeric or lexicographic.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub op: CompareOp,
    pub value: String,
}

impl Condition {
    /// Consumes one condition triple from the token stream and validates it
    /// against the table: the column must exist, the operator must be one of
    /// the six known ones, and a NUMBER column's literal must parse.
    pub fn parse(tokens: &mut Tokens, table: &Table) -> Result<Self, DbError> {
        let column = tokens.next_or_empty().to_string();
        let op = CompareOp::parse(tokens.next_or_empty())?;
        let value = tokens.next_or_empty().to_string();

        let col = table.require_column(&column)?;
        if col.column_type == ColumnType::Number && value.parse::<f64>().is_err() {
            return Err(DbError::InvalidNumericLiteral(value));
        }

        Ok(Self { column, op, value })
    }

    /// Evaluates the condition against one row of the table.
    pub fn matches(&self, table: &Table, row: usize) -> Result<bool, DbError> {
        let column = table.require_column(&self.column)?;
        let holds = match column.column_type {
            ColumnType::Number => {
                let cell = column.number_at(row)?;
                let literal: f64 = self
                    .value
                    .parse()
                    .map_err(|_| DbError::InvalidNumericLiteral(self.value.clone()))?;
                match cell.partial_cmp(&literal) {
                    Some(ord) => self.op.holds(ord),
                    // NaN on either side: only `!=` is true.
                    None => self.op == CompareOp::Ne,
                }
            }
            ColumnType::Text => self.op.holds(column.data[row].as_str().cmp(self.value.as_str())),
        };
        Ok(holds)
    }

    /// Row indices of the whole table for which the condition holds.
    pub fn matching_rows(&self, table: &Table) -> Result<Vec<usize>, DbError> {
        let mut rows = Vec::new();
        for row in 0..table.row_count() {
            if self.matches(table, row)? {
                rows.push(row);
            }
        }
        Ok(rows)
    }
}

/// Connective between two adjacent conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

/// A flat WHERE clause: conditions joined strictly left-to-right.
///
/// There is no operator precedence and no expression tree;
/// `a AND b OR c AND d` evaluates as `(((a AND b) OR c) AND d)`. This
/// left-associative fold is a documented contract of the query language, not
/// an implementation accident.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    conditions: Vec<Condition>,
    connectives: Vec<Connective>,
}

impl WhereClause {
    /// Consumes `<cond> [AND|OR <cond> ...]` from the token stream.
    ///
    /// Parsing stops at end-of-line or at the first token that is neither
    /// `AND` nor `OR` (case-insensitive); that token is left unconsumed for
    /// the caller, which may hand it to the ORDER_BY parser.
    pub fn parse(tokens: &mut Tokens, table: &Table) -> Result<Self, DbError> {
        let mut conditions = vec![Condition::parse(tokens, table)?];
        let mut connectives = Vec::new();

        while let Some(word) = tokens.peek() {
            let connective = if word.eq_ignore_ascii_case("AND") {
                Connective::And
            } else if word.eq_ignore_ascii_case("OR") {
                Connective::Or
            } else {
                break;
            };
            tokens.next();
            connectives.push(connective);
            conditions.push(Condition::parse(tokens, table)?);
        }

        Ok(Self {
            conditions,
            connectives,
        })
    }

    /// Builds a clause directly, mainly for tests and programmatic callers.
    /// `connectives` must be one shorter than `conditions`.
    pub fn new(conditions: Vec<Condition>, connectives: Vec<Connective>) -> Self {
        Self {
            conditions,
            connectives,
        }
    }

    /// Folds the clause over one row: the first condition seeds the running
    /// result, each `(connective, condition)` pair combines into it.
    pub fn evaluate(&self, table: &Table, row: usize) -> Result<bool, DbError> {
        let mut include = self.conditions[0].matches(table, row)?;
        for (connective, condition) in self.connectives.iter().zip(&self.conditions[1..]) {
            let next = condition.matches(table, row)?;
            include = match connective {
                Connective::And => include && next,
                Connective::Or => include || next,
            };
        }
        Ok(include)
    }

    /// Filters a row-index set, preserving its order.
    pub fn apply(&self, table: &Table, rows: &[usize]) -> Result<Vec<usize>, DbError> {
        let mut kept = Vec::new();
        for &row in rows {
            if self.evaluate(table, row)? {
                kept.push(row);
            }
        }
        Ok(kept)
    }
}
