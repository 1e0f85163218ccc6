//! Best-effort parser that recovers a filter tree from WHERE-clause text.
//!
//! This is the reverse path for strings shaped like this crate's own text
//! output; arbitrary third-party SQL is not supported. Known limitations,
//! kept deliberately because downstream callers depend on them:
//!
//! - Only a flat, single-level group is recovered. Rule boundaries come from
//!   splitting the whole string on the literal separators `" AND "` and
//!   `" OR "` with no parenthesis-depth tracking, so nested groups and
//!   parenthesization are not reconstructed, and a `BETWEEN ... AND ...`
//!   clause is split apart.
//! - The condition is inferred globally: any `" AND "` in the string makes
//!   the whole group AND, else OR. Input mixing both keywords decodes
//!   incorrectly.
//! - Only single-word relational tokens are recognized; `NOT LIKE` and
//!   `IS NULL` clauses fail because the second whitespace token (`NOT`,
//!   `IS`) is looked up alone.
//!
//! An unrecognized token is the one hard failure. Every other irregularity
//! is resolved heuristically and silently.

use std::fmt;

use uuid::Uuid;

use crate::ast::{Condition, Group, QueryNode, Rule, RuleValue, Scalar};
use crate::operator::Operator;

/// Decode failure for WHERE-clause text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    fn new(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Decode WHERE-clause text into a flat filter group.
pub fn from_sql(sql: &str) -> Result<Group, ParseError> {
    let condition = if sql.contains(" AND ") {
        Condition::And
    } else {
        Condition::Or
    };

    let mut rules = Vec::new();
    for segment in split_segments(sql) {
        rules.push(QueryNode::Rule(parse_segment(segment)?));
    }

    Ok(Group { condition, rules })
}

/// Split on the earliest occurrence of either separator, repeatedly.
fn split_segments(sql: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = sql;
    loop {
        let next = match (rest.find(" AND "), rest.find(" OR ")) {
            (Some(a), Some(o)) if a <= o => Some((a, " AND ".len())),
            (Some(a), None) => Some((a, " AND ".len())),
            (_, Some(o)) => Some((o, " OR ".len())),
            (None, None) => None,
        };
        match next {
            Some((pos, len)) => {
                segments.push(&rest[..pos]);
                rest = &rest[pos + len..];
            }
            None => {
                segments.push(rest);
                break;
            }
        }
    }
    segments
}

/// `<field> <token> <rest...>`, with the rest re-joined as the literal.
fn parse_segment(segment: &str) -> Result<Rule, ParseError> {
    let mut tokens = segment.trim().split_whitespace();
    let field = tokens.next().unwrap_or_default();
    let token = tokens.next().unwrap_or_default();
    let literal = tokens.collect::<Vec<_>>().join(" ");

    let operator = Operator::from_sql_token(token)
        .ok_or_else(|| ParseError::new(format!("Unsupported operator: {}", token)))?;

    Ok(Rule {
        id: Uuid::new_v4(),
        field: field.to_string(),
        operator,
        value: RuleValue::Scalar(parse_literal(&literal)),
    })
}

/// Literal heuristics, in order: NULL keyword, booleans, all-digit integer,
/// single-decimal-point float, then a quote-stripped string with doubled
/// quotes undone.
fn parse_literal(text: &str) -> Scalar {
    if text == "NULL" {
        return Scalar::Null;
    }
    if text == "true" {
        return Scalar::Bool(true);
    }
    if text == "false" {
        return Scalar::Bool(false);
    }
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = text.parse::<i64>() {
            return Scalar::Int(n);
        }
    }
    if is_decimal(text) {
        if let Ok(f) = text.parse::<f64>() {
            return Scalar::Float(f);
        }
    }

    let stripped = text.strip_prefix('\'').unwrap_or(text);
    let stripped = stripped.strip_suffix('\'').unwrap_or(stripped);
    Scalar::String(stripped.replace("''", "'"))
}

/// `\d*.\d+`: optional whole part, mandatory fractional part, one point.
fn is_decimal(text: &str) -> bool {
    match text.split_once('.') {
        Some((whole, frac)) => {
            whole.bytes().all(|b| b.is_ascii_digit())
                && !frac.is_empty()
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
