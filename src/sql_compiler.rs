//! Renders a filter tree as a relational WHERE-clause string.
//!
//! Depth-first, left-to-right: each rule becomes `<field> <token> <literal>`
//! using the operator's relational token, nested groups are encoded
//! recursively and wrapped in parentheses, and siblings are joined with the
//! group's AND/OR keyword. No parentheses are added beyond the explicit
//! nested-group wrapping.
//!
//! The output is plain text meant to follow a `WHERE` keyword. It is not
//! parameterized; the only escaping is quote-doubling inside string literals.

use crate::ast::{Group, QueryNode, Rule, RuleValue, Scalar};
use crate::operator::Operator;

/// Encode a filter tree to WHERE-clause text.
pub fn to_sql(group: &Group) -> String {
    let separator = format!(" {} ", group.condition.keyword());
    group
        .rules
        .iter()
        .map(|node| match node {
            QueryNode::Group(inner) => format!("({})", to_sql(inner)),
            QueryNode::Rule(rule) => rule_to_sql(rule),
        })
        .collect::<Vec<_>>()
        .join(&separator)
}

fn rule_to_sql(rule: &Rule) -> String {
    let token = rule.operator.sql_token();

    match rule.operator {
        Operator::Contains | Operator::NotContains => {
            format!("{} {} '%{}%'", rule.field, token, rule.value.text())
        }
        Operator::BeginsWith | Operator::NotBeginsWith => {
            format!("{} {} '{}%'", rule.field, token, rule.value.text())
        }
        Operator::EndsWith | Operator::NotEndsWith => {
            format!("{} {} '%{}'", rule.field, token, rule.value.text())
        }
        Operator::In | Operator::NotIn => {
            let items = rule
                .value
                .as_list()
                .into_iter()
                .map(escape_literal)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} {} ({})", rule.field, token, items)
        }
        Operator::Between | Operator::NotBetween => match rule.value.as_pair() {
            Some((from, to)) => format!(
                "{} {} {} AND {}",
                rule.field,
                token,
                escape_literal(from),
                escape_literal(to)
            ),
            // Malformed range pair: drop the clause instead of failing.
            None => String::new(),
        },
        Operator::IsEmpty | Operator::IsNotEmpty => format!("{} {}", rule.field, token),
        Operator::Equal
        | Operator::NotEqual
        | Operator::Greater
        | Operator::GreaterOrEqual
        | Operator::Less
        | Operator::LessOrEqual => {
            format!("{} {} {}", rule.field, token, escape_value(rule))
        }
    }
}

fn escape_value(rule: &Rule) -> String {
    match &rule.value {
        RuleValue::Scalar(s) => escape_literal(s),
        // A list where a scalar belongs; render its joined text as one
        // string literal.
        list @ RuleValue::List(_) => escape_literal(&Scalar::String(list.text())),
    }
}

/// Escape one scalar as a SQL literal. Null stays the bare keyword, numbers
/// and booleans stay unquoted so the text decoder's heuristics recover them,
/// everything else is single-quoted with embedded quotes doubled.
fn escape_literal(value: &Scalar) -> String {
    match value {
        Scalar::Null => "NULL".to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::String(s) => format!("'{}'", s.replace('\'', "''")),
    }
}
