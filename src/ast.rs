//! The filter expression tree.
//!
//! A query is a [`Group`] of rules joined by AND or OR. Each child is a
//! [`QueryNode`]: either a leaf [`Rule`] comparing one field against one
//! operator and value, or a nested [`Group`] to arbitrary depth. The tree is
//! a pure value; the translators read it and never mutate it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::operator::Operator;

/// How the children of a group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl Condition {
    /// The keyword used to join clauses in the relational text form.
    pub fn keyword(self) -> &'static str {
        match self {
            Condition::And => "AND",
            Condition::Or => "OR",
        }
    }

    /// The top-level combinator key in the document form.
    pub fn mongo_symbol(self) -> &'static str {
        match self {
            Condition::And => "$and",
            Condition::Or => "$or",
        }
    }
}

/// A single comparison value.
///
/// Dates are carried as strings; only the editing widget interprets them,
/// via the `date` value type on a filter definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Raw text of the scalar as interpolated into pattern templates
    /// (`LIKE '%...%'`, `$regex`). No quoting is applied.
    pub fn text(&self) -> String {
        match self {
            Scalar::Null => "null".to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::String(s) => s.clone(),
        }
    }
}

impl From<&Scalar> for serde_json::Value {
    fn from(value: &Scalar) -> Self {
        match value {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Bool(b) => serde_json::Value::from(*b),
            Scalar::Int(n) => serde_json::Value::from(*n),
            Scalar::Float(f) => serde_json::Value::from(*f),
            Scalar::String(s) => serde_json::Value::from(s.as_str()),
        }
    }
}

/// The value slot of a rule.
///
/// BETWEEN/NOT BETWEEN expect a two-element list (the `[from, to]` pair),
/// IN/NOT IN a list of any length, IS EMPTY/IS NOT EMPTY ignore the slot.
/// A shape that does not match the operator's arity is a caller bug; the
/// encoders degrade to an empty clause rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl Default for RuleValue {
    fn default() -> Self {
        RuleValue::Scalar(Scalar::Null)
    }
}

impl RuleValue {
    /// The `[from, to]` pair of a range value, if the shape matches.
    pub fn as_pair(&self) -> Option<(&Scalar, &Scalar)> {
        match self {
            RuleValue::List(items) if items.len() == 2 => Some((&items[0], &items[1])),
            _ => None,
        }
    }

    /// View the value as a list; a scalar becomes a single-element list.
    pub fn as_list(&self) -> Vec<&Scalar> {
        match self {
            RuleValue::Scalar(s) => vec![s],
            RuleValue::List(items) => items.iter().collect(),
        }
    }

    /// Pattern text for the containment templates. A list degrades to its
    /// comma-joined element texts.
    pub fn text(&self) -> String {
        match self {
            RuleValue::Scalar(s) => s.text(),
            RuleValue::List(items) => items
                .iter()
                .map(Scalar::text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// A leaf condition: one field, one operator, one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Opaque identity for stable list rendering in the editing widget.
    /// Plays no role in translation.
    pub id: Uuid,
    pub field: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: RuleValue,
}

impl Rule {
    pub fn new(field: impl Into<String>, operator: Operator, value: RuleValue) -> Self {
        Self {
            id: Uuid::new_v4(),
            field: field.into(),
            operator,
            value,
        }
    }
}

/// An internal node combining child rules and groups under one condition.
/// Child order determines left-to-right placement in the generated text and
/// array order in the generated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub condition: Condition,
    pub rules: Vec<QueryNode>,
}

impl Default for Group {
    /// The empty tree an editing session starts from.
    fn default() -> Self {
        Self {
            condition: Condition::And,
            rules: Vec::new(),
        }
    }
}

/// A node of the filter tree, discriminated by an explicit `kind` tag so
/// every traversal matches exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QueryNode {
    Rule(Rule),
    Group(Group),
}
