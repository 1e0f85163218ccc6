//! The operator registry.
//!
//! One closed set of comparison operators, with a fixed mapping from each
//! operator to its relational token and its document-query symbol. Both
//! encoders and both decoders consult these tables, so the two directions
//! stay consistent by construction. The tables are constant data; nothing
//! mutates them at runtime.

use serde::{Deserialize, Serialize};

/// The closed enumeration of comparison operators.
///
/// Declaration order is also registry iteration order: reverse lookups take
/// the first match, so `LIKE` resolves to [`Operator::Contains`] and `$gte`
/// wins over `$lte` when a predicate carries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equal,
    NotEqual,
    Contains,
    NotContains,
    BeginsWith,
    NotBeginsWith,
    EndsWith,
    NotEndsWith,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    In,
    NotIn,
    Between,
    NotBetween,
    IsEmpty,
    IsNotEmpty,
}

impl Operator {
    /// All operators in registry iteration order.
    pub const ALL: [Operator; 18] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::Contains,
        Operator::NotContains,
        Operator::BeginsWith,
        Operator::NotBeginsWith,
        Operator::EndsWith,
        Operator::NotEndsWith,
        Operator::Greater,
        Operator::GreaterOrEqual,
        Operator::Less,
        Operator::LessOrEqual,
        Operator::In,
        Operator::NotIn,
        Operator::Between,
        Operator::NotBetween,
        Operator::IsEmpty,
        Operator::IsNotEmpty,
    ];

    /// The relational-syntax token, e.g. `=`, `LIKE`, `BETWEEN`.
    ///
    /// The containment family shares `LIKE`/`NOT LIKE`; the three positive
    /// forms differ only in how the literal is wrapped by the text encoder.
    pub fn sql_token(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::Contains => "LIKE",
            Operator::NotContains => "NOT LIKE",
            Operator::BeginsWith => "LIKE",
            Operator::NotBeginsWith => "NOT LIKE",
            Operator::EndsWith => "LIKE",
            Operator::NotEndsWith => "NOT LIKE",
            Operator::Greater => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT BETWEEN",
            Operator::IsEmpty => "IS NULL",
            Operator::IsNotEmpty => "IS NOT NULL",
        }
    }

    /// The document-query operator symbol, e.g. `$eq`, `$regex`, `$in`.
    ///
    /// The range operators have no single-symbol form; the document encoder
    /// lowers them to bound conjunctions instead. Their entries here exist
    /// for the reverse lookup table only.
    pub fn mongo_symbol(self) -> &'static str {
        match self {
            Operator::Equal => "$eq",
            Operator::NotEqual => "$ne",
            Operator::Contains => "$regex",
            Operator::NotContains => "$not",
            Operator::BeginsWith => "$regex",
            Operator::NotBeginsWith => "$not",
            Operator::EndsWith => "$regex",
            Operator::NotEndsWith => "$not",
            Operator::Greater => "$gt",
            Operator::GreaterOrEqual => "$gte",
            Operator::Less => "$lt",
            Operator::LessOrEqual => "$lte",
            Operator::In => "$in",
            Operator::NotIn => "$nin",
            Operator::Between => "$and",
            Operator::NotBetween => "$nor",
            Operator::IsEmpty => "$exists",
            Operator::IsNotEmpty => "$exists",
        }
    }

    /// Reverse lookup by relational token; first match in registry order.
    pub fn from_sql_token(token: &str) -> Option<Operator> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.sql_token() == token)
    }

    /// Whether the operator compares against a value at all. The emptiness
    /// checks are arity-0 by design.
    pub fn requires_value(self) -> bool {
        !matches!(self, Operator::IsEmpty | Operator::IsNotEmpty)
    }

    /// Whether the operator takes an ordered `[from, to]` pair.
    pub fn requires_pair(self) -> bool {
        matches!(self, Operator::Between | Operator::NotBetween)
    }

    /// Whether the operator takes a list of values.
    pub fn requires_list(self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }
}
