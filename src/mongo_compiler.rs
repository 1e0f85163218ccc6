//! Renders a filter tree as a MongoDB-style query document.
//!
//! Same traversal shape as the text encoder, producing a nested
//! `serde_json::Value` mapping instead of text. A group becomes
//! `{"$and": [...]}` or `{"$or": [...]}`; each rule becomes a single-key
//! mapping from its field to an operator-specific predicate.

use serde_json::{json, Map, Value};

use crate::ast::{Group, QueryNode, Rule, RuleValue};
use crate::operator::Operator;

/// Encode a filter tree to a query document.
pub fn to_mongo(group: &Group) -> Value {
    let children: Vec<Value> = group
        .rules
        .iter()
        .map(|node| match node {
            QueryNode::Group(inner) => to_mongo(inner),
            QueryNode::Rule(rule) => rule_to_mongo(rule),
        })
        .collect();

    let mut doc = Map::new();
    doc.insert(
        group.condition.mongo_symbol().to_string(),
        Value::Array(children),
    );
    Value::Object(doc)
}

fn rule_to_mongo(rule: &Rule) -> Value {
    match rule.operator {
        Operator::Contains => regex_predicate(rule, rule.value.text(), false),
        Operator::NotContains => regex_predicate(rule, rule.value.text(), true),
        Operator::BeginsWith => {
            regex_predicate(rule, format!("^{}", rule.value.text()), false)
        }
        Operator::NotBeginsWith => {
            regex_predicate(rule, format!("^{}", rule.value.text()), true)
        }
        Operator::EndsWith => regex_predicate(rule, format!("{}$", rule.value.text()), false),
        Operator::NotEndsWith => {
            regex_predicate(rule, format!("{}$", rule.value.text()), true)
        }
        Operator::In | Operator::NotIn => {
            let items: Vec<Value> = rule.value.as_list().into_iter().map(Value::from).collect();
            field_doc(
                &rule.field,
                symbol_predicate(rule.operator, Value::Array(items)),
            )
        }
        Operator::Between => match rule.value.as_pair() {
            Some((from, to)) => field_doc(
                &rule.field,
                json!({ "$gte": Value::from(from), "$lte": Value::from(to) }),
            ),
            // Malformed range pair: empty document instead of failing.
            None => json!({}),
        },
        // The two bounds are disjoint conditions on the same field, so the
        // predicate is hoisted to a top-level $or rather than nested under
        // the field key.
        Operator::NotBetween => match rule.value.as_pair() {
            Some((from, to)) => json!({
                "$or": [
                    field_doc(&rule.field, json!({ "$lt": Value::from(from) })),
                    field_doc(&rule.field, json!({ "$gt": Value::from(to) })),
                ]
            }),
            None => json!({}),
        },
        Operator::IsEmpty => field_doc(&rule.field, json!({ "$exists": false })),
        Operator::IsNotEmpty => field_doc(&rule.field, json!({ "$exists": true })),
        Operator::Equal
        | Operator::NotEqual
        | Operator::Greater
        | Operator::GreaterOrEqual
        | Operator::Less
        | Operator::LessOrEqual => field_doc(
            &rule.field,
            symbol_predicate(rule.operator, rule_value_json(rule)),
        ),
    }
}

/// `{field: predicate}`
fn field_doc(field: &str, predicate: Value) -> Value {
    let mut doc = Map::new();
    doc.insert(field.to_string(), predicate);
    Value::Object(doc)
}

/// `{symbol: value}` using the operator's registry symbol.
fn symbol_predicate(operator: Operator, value: Value) -> Value {
    let mut doc = Map::new();
    doc.insert(operator.mongo_symbol().to_string(), value);
    Value::Object(doc)
}

/// Case-insensitive pattern predicate. The negated forms have no distinct
/// negated pattern syntax; they wrap the positive predicate under their own
/// registry symbol, `$not`.
fn regex_predicate(rule: &Rule, pattern: String, negated: bool) -> Value {
    let positive = json!({ "$regex": pattern, "$options": "i" });
    let predicate = if negated {
        symbol_predicate(rule.operator, positive)
    } else {
        positive
    };
    field_doc(&rule.field, predicate)
}

fn rule_value_json(rule: &Rule) -> Value {
    match &rule.value {
        RuleValue::Scalar(s) => Value::from(s),
        RuleValue::List(items) => Value::Array(items.iter().map(Value::from).collect()),
    }
}
