//! Best-effort parser that recovers a filter tree from a query document.
//!
//! The reverse path for documents shaped like this crate's own output, again
//! recovering only a flat, single-level group. This direction never fails:
//! entries it cannot interpret are skipped silently.
//!
//! Known gaps, kept deliberately:
//!
//! - A predicate that is not an object (a direct-equality shorthand such as
//!   `{"name": "ann"}`) is skipped.
//! - When a predicate object carries several recognized operator symbols,
//!   the first operator in registry order wins; `{"$gte": 10, "$lte": 20}`
//!   therefore decodes as a single greater-or-equal rule.

use serde_json::Value;
use uuid::Uuid;

use crate::ast::{Condition, Group, QueryNode, Rule, RuleValue, Scalar};
use crate::operator::Operator;

/// Decode a query document into a flat filter group.
pub fn from_mongo(doc: &Value) -> Group {
    let condition = if doc.get("$and").is_some() {
        Condition::And
    } else {
        Condition::Or
    };

    let mut rules = Vec::new();
    let entries = doc
        .get(condition.mongo_symbol())
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for entry in entries {
        let Some(fields) = entry.as_object() else {
            continue;
        };
        for (field, predicate) in fields {
            let Some(predicate) = predicate.as_object() else {
                continue;
            };
            let Some(operator) = Operator::ALL
                .iter()
                .copied()
                .find(|op| predicate.contains_key(op.mongo_symbol()))
            else {
                continue;
            };
            rules.push(QueryNode::Rule(Rule {
                id: Uuid::new_v4(),
                field: field.clone(),
                operator,
                value: value_from_json(&predicate[operator.mongo_symbol()]),
            }));
        }
    }

    Group { condition, rules }
}

fn value_from_json(value: &Value) -> RuleValue {
    match value {
        Value::Array(items) => RuleValue::List(items.iter().map(scalar_from_json).collect()),
        other => RuleValue::Scalar(scalar_from_json(other)),
    }
}

/// Nested objects (e.g. the `$regex` wrapper inside a `$not` predicate) have
/// no scalar form; they degrade to null on this best-effort path.
fn scalar_from_json(value: &Value) -> Scalar {
    match value {
        Value::Bool(b) => Scalar::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Scalar::Int(i),
            None => Scalar::Float(n.as_f64().unwrap_or(0.0)),
        },
        Value::String(s) => Scalar::String(s.clone()),
        Value::Null | Value::Array(_) | Value::Object(_) => Scalar::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shape(group: &Group) -> Vec<(String, Operator, RuleValue)> {
        group
            .rules
            .iter()
            .map(|node| match node {
                QueryNode::Rule(r) => (r.field.clone(), r.operator, r.value.clone()),
                QueryNode::Group(_) => panic!("expected a flat group"),
            })
            .collect()
    }

    #[test]
    fn test_decodes_and_document() {
        let doc = json!({"$and": [
            {"status": {"$eq": "open"}},
            {"priority": {"$gt": 2}},
        ]});
        let group = from_mongo(&doc);
        assert_eq!(group.condition, Condition::And);
        assert_eq!(
            shape(&group),
            vec![
                (
                    "status".to_string(),
                    Operator::Equal,
                    RuleValue::Scalar(Scalar::String("open".to_string()))
                ),
                (
                    "priority".to_string(),
                    Operator::Greater,
                    RuleValue::Scalar(Scalar::Int(2))
                ),
            ]
        );
    }

    #[test]
    fn test_or_document_and_list_values() {
        let doc = json!({"$or": [
            {"status": {"$in": ["open", "pending"]}},
        ]});
        let group = from_mongo(&doc);
        assert_eq!(group.condition, Condition::Or);
        assert_eq!(
            shape(&group),
            vec![(
                "status".to_string(),
                Operator::In,
                RuleValue::List(vec![
                    Scalar::String("open".to_string()),
                    Scalar::String("pending".to_string()),
                ])
            )]
        );
    }

    #[test]
    fn test_missing_combinator_yields_empty_or_group() {
        let group = from_mongo(&json!({}));
        assert_eq!(group.condition, Condition::Or);
        assert!(group.rules.is_empty());
    }

    #[test]
    fn test_non_object_predicate_is_skipped() {
        // Direct-equality shorthand is a documented gap.
        let doc = json!({"$and": [
            {"name": "ann"},
            {"age": {"$gte": 21}},
        ]});
        let group = from_mongo(&doc);
        assert_eq!(
            shape(&group),
            vec![(
                "age".to_string(),
                Operator::GreaterOrEqual,
                RuleValue::Scalar(Scalar::Int(21))
            )]
        );
    }

    #[test]
    fn test_unrecognized_symbols_are_skipped_silently() {
        let doc = json!({"$and": [
            {"x": {"$mod": [4, 0]}},
        ]});
        let group = from_mongo(&doc);
        assert!(group.rules.is_empty());
    }

    #[test]
    fn test_ambiguous_predicate_takes_first_registry_match() {
        // A range predicate carries both bounds; $gte comes first in
        // registry order, so the pair collapses to one rule.
        let doc = json!({"$and": [
            {"age": {"$gte": 10, "$lte": 20}},
        ]});
        let group = from_mongo(&doc);
        assert_eq!(
            shape(&group),
            vec![(
                "age".to_string(),
                Operator::GreaterOrEqual,
                RuleValue::Scalar(Scalar::Int(10))
            )]
        );
    }

    #[test]
    fn test_exists_decodes_as_is_empty_with_flag_value() {
        let doc = json!({"$and": [
            {"x": {"$exists": false}},
        ]});
        let group = from_mongo(&doc);
        assert_eq!(
            shape(&group),
            vec![(
                "x".to_string(),
                Operator::IsEmpty,
                RuleValue::Scalar(Scalar::Bool(false))
            )]
        );
    }

    #[test]
    fn test_not_predicate_value_degrades_to_null() {
        let doc = json!({"$and": [
            {"name": {"$not": {"$regex": "an", "$options": "i"}}},
        ]});
        let group = from_mongo(&doc);
        assert_eq!(
            shape(&group),
            vec![(
                "name".to_string(),
                Operator::NotContains,
                RuleValue::Scalar(Scalar::Null)
            )]
        );
    }

    #[test]
    fn test_fresh_ids_per_decoded_rule() {
        let doc = json!({"$and": [
            {"a": {"$eq": 1}},
            {"b": {"$eq": 2}},
        ]});
        let group = from_mongo(&doc);
        let ids: Vec<_> = group
            .rules
            .iter()
            .map(|node| match node {
                QueryNode::Rule(r) => r.id,
                QueryNode::Group(_) => panic!("expected a flat group"),
            })
            .collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_round_trip_through_encoder() {
        use crate::mongo_compiler::to_mongo;

        let group = Group {
            condition: Condition::And,
            rules: vec![
                QueryNode::Rule(Rule::new(
                    "status",
                    Operator::Equal,
                    RuleValue::Scalar(Scalar::String("open".to_string())),
                )),
                QueryNode::Rule(Rule::new(
                    "tags",
                    Operator::NotIn,
                    RuleValue::List(vec![
                        Scalar::String("wip".to_string()),
                        Scalar::String("draft".to_string()),
                    ]),
                )),
            ],
        };
        let decoded = from_mongo(&to_mongo(&group));
        assert_eq!(decoded.condition, group.condition);
        assert_eq!(shape(&decoded), shape(&group));
    }
}
