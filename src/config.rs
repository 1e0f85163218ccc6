//! Filter definitions, loaded from a JSON config file.
//!
//! A definition describes one filterable field for the editing widget: its
//! label, the semantic kind of its values, and optionally which operators it
//! offers. The translators never consult any of this; it is carried so a
//! caller can hand the catalogue to the widget alongside the tree.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::ast::Condition;
use crate::operator::Operator;

/// Filter catalogue loading error.
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "config error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

/// Semantic kind of a field's values. Drives the widget's choice of input
/// control; irrelevant to translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValueType {
    Text,
    Number,
    Integer,
    Date,
    Boolean,
}

/// One filterable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDefinition {
    pub field: String,
    pub label: String,
    #[serde(rename = "type")]
    pub value_type: FilterValueType,
    /// Operators offered for this field; `None` means the full registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operators: Option<Vec<Operator>>,
    /// How many rules on this field one tree may carry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_occurrences: Option<u32>,
}

/// The ordered filter catalogue plus editing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSetConfig {
    pub filters: Vec<FilterDefinition>,
    #[serde(default = "default_condition")]
    pub default_condition: Condition,
}

fn default_condition() -> Condition {
    Condition::And
}

impl FilterSetConfig {
    /// Load the catalogue from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(ConfigError::new(format!(
                "config file not found: {}",
                path_ref.display()
            )));
        }

        let content = fs::read_to_string(path_ref).map_err(|e| {
            ConfigError::new(format!(
                "cannot read config file {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            ConfigError::new(format!(
                "cannot parse config file {}: {}",
                path_ref.display(),
                e
            ))
        })
    }

    /// Look up the definition for a field.
    pub fn definition(&self, field: &str) -> Option<&FilterDefinition> {
        self.filters.iter().find(|def| def.field == field)
    }

    /// Operators offered for a field, falling back to the full registry when
    /// the definition lists none or the field is unknown.
    pub fn operators_for(&self, field: &str) -> Vec<Operator> {
        self.definition(field)
            .and_then(|def| def.operators.clone())
            .unwrap_or_else(|| Operator::ALL.to_vec())
    }
}

impl Default for FilterSetConfig {
    /// A small built-in catalogue for demos and fallback.
    fn default() -> Self {
        Self {
            filters: vec![
                FilterDefinition {
                    field: "name".to_string(),
                    label: "Name".to_string(),
                    value_type: FilterValueType::Text,
                    operators: None,
                    max_occurrences: None,
                },
                FilterDefinition {
                    field: "age".to_string(),
                    label: "Age".to_string(),
                    value_type: FilterValueType::Integer,
                    operators: Some(vec![
                        Operator::Equal,
                        Operator::Greater,
                        Operator::GreaterOrEqual,
                        Operator::Less,
                        Operator::LessOrEqual,
                        Operator::Between,
                    ]),
                    max_occurrences: None,
                },
                FilterDefinition {
                    field: "created_at".to_string(),
                    label: "Created".to_string(),
                    value_type: FilterValueType::Date,
                    operators: None,
                    max_occurrences: Some(1),
                },
            ],
            default_condition: Condition::And,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_json_config() {
        let temp_file = "test_filters.json";
        let mut file = fs::File::create(temp_file).unwrap();
        writeln!(
            file,
            r#"{{
                "filters": [
                    {{"field": "name", "label": "Name", "type": "text"}},
                    {{"field": "age", "label": "Age", "type": "integer",
                      "operators": ["equal", "between"]}}
                ],
                "default_condition": "OR"
            }}"#
        )
        .unwrap();

        let config = FilterSetConfig::from_json_file(temp_file).unwrap();
        assert_eq!(config.filters.len(), 2);
        assert_eq!(config.default_condition, Condition::Or);
        assert_eq!(
            config.definition("age").unwrap().value_type,
            FilterValueType::Integer
        );
        assert_eq!(
            config.operators_for("age"),
            vec![Operator::Equal, Operator::Between]
        );
        // Unlisted fields fall back to the full registry.
        assert_eq!(config.operators_for("name").len(), 18);
        assert_eq!(config.operators_for("unknown").len(), 18);

        fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_invalid_json_config() {
        let temp_file = "test_invalid_filters.json";
        let mut file = fs::File::create(temp_file).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = FilterSetConfig::from_json_file(temp_file);
        assert!(result.is_err());

        fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_missing_file() {
        let result = FilterSetConfig::from_json_file("no_such_filters.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_catalogue() {
        let config = FilterSetConfig::default();
        assert!(config.definition("name").is_some());
        assert_eq!(config.default_condition, Condition::And);
        assert!(config
            .operators_for("age")
            .contains(&Operator::Between));
    }
}
