// Rule files: field names mapped to token lists

use crate::loader::ConfigLoader;
use crate::tokens::parse_token;
use crate::{ConfigError, Result};
use fieldcheck_validation::{RuleEntry, RuleList, RuleMap};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

/// A rule file as loaded, before token translation.
///
/// Accepts either `{ "fields": { "name": ["required"] } }` or the bare
/// field map `{ "name": ["required"] }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    fields: IndexMap<String, Vec<Value>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a rule set from a JSON or TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let value = ConfigLoader::auto(path)?.load_file(path)?;
        Self::from_value(value)
    }

    /// Parse a JSON rule set from a string
    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut root) = value else {
            return Err(ConfigError::InvalidRuleSet(
                "expected an object of fields".to_string(),
            ));
        };

        // a bare map may itself declare a field named "fields"
        let wrapped = root.len() == 1 && matches!(root.get("fields"), Some(Value::Object(_)));
        let object = if wrapped {
            match root.remove("fields") {
                Some(Value::Object(fields)) => fields,
                _ => Map::new(),
            }
        } else {
            root
        };

        let mut fields = IndexMap::with_capacity(object.len());
        for (field, rules) in object {
            match rules {
                Value::Array(tokens) => {
                    fields.insert(field, tokens);
                }
                other => {
                    return Err(ConfigError::InvalidRuleSet(format!(
                        "rules for '{}' must be an array, got {}",
                        field,
                        kind(&other)
                    )));
                }
            }
        }

        debug!(fields = fields.len(), "loaded rule set");
        Ok(Self { fields })
    }

    /// Add a field with its tokens
    pub fn with_field<I, S>(mut self, field: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = tokens.into_iter().map(|t| Value::String(t.into())).collect();
        self.fields.insert(field.into(), tokens);
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Raw entries for a field
    pub fn tokens(&self, field: &str) -> &[Value] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.fields
            .iter()
            .map(|(field, tokens)| (field.as_str(), tokens.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Translate every token into a rule map, in file order.
    ///
    /// Entries that are not strings become malformed placeholders.
    pub fn to_rule_map(&self) -> RuleMap {
        self.fields
            .iter()
            .map(|(field, tokens)| (field.clone(), translate(field, tokens)))
            .collect()
    }
}

fn translate(field: &str, tokens: &[Value]) -> RuleList {
    tokens
        .iter()
        .map(|token| match token {
            Value::String(token) => parse_token(token),
            other => {
                warn!(field, entry = %other, "rule entry is not a token");
                RuleEntry::Malformed(other.to_string())
            }
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_validation::Record;
    use serde_json::json;

    #[test]
    fn test_from_value_wrapped() {
        let rules = RuleSet::from_value(json!({
            "fields": {
                "name": ["required", "min:3"],
                "email": ["email"],
            }
        }))
        .unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.fields().collect::<Vec<_>>(), ["name", "email"]);
        assert_eq!(rules.tokens("name"), [json!("required"), json!("min:3")]);
        assert!(rules.tokens("missing").is_empty());
    }

    #[test]
    fn test_from_value_bare() {
        let rules = RuleSet::from_value(json!({
            "zip": ["required"],
            "fields": ["max:10"],
        }))
        .unwrap();

        assert_eq!(rules.fields().collect::<Vec<_>>(), ["zip", "fields"]);

        let rules = RuleSet::from_value(json!({
            "fields": ["max:10"],
            "zip": ["required"],
            "city": ["min:2"],
        }))
        .unwrap();
        assert_eq!(rules.fields().collect::<Vec<_>>(), ["fields", "zip", "city"]);
    }

    #[test]
    fn test_from_value_bare_single_fields_entry() {
        let rules = RuleSet::from_value(json!({"fields": ["required"]})).unwrap();

        assert_eq!(rules.fields().collect::<Vec<_>>(), ["fields"]);
        assert_eq!(rules.tokens("fields"), [json!("required")]);

        let report = rules.to_rule_map().validate(&Record::new());
        assert_eq!(report.messages("fields"), ["This field is required"]);
    }

    #[test]
    fn test_invalid_rule_sets() {
        assert!(matches!(
            RuleSet::from_value(json!(["required"])),
            Err(ConfigError::InvalidRuleSet(_))
        ));
        assert!(matches!(
            RuleSet::from_value(json!({"name": "required"})),
            Err(ConfigError::InvalidRuleSet(_))
        ));
        assert!(matches!(
            RuleSet::from_value(json!({"fields": "name"})),
            Err(ConfigError::InvalidRuleSet(message)) if message.contains("'fields'")
        ));
        assert!(matches!(
            RuleSet::parse("{"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_to_rule_map() {
        let rules = RuleSet::parse(r#"{"age": ["numeric", 42, "min_num:18", "nope"]}"#).unwrap();
        let rule_map = rules.to_rule_map();

        let entries = rule_map.get("age").unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries[1].is_malformed());
        assert!(entries[3].is_malformed());

        let report = rule_map.validate(&Record::new().with("age", "12"));
        assert_eq!(report.messages("age"), ["", "Minimum value is 18", ""]);
    }

    #[test]
    fn test_with_field() {
        let rule_map = RuleSet::new()
            .with_field("password", ["required", "min:8"])
            .with_field("confirm", ["same:password"])
            .to_rule_map();

        let record = Record::new().with("password", "abcdefgh").with("confirm", "abcdefgi");
        let report = rule_map.validate(&record);
        assert!(report.messages("password").is_empty());
        assert_eq!(report.messages("confirm"), ["This value must match password"]);
    }
}
