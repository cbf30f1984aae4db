// Validation report

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field name to ordered failure messages.
///
/// Holds exactly the fields of the [`RuleMap`](crate::RuleMap) that produced
/// it, in declaration order. A field with no violations maps to an empty
/// list. A malformed rule entry contributes an empty-string placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    fields: IndexMap<String, Vec<String>>,
}

impl Report {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, field: impl Into<String>, messages: Vec<String>) {
        self.fields.insert(field.into(), messages);
    }

    /// Messages for a field, or `None` if the field was not declared
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Messages for a field; empty for valid or undeclared fields
    pub fn messages(&self, field: &str) -> &[String] {
        self.get(field).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Fields with at least one real (non-placeholder) message
    pub fn failing_fields(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, messages)| messages.iter().any(|m| !m.is_empty()))
            .map(|(field, _)| field)
    }

    /// Whether every field passed all of its rules
    pub fn is_valid(&self) -> bool {
        self.failing_fields().next().is_none()
    }

    /// Total number of real messages across all fields
    pub fn error_count(&self) -> usize {
        self.fields
            .values()
            .flatten()
            .filter(|m| !m.is_empty())
            .count()
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "errors": self.fields,
        })
    }

    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.fields
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, messages) in self.iter() {
            for message in messages.iter().filter(|m| !m.is_empty()) {
                writeln!(f, "{}: {}", field, message)?;
            }
        }
        Ok(())
    }
}
