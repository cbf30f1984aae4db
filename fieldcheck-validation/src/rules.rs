// Rule lists and rule maps

use crate::{Record, Report, Rule, Scalar, engine};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Adapter turning a closure into a [`Rule`].
struct FnRule<F> {
    name: &'static str,
    check: F,
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&Scalar, &Record) -> Option<String> + Send + Sync,
{
    fn check(&self, value: &Scalar, record: &Record) -> Option<String> {
        (self.check)(value, record)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// A constructed rule.
///
/// Validators are built once and reused; cloning only bumps a reference
/// count, and the captured parameters are never mutated after construction.
#[derive(Clone)]
pub struct Validator {
    rule: Arc<dyn Rule>,
}

impl Validator {
    /// Wrap a rule implementation
    pub fn new(rule: impl Rule + 'static) -> Self {
        Self {
            rule: Arc::new(rule),
        }
    }

    /// Create a custom validator from a closure
    pub fn from_fn<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(&Scalar, &Record) -> Option<String> + Send + Sync + 'static,
    {
        Self::new(FnRule { name, check })
    }

    pub fn name(&self) -> &'static str {
        self.rule.name()
    }

    /// Run the rule against a value and the full record
    pub fn check(&self, value: &Scalar, record: &Record) -> Option<String> {
        self.rule.check(value, record)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").field(&self.name()).finish()
    }
}

/// One entry of a field's rule list.
#[derive(Clone, Debug)]
pub enum RuleEntry {
    Rule(Validator),
    /// A declaration that could not be turned into a validator.
    ///
    /// Kept so the list length matches the declaration; contributes an
    /// empty placeholder message when validated.
    Malformed(String),
}

impl RuleEntry {
    pub fn is_malformed(&self) -> bool {
        matches!(self, RuleEntry::Malformed(_))
    }
}

impl From<Validator> for RuleEntry {
    fn from(validator: Validator) -> Self {
        RuleEntry::Rule(validator)
    }
}

/// Ordered rules attached to one field.
pub type RuleList = Vec<RuleEntry>;

/// Builder for the rules of a single field
#[derive(Clone, Debug)]
pub struct FieldRules {
    field: String,
    rules: RuleList,
}

impl FieldRules {
    /// Create new validation rules for a field
    pub fn for_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, rule: impl Into<RuleEntry>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Append a custom closure rule
    pub fn add_fn<F>(self, name: &'static str, check: F) -> Self
    where
        F: Fn(&Scalar, &Record) -> Option<String> + Send + Sync + 'static,
    {
        self.add(Validator::from_fn(name, check))
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn rules(&self) -> &[RuleEntry] {
        &self.rules
    }

    /// Run this field's rules against a record, returning its messages
    pub fn validate(&self, record: &Record) -> Vec<String> {
        engine::check_field(&self.field, &self.rules, record)
    }
}

/// Field name to ordered rule list, in declaration order.
///
/// The key set decides exactly which fields appear in a [`Report`].
#[derive(Clone, Debug, Default)]
pub struct RuleMap {
    fields: IndexMap<String, RuleList>,
}

impl RuleMap {
    /// Create an empty rule map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rules for a field (builder style).
    ///
    /// Declaring the same field again replaces its rules but keeps its
    /// original position.
    pub fn field(mut self, rules: FieldRules) -> Self {
        self.insert(rules.field, rules.rules);
        self
    }

    /// Set the rule list for a field
    pub fn insert(&mut self, field: impl Into<String>, rules: RuleList) {
        self.fields.insert(field.into(), rules);
    }

    pub fn get(&self, field: &str) -> Option<&[RuleEntry]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Declared field names, in order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RuleEntry])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Validate a record against every declared field
    pub fn validate(&self, record: &Record) -> Report {
        engine::validate(record, self)
    }
}

impl<K: Into<String>> FromIterator<(K, RuleList)> for RuleMap {
    fn from_iter<I: IntoIterator<Item = (K, RuleList)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
