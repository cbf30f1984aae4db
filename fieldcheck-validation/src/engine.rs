// Orchestration: rule map + record -> report

use crate::{Record, Report, RuleEntry, RuleMap};
use tracing::{debug, trace};

/// Validate a record against a rule map.
///
/// Every declared field gets an entry in the report, in declaration order,
/// whether or not the record contains it. Rules run in list order and never
/// short-circuit each other; each failing rule appends its message.
///
/// ```
/// use fieldcheck_validation::*;
///
/// let rules = RuleMap::new()
///     .field(FieldRules::for_field("age").add(numeric()).add(min_value(18)).add(max_value(100)));
/// let record = Record::new().with("age", "150");
///
/// let report = validate(&record, &rules);
/// assert_eq!(report.messages("age"), ["Maximum value is 100"]);
/// ```
pub fn validate(record: &Record, rules: &RuleMap) -> Report {
    let mut report = Report::with_capacity(rules.len());

    for (field, entries) in rules.iter() {
        report.insert(field, check_field(field, entries, record));
    }

    debug!(
        fields = report.len(),
        failing = report.failing_fields().count(),
        "validated record"
    );

    report
}

/// Run one field's rule list, collecting messages in rule order.
pub(crate) fn check_field(field: &str, entries: &[RuleEntry], record: &Record) -> Vec<String> {
    let value = record.get(field);
    let mut messages = Vec::new();

    for entry in entries {
        match entry {
            RuleEntry::Rule(validator) => {
                if let Some(message) = validator.check(value, record) {
                    trace!(field, rule = validator.name(), %message, "rule failed");
                    messages.push(message);
                }
            }
            RuleEntry::Malformed(declaration) => {
                debug!(field, %declaration, "malformed rule entry, recording placeholder");
                messages.push(String::new());
            }
        }
    }

    messages
}
