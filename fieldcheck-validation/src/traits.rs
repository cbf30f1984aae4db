// Validation traits

use crate::{Record, Scalar};

/// A single composable rule check.
///
/// Implementations must be pure: the result depends only on `value`,
/// `record`, and parameters captured at construction time. `None` means the
/// rule is satisfied or does not apply; `Some(message)` is the exact message
/// to surface for the field.
pub trait Rule: Send + Sync {
    /// Check a field value against the rule
    fn check(&self, value: &Scalar, record: &Record) -> Option<String>;

    /// Get the rule name
    fn name(&self) -> &'static str;
}
