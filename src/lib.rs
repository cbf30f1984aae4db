// fieldcheck - declarative field validation
//
// Validates records against per-field rule lists and reports every failure
// as an ordered list of messages per field.

// Re-export core functionality
pub use fieldcheck_validation::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use fieldcheck_config;

/// Prelude for common imports.
///
/// ```
/// use fieldcheck::prelude::*;
///
/// let rules = RuleMap::new().field(FieldRules::for_field("name").add(required()));
/// assert!(!validate(&Record::new(), &rules).is_valid());
/// ```
pub mod prelude {
    pub use fieldcheck_validation::{
        FieldRules, Record, Report, Rule, RuleEntry, RuleMap, Scalar, Validator, boolean, date,
        email, max_length, max_value, min_length, min_value, numeric, pattern, phone, required,
        same_as, url, validate,
    };

    #[cfg(feature = "config")]
    pub use fieldcheck_config::{RuleSet, Settings, load_record, parse_token, parse_tokens};
}
