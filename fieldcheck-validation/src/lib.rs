//! Declarative field validation for fieldcheck
//!
//! Validates a record of input values against per-field rule lists and
//! produces a report of human-readable messages, preserving field and rule
//! order.
//!
//! # Examples
//!
//! ## Rule Maps
//!
//! ```
//! use fieldcheck_validation::*;
//!
//! let rules = RuleMap::new()
//!     .field(FieldRules::for_field("name").add(required()).add(min_length(3)))
//!     .field(FieldRules::for_field("email").add(required()).add(email()))
//!     .field(FieldRules::for_field("nickname").add(max_length(12)));
//!
//! let record = Record::new()
//!     .with("name", "Jo")
//!     .with("email", "jo@example.com");
//!
//! let report = rules.validate(&record);
//! assert_eq!(report.messages("name"), ["Minimum length is 3"]);
//! assert!(report.messages("email").is_empty());
//! // absent optional fields skip every rule except `required`
//! assert!(report.messages("nickname").is_empty());
//! ```
//!
//! ## Cross-Field Rules
//!
//! ```
//! use fieldcheck_validation::*;
//!
//! let rules = RuleMap::new()
//!     .field(FieldRules::for_field("confirm").add(same_as("password").message("Passwords differ")));
//!
//! let record = Record::new()
//!     .with("password", "hunter2")
//!     .with("confirm", "hunter3");
//!
//! assert_eq!(validate(&record, &rules).messages("confirm"), ["Passwords differ"]);
//! ```
//!
//! ## Custom Rules
//!
//! ```
//! use fieldcheck_validation::*;
//!
//! let even = Validator::from_fn("even", |value, _record| {
//!     let odd = normalize(value).number().is_some_and(|n| n % 2.0 != 0.0);
//!     odd.then(|| "Value must be even".to_string())
//! });
//!
//! let rules = RuleMap::new().field(FieldRules::for_field("count").add(numeric()).add(even));
//! let report = rules.validate(&Record::new().with("count", 3));
//! assert_eq!(report.messages("count"), ["Value must be even"]);
//! ```

mod engine;
mod errors;
mod report;
mod rules;
mod traits;
mod validators;
mod value;

pub use engine::*;
pub use errors::*;
pub use report::*;
pub use rules::*;
pub use traits::*;
pub use validators::*;
pub use value::*;
