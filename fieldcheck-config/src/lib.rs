//! Rule-set files and settings for fieldcheck
//!
//! Loads rule files written as token lists, translates the tokens into
//! validators and reads runtime settings from the environment.
//!
//! ```
//! use fieldcheck_config::RuleSet;
//! use fieldcheck_validation::Record;
//!
//! let rules = RuleSet::parse(r#"{
//!     "fields": {
//!         "age": ["numeric", "min_num:18", "max_num:100"],
//!         "email": ["required", "email"]
//!     }
//! }"#).unwrap();
//!
//! let record = Record::from_json_str(r#"{"age": "150"}"#).unwrap();
//! let report = rules.to_rule_map().validate(&record);
//!
//! assert_eq!(report.messages("age"), ["Maximum value is 100"]);
//! assert_eq!(report.messages("email"), ["This field is required"]);
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod ruleset;
pub mod settings;
pub mod tokens;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat, load_record};
pub use ruleset::RuleSet;
pub use settings::{ENV_PREFIX, OutputFormat, Settings};
pub use tokens::{TokenError, parse_token, parse_tokens, try_parse_token};
