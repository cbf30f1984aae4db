// Built-in validators

use crate::value::{Normalized, format_number, normalize};
use crate::{Record, Rule, RuleEntry, Scalar, Validator};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const NUMERIC_MESSAGE: &str = "Value must be a number";
pub const EMAIL_MESSAGE: &str = "Email is not valid";
pub const PATTERN_MESSAGE: &str = "Invalid Format";
/// Reported by a pattern rule whose source failed to compile
pub const INVALID_PATTERN_MESSAGE: &str = "Invalid regex pattern";
pub const DATE_MESSAGE: &str = "Date is not valid";
pub const BOOLEAN_MESSAGE: &str = "Value must be a boolean";
pub const URL_MESSAGE: &str = "Url is not valid";
pub const PHONE_MESSAGE: &str = "Phone number is not valid";

// Common regex patterns
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}))$"#).unwrap()
});

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(https?://)?([\w-]+\.)+[\w-]{2,}(/\S*)?$").unwrap());

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").unwrap());

const BOOLEAN_WORDS: [&str; 8] = ["true", "false", "1", "0", "on", "off", "yes", "no"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

fn resolve(custom: &Option<String>, default: impl FnOnce() -> String) -> String {
    custom.clone().unwrap_or_else(default)
}

/// Whether text names a valid calendar date in one of the accepted shapes
fn parses_as_date(text: &str) -> bool {
    DateTime::parse_from_rfc3339(text).is_ok()
        || DateTime::parse_from_rfc2822(text).is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|format| NaiveDate::parse_from_str(text, format).is_ok())
}

macro_rules! builtin_rules {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// Replace the default failure message
                pub fn message(mut self, message: impl Into<String>) -> Self {
                    self.message = Some(message.into());
                    self
                }
            }

            impl From<$ty> for Validator {
                fn from(rule: $ty) -> Self {
                    Validator::new(rule)
                }
            }

            impl From<$ty> for RuleEntry {
                fn from(rule: $ty) -> Self {
                    RuleEntry::Rule(Validator::new(rule))
                }
            }
        )+
    };
}

builtin_rules!(
    Required, Numeric, MinLength, MaxLength, MinValue, MaxValue, IsEmail, Matches, IsDate,
    IsBoolean, SameAs, IsUrl, IsPhone,
);

// Presence

/// Fails when the value is absent (null or blank).
///
/// The only rule that does not skip absent values.
#[derive(Debug, Clone, Default)]
pub struct Required {
    message: Option<String>,
}

pub fn required() -> Required {
    Required::default()
}

impl Rule for Required {
    fn check(&self, value: &Scalar, _record: &Record) -> Option<String> {
        normalize(value)
            .is_absent()
            .then(|| resolve(&self.message, || REQUIRED_MESSAGE.to_string()))
    }

    fn name(&self) -> &'static str {
        "required"
    }
}

// Type and length validators

/// Validates that a present value is a finite number
#[derive(Debug, Clone, Default)]
pub struct Numeric {
    message: Option<String>,
}

pub fn numeric() -> Numeric {
    Numeric::default()
}

impl Rule for Numeric {
    fn check(&self, value: &Scalar, _record: &Record) -> Option<String> {
        match normalize(value) {
            Normalized::Text(_) => Some(resolve(&self.message, || NUMERIC_MESSAGE.to_string())),
            Normalized::Absent | Normalized::Numeric { .. } => None,
        }
    }

    fn name(&self) -> &'static str {
        "numeric"
    }
}

/// Validates minimum trimmed length, in characters
#[derive(Debug, Clone)]
pub struct MinLength {
    pub min: usize,
    message: Option<String>,
}

pub fn min_length(min: usize) -> MinLength {
    MinLength { min, message: None }
}

impl Rule for MinLength {
    fn check(&self, value: &Scalar, _record: &Record) -> Option<String> {
        let normalized = normalize(value);
        let length = normalized.text()?.chars().count();
        (length < self.min)
            .then(|| resolve(&self.message, || format!("Minimum length is {}", self.min)))
    }

    fn name(&self) -> &'static str {
        "min"
    }
}

/// Validates maximum trimmed length, in characters
#[derive(Debug, Clone)]
pub struct MaxLength {
    pub max: usize,
    message: Option<String>,
}

pub fn max_length(max: usize) -> MaxLength {
    MaxLength { max, message: None }
}

impl Rule for MaxLength {
    fn check(&self, value: &Scalar, _record: &Record) -> Option<String> {
        let normalized = normalize(value);
        let length = normalized.text()?.chars().count();
        (length > self.max)
            .then(|| resolve(&self.message, || format!("Maximum length is {}", self.max)))
    }

    fn name(&self) -> &'static str {
        "max"
    }
}

// Number validators
//
// A non-numeric value always yields the numeric-type message; the custom
// message only replaces the range message.

/// Validates minimum numeric value
#[derive(Debug, Clone)]
pub struct MinValue {
    pub min: f64,
    message: Option<String>,
}

pub fn min_value(min: impl Into<f64>) -> MinValue {
    MinValue {
        min: min.into(),
        message: None,
    }
}

impl Rule for MinValue {
    fn check(&self, value: &Scalar, _record: &Record) -> Option<String> {
        let normalized = normalize(value);
        if normalized.is_absent() {
            return None;
        }
        let Some(number) = normalized.number() else {
            return Some(NUMERIC_MESSAGE.to_string());
        };
        (number < self.min).then(|| {
            resolve(&self.message, || {
                format!("Minimum value is {}", format_number(self.min))
            })
        })
    }

    fn name(&self) -> &'static str {
        "min_num"
    }
}

/// Validates maximum numeric value
#[derive(Debug, Clone)]
pub struct MaxValue {
    pub max: f64,
    message: Option<String>,
}

pub fn max_value(max: impl Into<f64>) -> MaxValue {
    MaxValue {
        max: max.into(),
        message: None,
    }
}

impl Rule for MaxValue {
    fn check(&self, value: &Scalar, _record: &Record) -> Option<String> {
        let normalized = normalize(value);
        if normalized.is_absent() {
            return None;
        }
        let Some(number) = normalized.number() else {
            return Some(NUMERIC_MESSAGE.to_string());
        };
        (number > self.max).then(|| {
            resolve(&self.message, || {
                format!("Maximum value is {}", format_number(self.max))
            })
        })
    }

    fn name(&self) -> &'static str {
        "max_num"
    }
}

// Format validators

/// Validates email address shape (no network checks)
#[derive(Debug, Clone, Default)]
pub struct IsEmail {
    message: Option<String>,
}

pub fn email() -> IsEmail {
    IsEmail::default()
}

impl Rule for IsEmail {
    fn check(&self, value: &Scalar, _record: &Record) -> Option<String> {
        let normalized = normalize(value);
        let text = normalized.text()?;
        (!EMAIL_REGEX.is_match(text)).then(|| resolve(&self.message, || EMAIL_MESSAGE.to_string()))
    }

    fn name(&self) -> &'static str {
        "email"
    }
}

/// Custom regex validator.
///
/// The pattern is compiled once at construction. A pattern that does not
/// compile turns the rule into one that always reports
/// [`INVALID_PATTERN_MESSAGE`] for present values.
#[derive(Debug, Clone)]
pub struct Matches {
    source: String,
    regex: Option<Regex>,
    message: Option<String>,
}

pub fn pattern(source: impl AsRef<str>) -> Matches {
    let source = source.as_ref();
    let regex = match Regex::new(source) {
        Ok(regex) => Some(regex),
        Err(error) => {
            warn!(pattern = source, %error, "pattern does not compile");
            None
        }
    };

    Matches {
        source: source.to_string(),
        regex,
        message: None,
    }
}

impl Matches {
    /// Use an already-compiled regex
    pub fn from_regex(regex: Regex) -> Self {
        Self {
            source: regex.as_str().to_string(),
            regex: Some(regex),
            message: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_compiled(&self) -> bool {
        self.regex.is_some()
    }
}

impl Rule for Matches {
    fn check(&self, value: &Scalar, _record: &Record) -> Option<String> {
        let normalized = normalize(value);
        let text = normalized.text()?;
        match &self.regex {
            Some(regex) => {
                (!regex.is_match(text)).then(|| resolve(&self.message, || PATTERN_MESSAGE.to_string()))
            }
            None => Some(INVALID_PATTERN_MESSAGE.to_string()),
        }
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

/// Validates that a value is a real calendar date
#[derive(Debug, Clone, Default)]
pub struct IsDate {
    message: Option<String>,
}

pub fn date() -> IsDate {
    IsDate::default()
}

impl Rule for IsDate {
    fn check(&self, value: &Scalar, _record: &Record) -> Option<String> {
        if let Scalar::Date(_) = value {
            return None;
        }
        let normalized = normalize(value);
        let text = normalized.text()?;
        (!parses_as_date(text)).then(|| resolve(&self.message, || DATE_MESSAGE.to_string()))
    }

    fn name(&self) -> &'static str {
        "date"
    }
}

/// Validates boolean-like words: true/false, 1/0, on/off, yes/no
#[derive(Debug, Clone, Default)]
pub struct IsBoolean {
    message: Option<String>,
}

pub fn boolean() -> IsBoolean {
    IsBoolean::default()
}

impl Rule for IsBoolean {
    fn check(&self, value: &Scalar, _record: &Record) -> Option<String> {
        let normalized = normalize(value);
        let text = normalized.text()?.to_lowercase();
        (!BOOLEAN_WORDS.contains(&text.as_str()))
            .then(|| resolve(&self.message, || BOOLEAN_MESSAGE.to_string()))
    }

    fn name(&self) -> &'static str {
        "bool"
    }
}

/// Validates URL shape, with or without an http(s) scheme
#[derive(Debug, Clone, Default)]
pub struct IsUrl {
    message: Option<String>,
}

pub fn url() -> IsUrl {
    IsUrl::default()
}

impl Rule for IsUrl {
    fn check(&self, value: &Scalar, _record: &Record) -> Option<String> {
        let normalized = normalize(value);
        let text = normalized.text()?;
        (!URL_REGEX.is_match(text)).then(|| resolve(&self.message, || URL_MESSAGE.to_string()))
    }

    fn name(&self) -> &'static str {
        "url"
    }
}

/// Validates 10 to 15 digit phone numbers with an optional leading `+`
#[derive(Debug, Clone, Default)]
pub struct IsPhone {
    message: Option<String>,
}

pub fn phone() -> IsPhone {
    IsPhone::default()
}

impl Rule for IsPhone {
    fn check(&self, value: &Scalar, _record: &Record) -> Option<String> {
        let normalized = normalize(value);
        let text = normalized.text()?;
        (!PHONE_REGEX.is_match(text)).then(|| resolve(&self.message, || PHONE_MESSAGE.to_string()))
    }

    fn name(&self) -> &'static str {
        "phone"
    }
}

// Cross-field validators

/// Validates that a value equals another field of the same record.
///
/// A blank own value passes; a missing referenced field is a mismatch.
#[derive(Debug, Clone)]
pub struct SameAs {
    pub field: String,
    message: Option<String>,
}

pub fn same_as(field: impl Into<String>) -> SameAs {
    SameAs {
        field: field.into(),
        message: None,
    }
}

impl Rule for SameAs {
    fn check(&self, value: &Scalar, record: &Record) -> Option<String> {
        if normalize(value).is_absent() {
            return None;
        }
        (!value.strictly_equals(record.get(&self.field)))
            .then(|| resolve(&self.message, || format!("This value must match {}", self.field)))
    }

    fn name(&self) -> &'static str {
        "same"
    }
}
