// Record values and the shared normalization helper

use crate::RecordError;
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// A single field value inside a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Missing or explicitly null
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// An already-structured date or date-time
    Date(NaiveDateTime),
}

impl Scalar {
    /// Textual form of the value, before trimming.
    ///
    /// Returns `None` for [`Scalar::Null`].
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Scalar::Number(n) => Some(Cow::Owned(format_number(*n))),
            Scalar::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Scalar::Date(d) => Some(Cow::Owned(d.format("%Y-%m-%dT%H:%M:%S").to_string())),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Strict equality on the normalized scalar.
    ///
    /// Values of different kinds never compare equal, so `"5"` and `5` differ.
    /// Text is compared after trimming surrounding whitespace.
    pub fn strictly_equals(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Number(a), Scalar::Number(b)) => a == b,
            (Scalar::Text(a), Scalar::Text(b)) => a.trim() == b.trim(),
            (Scalar::Date(a), Scalar::Date(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => f.write_str("null"),
        }
    }
}

impl From<Value> for Scalar {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Bool(b),
            Value::Number(n) => n.as_f64().map(Scalar::Number).unwrap_or(Scalar::Null),
            Value::String(s) => Scalar::Text(s),
            other => Scalar::Text(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Scalar::from)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value as f64)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<NaiveDateTime> for Scalar {
    fn from(value: NaiveDateTime) -> Self {
        Scalar::Date(value)
    }
}

impl From<NaiveDate> for Scalar {
    fn from(value: NaiveDate) -> Self {
        Scalar::Date(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Scalar::Null)
    }
}

static NULL: Scalar = Scalar::Null;

/// Input data submitted for validation: field name to [`Scalar`].
///
/// Field order is preserved. Looking up a field the record does not
/// contain yields [`Scalar::Null`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Scalar>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field value (builder style)
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field value, replacing any previous one
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Scalar>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Get a field value, or [`Scalar::Null`] when the field is missing
    pub fn get(&self, field: &str) -> &Scalar {
        self.fields.get(field).unwrap_or(&NULL)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a record from a JSON object.
    ///
    /// Nested arrays and objects are kept as their JSON text.
    pub fn from_json(value: Value) -> Result<Self, RecordError> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            Value::Null => Err(RecordError::NotAnObject("null")),
            Value::Bool(_) => Err(RecordError::NotAnObject("a boolean")),
            Value::Number(_) => Err(RecordError::NotAnObject("a number")),
            Value::String(_) => Err(RecordError::NotAnObject("a string")),
            Value::Array(_) => Err(RecordError::NotAnObject("an array")),
        }
    }

    /// Parse a record from JSON text
    pub fn from_json_str(text: &str) -> Result<Self, RecordError> {
        Self::from_json(serde_json::from_str(text)?)
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Classification of a value before any rule-specific logic runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<'a> {
    /// Null, or blank after trimming
    Absent,
    /// Trimmed text that parses to a finite number
    Numeric { text: Cow<'a, str>, number: f64 },
    /// Any other present value, trimmed
    Text(Cow<'a, str>),
}

impl<'a> Normalized<'a> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Normalized::Absent)
    }

    /// Trimmed textual form, `None` when absent
    pub fn text(&self) -> Option<&str> {
        match self {
            Normalized::Absent => None,
            Normalized::Numeric { text, .. } | Normalized::Text(text) => Some(&**text),
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self {
            Normalized::Numeric { number, .. } => Some(*number),
            _ => None,
        }
    }
}

/// Classify a value as absent, numeric, or text.
///
/// Every built-in rule goes through this helper so that blank handling and
/// numeric detection stay identical across rules.
pub fn normalize(value: &Scalar) -> Normalized<'_> {
    let Some(text) = value.as_text() else {
        return Normalized::Absent;
    };

    let trimmed = match text {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
        Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
    };

    if trimmed.is_empty() {
        return Normalized::Absent;
    }

    match parse_number(&trimmed) {
        Some(number) => Normalized::Numeric {
            text: trimmed,
            number,
        },
        None => Normalized::Text(trimmed),
    }
}

/// Parse text as a finite number.
///
/// Accepts decimal notation with an optional sign and exponent, plus
/// unsigned `0x`/`0o`/`0b` integer literals.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => 16,
        Some("0o") | Some("0O") => 8,
        Some("0b") | Some("0B") => 2,
        _ => 10,
    };

    if radix != 10 {
        let digits = &text[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return u128::from_str_radix(digits, radix)
            .ok()
            .map(|n| n as f64)
            .filter(|n| n.is_finite());
    }

    // f64::from_str also takes "inf" and "NaN", which are not numbers here
    if !text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }

    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Render a number the way it appears in messages and textual forms.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        (if n > 0.0 { "Infinity" } else { "-Infinity" }).to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}
