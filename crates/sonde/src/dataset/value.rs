//! Cell values and cell-level type inference.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

// Date patterns compiled once on first use.
static DATE_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"^\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}$").unwrap(),
            "%Y-%m-%d %H:%M:%S",
        ),
        (Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(), "%Y-%m-%d"), // ISO date
        (Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap(), "%m/%d/%Y"), // US date
        (Regex::new(r"^\d{4}/\d{2}/\d{2}$").unwrap(), "%Y/%m/%d"), // Alt ISO
    ]
});

/// A single cell of a [`Dataset`](super::Dataset).
///
/// `Float(NaN)` and `Null` are different things: the first is a value that
/// failed arithmetic, the second is a missing entry. Both count as "null"
/// in null-rate statistics.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Infer a typed value from a raw text cell.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_null_token(trimmed) {
            return Value::Null;
        }
        if trimmed.eq_ignore_ascii_case("nan") {
            return Value::Float(f64::NAN);
        }
        if let Ok(v) = trimmed.parse::<i64>() {
            return Value::Integer(v);
        }
        if let Ok(v) = trimmed.parse::<f64>() {
            if v.is_finite() || trimmed.to_ascii_lowercase().contains("inf") {
                return Value::Float(v);
            }
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            _ => {}
        }
        if let Some(dt) = parse_datetime(trimmed) {
            return Value::DateTime(dt);
        }
        Value::Text(raw.to_string())
    }

    /// Short label for the value type, used in type statistics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "str",
            Value::DateTime(_) => "datetime",
        }
    }

    /// True for missing entries.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for floating point NaN.
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Float(v) if v.is_nan())
    }

    /// True for missing entries and NaN.
    pub fn is_missing(&self) -> bool {
        self.is_null() || self.is_nan()
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Convert to a JSON value. Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(v) => serde_json::Value::from(*v),
            Value::Float(v) => serde_json::Value::from(*v),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::DateTime(_) => serde_json::Value::String(self.to_string()),
        }
    }
}

/// Grouping equality: NaN equals NaN, `1` and `1.0` are different values.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Integer(v) => v.hash(state),
            Value::Float(v) => canonical_bits(*v).hash(state),
            Value::Text(s) => s.hash(state),
            Value::DateTime(dt) => dt.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) if v.is_nan() => write!(f, "NaN"),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::DateTime(dt) if dt.time() == NaiveTime::MIN => {
                write!(f, "{}", dt.format("%Y-%m-%d"))
            }
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Check if a raw cell represents a missing/null value.
pub fn is_null_token(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "."
        || trimmed == "-"
}

/// Parse the date and datetime layouts recognised during ingestion.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    for (pattern, format) in DATE_PATTERNS.iter() {
        if !pattern.is_match(value) {
            continue;
        }
        if format.contains("%H") {
            let normalized = value.replacen('T', " ", 1);
            return NaiveDateTime::parse_from_str(&normalized, format).ok();
        }
        return NaiveDate::parse_from_str(value, format)
            .ok()
            .map(|d| d.and_time(NaiveTime::MIN));
    }
    None
}

fn canonical_bits(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_infers_types() {
        assert_eq!(Value::parse("42"), Value::Integer(42));
        assert_eq!(Value::parse("2.5"), Value::Float(2.5));
        assert_eq!(Value::parse("TRUE"), Value::Bool(true));
        assert_eq!(Value::parse("Alice"), Value::Text("Alice".to_string()));
        assert!(Value::parse("NA").is_null());
        assert!(Value::parse("").is_null());
        assert!(Value::parse("NaN").is_nan());
        assert!(!Value::parse("NaN").is_null());
    }

    #[test]
    fn test_parse_dates() {
        let v = Value::parse("2024-01-15");
        assert_eq!(v.kind(), "datetime");
        assert_eq!(v.to_string(), "2024-01-15");

        let v = Value::parse("2024-01-15T10:30:00");
        assert_eq!(v.to_string(), "2024-01-15 10:30:00");

        let v = Value::parse("01/15/2024");
        assert_eq!(v.to_string(), "2024-01-15");

        // Looks like a date but is not one.
        assert_eq!(Value::parse("2024-13-45").kind(), "str");
    }

    #[test]
    fn test_nan_groups_with_nan() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Integer(1), Value::Float(1.0));
    }

    #[test]
    fn test_to_json() {
        assert_eq!(Value::Float(f64::NAN).to_json(), serde_json::Value::Null);
        assert_eq!(Value::Integer(3).to_json(), serde_json::json!(3));
        assert_eq!(Value::from("x").to_json(), serde_json::json!("x"));
    }
}
