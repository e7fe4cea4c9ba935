//! Shared building blocks for raw backend records.
//!
//! The resource server is loosely typed: ids arrive as numbers or strings,
//! and numeric catalog fields may be sent as text by form-based clients.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Canonical record identifier.
///
/// Numeric and string ids are normalized to their text form so that `1`
/// and `"1"` refer to the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId(value.trim().to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::from(value.as_str())
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId(value.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(RecordId::from(Scalar::deserialize(deserializer)?.into_text()))
    }
}

/// A JSON scalar that may be a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Text form of the value, without surrounding whitespace.
    pub fn into_text(self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.trim().to_string(),
        }
    }

    /// Integer value, accepting numeric strings such as `"12"`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Scalar::Number(n) => n.as_u64(),
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Leading four-digit year, so `2019`, `"2019"` and `"2019-04-01"` all
    /// yield 2019.
    pub fn as_year(&self) -> Option<i32> {
        match self {
            Scalar::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
            Scalar::Text(s) => {
                let s = s.trim();
                let digits = s.get(..4)?;
                if !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                if s.len() > 4 && !s[4..].starts_with('-') {
                    return None;
                }
                digits.parse().ok()
            }
        }
    }
}

/// Truthiness of a loosely typed flag.
///
/// `true`, non-zero numbers and non-empty strings are set, except the
/// strings `false`, `0` and `no` (any case).
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "" | "false" | "0" | "no"
        ),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a loosely typed field; `null` and blank strings are absent.
///
/// Non-string values keep their JSON text so they can still be reported.
pub(crate) fn loose_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => non_blank(Some(s)),
        other => Some(other.to_string()),
    }
}

/// Returns the trimmed value, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids_match() {
        let a: RecordId = serde_json::from_str("1").unwrap();
        let b: RecordId = serde_json::from_str("\"1\"").unwrap();
        let c: RecordId = serde_json::from_str("\" 1 \"").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.as_str(), "1");
    }

    #[test]
    fn test_opaque_string_id() {
        let id: RecordId = serde_json::from_str("\"a3f9\"").unwrap();
        assert_eq!(id.to_string(), "a3f9");
    }

    #[test]
    fn test_scalar_as_u64() {
        assert_eq!(Scalar::Text(" 12 ".into()).as_u64(), Some(12));
        assert_eq!(serde_json::from_str::<Scalar>("3").unwrap().as_u64(), Some(3));
        assert_eq!(Scalar::Text("many".into()).as_u64(), None);
    }

    #[test]
    fn test_scalar_as_year() {
        assert_eq!(serde_json::from_str::<Scalar>("1999").unwrap().as_year(), Some(1999));
        assert_eq!(Scalar::Text("2019".into()).as_year(), Some(2019));
        assert_eq!(Scalar::Text("2019-04-01".into()).as_year(), Some(2019));
        assert_eq!(Scalar::Text("20190".into()).as_year(), None);
        assert_eq!(Scalar::Text("circa 1900".into()).as_year(), None);
    }

    #[test]
    fn test_is_truthy() {
        for set in [r#"true"#, r#"1"#, r#"2.5"#, r#""true""#, r#"" TRUE ""#, r#""1""#, r#""yes""#, r#"{}"#] {
            let value: Value = serde_json::from_str(set).unwrap();
            assert!(is_truthy(&value), "{} should be set", set);
        }
        for unset in [r#"false"#, r#"0"#, r#"null"#, r#""""#, r#""false""#, r#""0""#, r#""No""#] {
            let value: Value = serde_json::from_str(unset).unwrap();
            assert!(!is_truthy(&value), "{} should be unset", unset);
        }
    }

    #[test]
    fn test_loose_text() {
        assert_eq!(loose_text(None), None);
        assert_eq!(loose_text(Some(Value::Null)), None);
        assert_eq!(loose_text(Some(Value::from("  "))), None);
        assert_eq!(loose_text(Some(Value::from(" abc "))), Some("abc".to_string()));
        assert_eq!(loose_text(Some(Value::from(9780441013593u64))), Some("9780441013593".to_string()));
        assert_eq!(
            loose_text(Some(serde_json::json!({"d": 1}))),
            Some("{\"d\":1}".to_string())
        );
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  x ".into())), Some("x".to_string()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }
}
