//! Scalar setting values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single persisted setting value.
///
/// Serialized untagged, so on disk a value is a plain JSON scalar
/// (`true`, `70`, `0.5`, `"comforting"`).  Variant order matters for
/// deserialization: integers must be tried before floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SettingValue {
    /// Truthiness as the UI layer understands it.
    ///
    /// `false`, `0`, `0.0`, NaN and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::Text(s) => !s.is_empty(),
        }
    }

    /// Interprets the value as an integer.
    ///
    /// Text holding an optionally signed run of digits is parsed, since text
    /// inputs store numbers as strings.  Floats are truncated.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for SettingValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness_of_each_variant() {
        assert!(SettingValue::Bool(true).is_truthy());
        assert!(!SettingValue::Bool(false).is_truthy());
        assert!(SettingValue::Int(3).is_truthy());
        assert!(!SettingValue::Int(0).is_truthy());
        assert!(!SettingValue::Float(0.0).is_truthy());
        assert!(!SettingValue::Float(f64::NAN).is_truthy());
        assert!(SettingValue::Text("rose".into()).is_truthy());
        assert!(!SettingValue::Text(String::new()).is_truthy());
    }

    #[test]
    fn test_as_int_parses_numeric_text() {
        assert_eq!(SettingValue::Text(" 70 ".into()).as_int(), Some(70));
        assert_eq!(SettingValue::Text("abc".into()).as_int(), None);
        assert_eq!(SettingValue::Float(40.9).as_int(), Some(40));
        assert_eq!(SettingValue::Bool(true).as_int(), None);
    }

    #[test]
    fn test_deserializes_plain_json_scalars() {
        let values: Vec<SettingValue> =
            serde_json::from_str(r#"[true, 70, 0.5, "comforting"]"#).expect("deserialize");
        assert_eq!(
            values,
            vec![
                SettingValue::Bool(true),
                SettingValue::Int(70),
                SettingValue::Float(0.5),
                SettingValue::Text("comforting".into()),
            ]
        );
    }

    #[test]
    fn test_serializes_without_variant_tags() {
        let json = serde_json::to_string(&SettingValue::Int(80)).expect("serialize");
        assert_eq!(json, "80");
    }
}
