//! Raw expected values as authored in tests

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An expected value exactly as the test author wrote it
///
/// Strings are kept verbatim (including case and surrounding whitespace) so
/// that failure reports echo the author's text back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Free-form text such as `"Call"`, `"Today"` or `"> 28"`
    Text(String),
    /// A bare number such as `30`
    Number(Decimal),
}

impl RawValue {
    /// Get the text if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(_) => None,
        }
    }

    /// Get the number if this is a numeric value
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Self::Text(_) => None,
            Self::Number(number) => Some(*number),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Decimal> for RawValue {
    fn from(d: Decimal) -> Self {
        Self::Number(d)
    }
}

impl From<i32> for RawValue {
    fn from(i: i32) -> Self {
        Self::Number(Decimal::from(i))
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        Self::Number(Decimal::from(i))
    }
}

impl From<u32> for RawValue {
    fn from(i: u32) -> Self {
        Self::Number(Decimal::from(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_deserialize() {
        let text: RawValue = serde_json::from_str(r#""Call""#).unwrap();
        assert_eq!(text, RawValue::from("Call"));

        // Numeric-looking strings stay text
        let quoted: RawValue = serde_json::from_str(r#""28""#).unwrap();
        assert_eq!(quoted, RawValue::Text("28".into()));

        let number: RawValue = serde_json::from_str("28").unwrap();
        assert_eq!(number, RawValue::from(28));
    }

    #[test]
    fn test_display_is_verbatim() {
        assert_eq!(RawValue::from("  Today ").to_string(), "  Today ");
        assert_eq!(RawValue::from(65).to_string(), "65");
    }
}
