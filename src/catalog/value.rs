use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell value.
///
/// Values are untyped text, stored exactly as written in the statement
/// (surrounding quotes removed). `NULL` marks a column an INSERT left out,
/// or an explicit bare `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    String(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Null => None,
        }
    }

    /// Integer view of the value, used by the ordering operators of DELETE.
    ///
    /// The text is read up to the first non-digit after an optional sign
    /// (`"12abc"` is 12, `"1.9"` is 1). Text without a leading number has
    /// no integer view.
    pub fn leading_integer(&self) -> Option<i64> {
        self.as_str().and_then(parse_leading_integer)
    }
}

fn parse_leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_integer() {
        assert_eq!(Value::from("42").leading_integer(), Some(42));
        assert_eq!(Value::from("3.9").leading_integer(), Some(3));
        assert_eq!(Value::from("12abc").leading_integer(), Some(12));
        assert_eq!(Value::from("  -7").leading_integer(), Some(-7));
        assert_eq!(Value::from("007").leading_integer(), Some(7));
        assert_eq!(Value::from("abc").leading_integer(), None);
        assert_eq!(Value::from("").leading_integer(), None);
        assert_eq!(Value::from("-").leading_integer(), None);
        assert_eq!(Value::Null.leading_integer(), None);
    }

    #[test]
    fn test_leading_integer_out_of_range() {
        assert_eq!(Value::from("12345678901234567890").leading_integer(), None);
    }

    #[test]
    fn test_equality_is_textual() {
        assert_ne!(Value::from("30"), Value::from("30.0"));
        assert_ne!(Value::from("02134"), Value::from("2134"));
        assert_ne!(Value::from("NULL"), Value::Null);
        assert_eq!(Value::from("Ana"), Value::String("Ana".to_string()));
    }

    #[test]
    fn test_json_shape() {
        let values = vec![Value::Null, Value::from("1.50"), Value::from("x")];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,"1.50","x"]"#);

        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::from("a@x.com").to_string(), "a@x.com");
    }
}
