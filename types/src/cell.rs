//! Spreadsheet cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single grid cell.
///
/// Serialized untagged so a column goes over the wire as a plain JSON array
/// of numbers, strings and `null`s.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Interpret raw text typed into a cell.
    ///
    /// Finite numbers become [`CellValue::Number`], an empty string becomes
    /// [`CellValue::Empty`], anything else is kept verbatim as text.
    pub fn from_input(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Empty;
        }
        match parse_finite(raw) {
            Some(n) => Self::Number(n),
            None => Self::Text(raw.to_string()),
        }
    }

    /// True for `Empty` and for the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Numeric reading of the cell, parsing text when it holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => parse_finite(s),
            Self::Empty => None,
        }
    }

    /// Header text with surrounding whitespace removed.
    pub fn trimmed(&self) -> String {
        self.to_string().trim().to_string()
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_input_classifies_text() {
        assert_eq!(CellValue::from_input(""), CellValue::Empty);
        assert_eq!(CellValue::from_input("12.5"), CellValue::Number(12.5));
        assert_eq!(CellValue::from_input(" 3 "), CellValue::Number(3.0));
        assert_eq!(CellValue::from_input("male"), CellValue::Text("male".into()));
        assert_eq!(CellValue::from_input("NaN"), CellValue::Text("NaN".into()));
        assert_eq!(CellValue::from_input("inf"), CellValue::Text("inf".into()));
    }

    #[test]
    fn zero_is_not_empty() {
        assert!(!CellValue::Number(0.0).is_empty());
        assert!(!CellValue::from("0").is_empty());
        assert!(CellValue::from("").is_empty());
        assert!(CellValue::Empty.is_empty());
    }

    #[test]
    fn display_drops_trailing_fraction_for_whole_numbers() {
        assert_eq!(CellValue::Number(1.0).to_string(), "1");
        assert_eq!(CellValue::Number(13.03).to_string(), "13.03");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn serializes_as_plain_json_values() {
        let row = vec![
            CellValue::Number(2.5),
            CellValue::Text("a".into()),
            CellValue::Empty,
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"[2.5,"a",null]"#);

        let back: Vec<CellValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}
