//! Cell values and the loose equality used by the commit pipeline.

use serde::{Deserialize, Serialize};

/// A storable cell value.
///
/// Values arrive from the options document, from the text surface, or from a
/// picker, and are written back through the grid's value-set primitive. An
/// empty cell is `Text("")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Boolean (checkbox/radio columns)
    Bool(bool),
    /// Numeric (masked or numeric columns keep the raw number)
    Number(f64),
    /// Plain text, including formula-prefixed strings (`=...`)
    Text(String),
    /// Multi-select dropdown picks
    List(Vec<String>),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Text(String::new())
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl CellValue {
    /// Render the value as the text shown in a cell or seeded into an editor.
    pub fn display(&self) -> String {
        match self {
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => format!("{}", n),
            CellValue::Text(t) => t.clone(),
            CellValue::List(items) => items.join(";"),
        }
    }

    /// Boolean interpretation, used by the checkbox/radio toggle paths.
    pub fn truthy(&self) -> bool {
        match self {
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n != 0.0,
            CellValue::Text(t) => !t.is_empty() && t != "false" && t != "0",
            CellValue::List(items) => !items.is_empty(),
        }
    }

    /// Loose cross-type equality.
    ///
    /// The commit path compares the normalized editor output against the
    /// stored value and skips the write when they match, so an edit that
    /// round-trips to the same value is not recorded as a change. Text that
    /// parses to the same number as a stored number is equal, booleans
    /// compare as 1/0 against numbers, and a list equals its `;`-joined
    /// text form.
    pub fn loosely_eq(&self, other: &CellValue) -> bool {
        use CellValue::*;
        match (self, other) {
            (Text(a), Text(b)) => a == b,
            (Number(a), Number(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Text(t), Number(n)) | (Number(n), Text(t)) => {
                t.trim().parse::<f64>().map(|p| p == *n).unwrap_or(false)
            }
            (Bool(b), Number(n)) | (Number(n), Bool(b)) => (*b as u8 as f64) == *n,
            (Bool(b), Text(t)) | (Text(t), Bool(b)) => {
                let (word, digit) = if *b { ("true", "1") } else { ("false", "0") };
                t == word || t == digit
            }
            (List(items), Text(t)) | (Text(t), List(items)) => items.join(";") == *t,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Text("abc".into()).display(), "abc");
        assert_eq!(CellValue::Number(1234.5).display(), "1234.5");
        assert_eq!(CellValue::Number(5.0).display(), "5");
        assert_eq!(CellValue::Bool(true).display(), "true");
        assert_eq!(
            CellValue::List(vec!["a".into(), "b".into()]).display(),
            "a;b"
        );
    }

    #[test]
    fn test_truthy() {
        assert!(CellValue::Bool(true).truthy());
        assert!(!CellValue::Bool(false).truthy());
        assert!(!CellValue::Number(0.0).truthy());
        assert!(CellValue::Number(2.0).truthy());
        assert!(!CellValue::Text("".into()).truthy());
        assert!(!CellValue::Text("0".into()).truthy());
        assert!(CellValue::Text("yes".into()).truthy());
    }

    #[test]
    fn test_loose_equality_text_number() {
        assert!(CellValue::Text("1234.5".into()).loosely_eq(&CellValue::Number(1234.5)));
        assert!(CellValue::Number(5.0).loosely_eq(&CellValue::Text("5".into())));
        assert!(!CellValue::Text("abc".into()).loosely_eq(&CellValue::Number(0.0)));
    }

    #[test]
    fn test_loose_equality_bool() {
        assert!(CellValue::Bool(true).loosely_eq(&CellValue::Number(1.0)));
        assert!(CellValue::Bool(false).loosely_eq(&CellValue::Text("0".into())));
        assert!(!CellValue::Bool(true).loosely_eq(&CellValue::Text("yes".into())));
    }

    #[test]
    fn test_loose_equality_list() {
        let list = CellValue::List(vec!["a".into(), "b".into()]);
        assert!(list.loosely_eq(&CellValue::Text("a;b".into())));
        assert!(!list.loosely_eq(&CellValue::Text("a,b".into())));
    }

    #[test]
    fn test_untagged_deserialization() {
        let values: Vec<CellValue> = serde_json::from_str(r#"[true, 12.5, "x", ["a","b"]]"#)
            .expect("valid value array");
        assert_eq!(
            values,
            vec![
                CellValue::Bool(true),
                CellValue::Number(12.5),
                CellValue::Text("x".into()),
                CellValue::List(vec!["a".into(), "b".into()]),
            ]
        );
    }
}
