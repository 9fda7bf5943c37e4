//! Line-oriented parameter document parser.
//!
//! One `key: value` pair per line; `#` starts a comment (line-leading or
//! trailing); blank lines are skipped. The parser produces an ordered raw
//! document and knows nothing about field meanings — typed resolution
//! happens in the schema layer.

use thiserror::Error;

use super::value::ParamValue;

/// Errors raised while parsing a parameter document.
///
/// Every variant carries the 1-based line number so the message points at
/// the offending line.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: missing ':' separator")]
    MissingSeparator { line: usize },

    #[error("line {line}: empty key")]
    EmptyKey { line: usize },

    #[error("line {line}: invalid key '{key}' (keys are [A-Za-z_][A-Za-z0-9_]*)")]
    InvalidKey { line: usize, key: String },

    #[error("line {line}: missing value for '{key}'")]
    MissingValue { line: usize, key: String },

    #[error("line {line}: duplicate key '{key}' (first defined on line {first})")]
    DuplicateKey {
        line: usize,
        key: String,
        first: usize,
    },

    #[error("line {line}: malformed list: {reason}")]
    MalformedList { line: usize, reason: String },
}

/// An ordered raw parameter document.
///
/// Entries keep file order so renders and diagnostics match the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamDocument {
    entries: Vec<(String, ParamValue)>,
}

impl ParamDocument {
    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterate entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a parameter document from text.
pub fn parse_document(input: &str) -> Result<ParamDocument, ParseError> {
    let mut entries: Vec<(String, ParamValue)> = Vec::new();
    // (key, line) pairs for duplicate detection
    let mut seen: Vec<(String, usize)> = Vec::new();

    for (idx, raw_line) in input.lines().enumerate() {
        let line = idx + 1;

        let content = match raw_line.find('#') {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };
        let content = content.trim();
        if content.is_empty() {
            continue;
        }

        let Some((key, value)) = content.split_once(':') else {
            return Err(ParseError::MissingSeparator { line });
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(ParseError::EmptyKey { line });
        }
        if !is_valid_key(key) {
            return Err(ParseError::InvalidKey {
                line,
                key: key.to_string(),
            });
        }
        if let Some((_, first)) = seen.iter().find(|(k, _)| k == key) {
            return Err(ParseError::DuplicateKey {
                line,
                key: key.to_string(),
                first: *first,
            });
        }

        let value = value.trim();
        if value.is_empty() {
            return Err(ParseError::MissingValue {
                line,
                key: key.to_string(),
            });
        }

        let value = parse_value(value, line)?;
        seen.push((key.to_string(), line));
        entries.push((key.to_string(), value));
    }

    Ok(ParamDocument { entries })
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse a trimmed value: a bracketed list or a scalar.
fn parse_value(value: &str, line: usize) -> Result<ParamValue, ParseError> {
    if let Some(rest) = value.strip_prefix('[') {
        let Some(inner) = rest.strip_suffix(']') else {
            return Err(ParseError::MalformedList {
                line,
                reason: "missing closing ']'".to_string(),
            });
        };
        return parse_list(inner, line);
    }
    Ok(ParamValue::parse_scalar(value))
}

/// Parse the comma-separated interior of a list. A trailing comma is
/// allowed (`[8,]`); nested lists and empty elements are not.
fn parse_list(inner: &str, line: usize) -> Result<ParamValue, ParseError> {
    let inner = inner.trim();
    if inner.is_empty() {
        return Ok(ParamValue::List(Vec::new()));
    }

    let mut items = Vec::new();
    let elements: Vec<&str> = inner.split(',').map(str::trim).collect();
    let last = elements.len() - 1;
    for (i, element) in elements.iter().enumerate() {
        if element.is_empty() {
            // Only the position after the final comma may be empty.
            if i == last {
                continue;
            }
            return Err(ParseError::MalformedList {
                line,
                reason: "empty list element".to_string(),
            });
        }
        if element.starts_with('[') {
            return Err(ParseError::MalformedList {
                line,
                reason: "nested lists are not supported".to_string(),
            });
        }
        items.push(ParamValue::parse_scalar(element));
    }
    Ok(ParamValue::List(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_basic_pairs() {
        let doc = parse_document("batch_size: 64\nlr: 0.01\ndp: True\n").unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.get("batch_size"), Some(&ParamValue::Int(64)));
        assert_eq!(doc.get("lr"), Some(&ParamValue::Float(0.01)));
        assert_eq!(doc.get("dp"), Some(&ParamValue::Bool(true)));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let text = "\n# experiment setup\nbatch_size: 64  # per step\n\n   # trailing\nlr: 0.1\n";
        let doc = parse_document(text).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("batch_size"), Some(&ParamValue::Int(64)));
    }

    #[test]
    fn test_commented_out_line_is_skipped() {
        let doc = parse_document("# resumed_model: runs/chk.pt\nepochs: 10\n").unwrap();
        assert!(doc.get("resumed_model").is_none());
        assert_eq!(doc.get("epochs"), Some(&ParamValue::Int(10)));
    }

    #[test]
    fn test_infinity_value() {
        let doc = parse_document("S: inf\n").unwrap();
        assert_eq!(doc.get("S"), Some(&ParamValue::Float(f64::INFINITY)));
    }

    #[test]
    fn test_list_values() {
        let doc = parse_document("save_on_epochs: [10, 50, 100, 200]\n").unwrap();
        let expected = ParamValue::List(vec![
            ParamValue::Int(10),
            ParamValue::Int(50),
            ParamValue::Int(100),
            ParamValue::Int(200),
        ]);
        assert_eq!(doc.get("save_on_epochs"), Some(&expected));
    }

    #[test]
    fn test_single_element_list_with_trailing_comma() {
        let doc = parse_document("key_to_drop: [8,]\n").unwrap();
        assert_eq!(
            doc.get("key_to_drop"),
            Some(&ParamValue::List(vec![ParamValue::Int(8)]))
        );
    }

    #[test]
    fn test_empty_list() {
        let doc = parse_document("key_to_drop: []\n").unwrap();
        assert_eq!(doc.get("key_to_drop"), Some(&ParamValue::List(Vec::new())));
    }

    #[test]
    fn test_path_value_stays_string() {
        let doc = parse_document("resumed_model: runs/exp4/epoch_100.pt\n").unwrap();
        assert_eq!(
            doc.get("resumed_model"),
            Some(&ParamValue::Str("runs/exp4/epoch_100.pt".to_string()))
        );
    }

    #[test]
    fn test_missing_separator_reports_line() {
        let err = parse_document("epochs: 10\nbogus line\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingSeparator { line: 2 }));
    }

    #[test]
    fn test_missing_value() {
        let err = parse_document("lr:\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingValue { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_key() {
        let err = parse_document("lr: 0.1\nepochs: 10\nlr: 0.2\n").unwrap_err();
        match err {
            ParseError::DuplicateKey { line, key, first } => {
                assert_eq!(line, 3);
                assert_eq!(key, "lr");
                assert_eq!(first, 1);
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_list() {
        let err = parse_document("save_on_epochs: [10, 50\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedList { line: 1, .. }));
    }

    #[test]
    fn test_empty_list_element() {
        let err = parse_document("key_to_drop: [8,,9]\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedList { .. }));
    }

    #[test]
    fn test_invalid_key() {
        let err = parse_document("2fast: 1\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidKey { line: 1, .. }));
    }

    #[test]
    fn test_order_preserved() {
        let doc = parse_document("b: 1\na: 2\nc: 3\n").unwrap();
        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    proptest! {
        /// The parser returns Ok or Err on arbitrary input; it never panics.
        #[test]
        fn prop_parser_never_panics(input in "\\PC*") {
            let _ = parse_document(&input);
        }

        #[test]
        fn prop_integer_pairs_roundtrip(key in "[a-z_][a-z0-9_]{0,12}", value in any::<i64>()) {
            let doc = parse_document(&format!("{key}: {value}\n")).unwrap();
            prop_assert_eq!(doc.get(&key), Some(&ParamValue::Int(value)));
        }
    }
}
