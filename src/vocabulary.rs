//! Vocabulary sources: plain word lists and JSON arrays.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::engine::SuggestError;

/// One word per line. Lines are trimmed; blank lines and `#` comments are skipped.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// A JSON array of strings. Any other element type is rejected with its index.
pub fn parse_json(text: &str) -> Result<Vec<String>, SuggestError> {
    let value: Value = serde_json::from_str(text).map_err(|e| SuggestError::Validation {
        index: 0,
        reason: format!("invalid JSON: {e}"),
    })?;
    let Value::Array(items) = value else {
        return Err(SuggestError::Validation {
            index: 0,
            reason: "expected a JSON array of strings".to_string(),
        });
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(word) => Ok(word),
            other => Err(SuggestError::Validation {
                index,
                reason: format!("expected a string, got {}", json_type(&other)),
            }),
        })
        .collect()
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Load a vocabulary file: `.json` files are parsed as a JSON array,
/// everything else as a word list.
pub fn load(path: &Path) -> Result<Vec<String>, SuggestError> {
    let text = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_json(&text)
    } else {
        Ok(parse_word_list(&text))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn word_list_skips_blanks_and_comments() {
        let text = "# greetings\nhello\n\n  help  \n#world\nhealth\n";
        assert_eq!(parse_word_list(text), ["hello", "help", "health"]);
    }

    #[test]
    fn json_array_of_strings() {
        let words = parse_json(r#"["hello", "world"]"#).unwrap();
        assert_eq!(words, ["hello", "world"]);
    }

    #[test]
    fn json_rejects_non_string_entry() {
        let err = parse_json(r#"["hello", 42, "world"]"#).unwrap_err();
        match err {
            SuggestError::Validation { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("number"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn json_rejects_non_array() {
        let err = parse_json(r#"{"words": ["hello"]}"#).unwrap_err();
        assert!(matches!(err, SuggestError::Validation { index: 0, .. }));
        assert!(parse_json("not json").is_err());
    }

    #[test]
    fn load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("vocab.JSON");
        fs::write(&json_path, r#"["alpha", "beta"]"#).unwrap();
        assert_eq!(load(&json_path).unwrap(), ["alpha", "beta"]);

        let txt_path = dir.path().join("vocab.txt");
        let mut f = fs::File::create(&txt_path).unwrap();
        writeln!(f, "gamma").unwrap();
        writeln!(f, "delta").unwrap();
        drop(f);
        assert_eq!(load(&txt_path).unwrap(), ["gamma", "delta"]);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, SuggestError::Io(_)));
    }
}
