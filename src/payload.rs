//! JSON request payloads from files or literals.
//!
//! Commands that take a full resource description accept either a path to a
//! JSON file or the JSON itself as a single argument.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Result, SipError};

/// Read a JSON payload from a file path or a literal JSON string.
///
/// If `arg` names an existing file, its contents are parsed; otherwise the
/// argument itself is parsed as JSON.
///
/// # Errors
///
/// Returns [`SipError::Payload`] if the file cannot be read and
/// [`SipError::Parse`] if the JSON is malformed.
pub fn read_json_arg<T: DeserializeOwned>(arg: &str) -> Result<T> {
    let data = if Path::new(arg).is_file() {
        fs::read_to_string(arg).map_err(SipError::Payload)?
    } else {
        arg.to_string()
    };

    serde_json::from_str(&data).map_err(SipError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        #[serde(default)]
        numbers: Vec<String>,
    }

    #[test]
    fn test_read_literal_json() {
        let sample: Sample = read_json_arg(r#"{"name": "front-desk"}"#).unwrap();
        assert_eq!(sample.name, "front-desk");
        assert!(sample.numbers.is_empty());
    }

    #[test]
    fn test_read_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "lobby", "numbers": ["+15105550100"]}}"#).unwrap();

        let sample: Sample = read_json_arg(file.path().to_str().unwrap()).unwrap();
        assert_eq!(sample.name, "lobby");
        assert_eq!(sample.numbers, vec!["+15105550100"]);
    }

    #[test]
    fn test_malformed_literal_is_parse_error() {
        let err = read_json_arg::<Sample>("{not json").unwrap_err();
        assert!(matches!(err, SipError::Parse(_)));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{broken").unwrap();

        let err = read_json_arg::<Sample>(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, SipError::Parse(_)));
    }
}
