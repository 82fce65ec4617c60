// src/utils/extract.rs

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::value::RawValue;

/// Greedy match from the first `{` to the last `}` of the reply.
///
/// Model output carries no structural guarantee, so a reply with prose braces
/// around the payload, or with two separate objects, fails to parse rather
/// than being repaired.
static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("JSON object pattern is valid"));

#[derive(Debug)]
pub enum ExtractError {
    /// The reply contained no `{ ... }` span at all. Carries the reply text.
    NoJsonFound(String),

    /// A `{ ... }` span was found but it is not valid JSON.
    InvalidJson(serde_json::Error),
}

impl ExtractError {
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::NoJsonFound(_) => "no_json",
            ExtractError::InvalidJson(_) => "invalid_json",
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::NoJsonFound(reply) => write!(f, "No JSON found in response: {}", reply),
            ExtractError::InvalidJson(err) => write!(f, "Model returned malformed JSON: {}", err),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Extracts the JSON object embedded in a free-text model reply.
///
/// The object is returned verbatim (key order and spacing preserved) once it
/// has been checked to be well-formed JSON.
pub fn extract_json_object(reply: &str) -> Result<Box<RawValue>, ExtractError> {
    let matched = JSON_OBJECT
        .find(reply)
        .ok_or_else(|| ExtractError::NoJsonFound(reply.to_string()))?;

    RawValue::from_string(matched.as_str().to_string()).map_err(ExtractError::InvalidJson)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_surrounded_by_prose() {
        let reply = "Here is your list:\n{\"group\": {\"name\": \"food\"}, \"words\": []}\nEnjoy!";
        let raw = extract_json_object(reply).unwrap();
        assert_eq!(raw.get(), "{\"group\": {\"name\": \"food\"}, \"words\": []}");
    }

    #[test]
    fn spans_multiple_lines() {
        let reply = "Sure.\n{\n  \"words\": [\n    {\"spanish\": \"pan\"}\n  ]\n}";
        let raw = extract_json_object(reply).unwrap();
        let value: serde_json::Value = serde_json::from_str(raw.get()).unwrap();
        assert_eq!(value["words"][0]["spanish"], "pan");
    }

    #[test]
    fn reply_without_braces_is_an_error() {
        let err = extract_json_object("I cannot help with that.").unwrap_err();
        assert_eq!(err.kind(), "no_json");
        assert!(err.to_string().contains("I cannot help with that."));
    }

    #[test]
    fn braces_that_are_not_json_are_an_error() {
        let err = extract_json_object("use {curly} braces").unwrap_err();
        assert_eq!(err.kind(), "invalid_json");
    }

    #[test]
    fn greedy_match_rejects_two_separate_objects() {
        let err = extract_json_object("{\"a\": 1} and {\"b\": 2}").unwrap_err();
        assert_eq!(err.kind(), "invalid_json");
    }
}
