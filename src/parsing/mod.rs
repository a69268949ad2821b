//! Decoders turning raw API payloads into a [`CanonicalResponse`].

pub mod error;
pub mod json_parser;
pub mod xml_parser;
pub(crate) mod xml_value;

use crate::parsing::error::ParseError;
use crate::types::canonical_response::CanonicalResponse;
use serde_json::{Map, Value};

/// Decodes one wire format.
pub trait ResponseParser: Send + Sync {
    /// # Errors
    ///
    /// A runtime [`ParseError`] when the payload is not a structured document
    /// with a `response` section, and [`ParseError::Api`] when that section
    /// carries an error descriptor.
    fn parse(&self, payload: &[u8]) -> Result<CanonicalResponse, ParseError>;
}

/// Returns the `response` section, or the error it reports.
///
/// Both formats share these checks: the section must exist and be non-empty,
/// and a non-empty `error` entry is turned into [`ParseError::Api`] with
/// missing `type`/`description` defaulting to an empty string.
pub(crate) fn checked_response(document: &Map<String, Value>) -> Result<&Map<String, Value>, ParseError> {
    let response = document
        .get("response")
        .and_then(Value::as_object)
        .filter(|response| !response.is_empty())
        .ok_or(ParseError::MissingResponse)?;

    if let Some(error) = response.get("error").filter(|error| !is_blank(error)) {
        let text = |key: &str| {
            error
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        return Err(ParseError::Api {
            kind: text("type"),
            description: text("description"),
        });
    }

    Ok(response)
}

/// Null, an empty string, an empty list or an empty map.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(b) => !b,
        Value::Number(_) => false,
    }
}
