use crate::parsing::error::ParseError;
use crate::parsing::{checked_response, ResponseParser};
use crate::types::canonical_response::CanonicalResponse;
use serde_json::Value;

/// Parser for `application/json` responses.
///
/// JSON payloads already carry the canonical shape: `response.features` is a
/// `{name: 1}` map and the data sections sit at the top level.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl ResponseParser for JsonParser {
    fn parse(&self, payload: &[u8]) -> Result<CanonicalResponse, ParseError> {
        if payload.iter().all(u8::is_ascii_whitespace) {
            return Err(ParseError::EmptyPayload);
        }

        let document = match serde_json::from_slice::<Value>(payload).map_err(ParseError::InvalidJson)? {
            Value::Object(document) => document,
            _ => return Err(ParseError::NotAMap),
        };
        checked_response(&document)?;

        Ok(CanonicalResponse::from_document(document))
    }
}
