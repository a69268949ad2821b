use crate::parsing::error::ParseError;
use crate::parsing::xml_value::read_document;
use crate::parsing::{checked_response, is_blank, ResponseParser};
use crate::types::canonical_response::CanonicalResponse;
use serde_json::{json, Map, Value};

const ROOT: &str = "response";

/// Response metadata the JSON format nests under `response`; moved there so
/// both formats end up with the same shape.
const RESPONSE_METADATA: [&str; 2] = ["version", "termsofService"];

/// Parser for `application/xml` responses.
///
/// The XML root is `<response>`, data sections are its children and the
/// feature list is `<features><feature>name</feature>…</features>`. The list
/// is rewritten into the `{name: 1}` map the JSON format carries.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlParser;

impl ResponseParser for XmlParser {
    fn parse(&self, payload: &[u8]) -> Result<CanonicalResponse, ParseError> {
        if payload.iter().all(u8::is_ascii_whitespace) {
            return Err(ParseError::EmptyPayload);
        }

        let (root, value) = read_document(payload).map_err(ParseError::InvalidXml)?;

        // Wrapped the way the JSON document looks, so the shared checks apply.
        let mut wrapper = Map::new();
        if root == ROOT && !is_blank(&value) {
            wrapper.insert(ROOT.to_string(), value);
        }
        checked_response(&wrapper)?;

        let Some(Value::Object(mut sections)) = wrapper.remove(ROOT) else {
            return Err(ParseError::NotAMap);
        };

        let flags = feature_flags(sections.remove("features"))?;
        let mut response = Map::new();
        for key in RESPONSE_METADATA {
            if let Some(value) = sections.remove(key) {
                response.insert(key.to_string(), value);
            }
        }
        response.insert("features".to_string(), Value::Object(flags));
        sections.insert(ROOT.to_string(), Value::Object(response));

        Ok(CanonicalResponse::from_document(sections))
    }
}

/// `<features>` holds one `<feature>` (a string) or several (a list).
fn feature_flags(features: Option<Value>) -> Result<Map<String, Value>, ParseError> {
    let names = match features.as_ref().and_then(|features| features.get("feature")) {
        Some(Value::String(name)) if !name.is_empty() => vec![name.as_str()],
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(|item| item.as_str().filter(|name| !name.is_empty()))
            .collect::<Option<Vec<_>>>()
            .ok_or(ParseError::MissingFeatures)?,
        _ => return Err(ParseError::MissingFeatures),
    };

    Ok(names
        .into_iter()
        .map(|name| (name.to_string(), json!(1)))
        .collect())
}
