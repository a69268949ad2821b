//! Byte encodings of a cache record document, one per output format.

use crate::cache::error::CodecError;
use crate::parsing::xml_value::{read_document, write_document};
use serde_json::Value;

const XML_ROOT: &str = "weather_data";

/// Turns the flattened record document into file bytes and back.
pub trait RecordCodec: Send + Sync {
    /// # Errors
    ///
    /// [`CodecError`] if the document cannot be represented.
    fn encode(&self, document: &Value) -> Result<Vec<u8>, CodecError>;

    /// # Errors
    ///
    /// [`CodecError`] if `bytes` is not a document of this format.
    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError>;
}

/// Plain JSON, the document as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRecordCodec;

impl RecordCodec for JsonRecordCodec {
    fn encode(&self, document: &Value) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(document)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// XML under a `<weather_data>` root, with type annotations so values keep
/// their JSON types.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRecordCodec;

impl RecordCodec for XmlRecordCodec {
    fn encode(&self, document: &Value) -> Result<Vec<u8>, CodecError> {
        Ok(write_document(XML_ROOT, document)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        let (root, document) = read_document(bytes)?;
        if root != XML_ROOT {
            return Err(CodecError::UnexpectedRoot(root));
        }
        Ok(document)
    }
}
