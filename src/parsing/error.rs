use crate::parsing::xml_value::XmlError;
use crate::transport::error::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("No data received from the remote service")]
    NoData(#[source] TransportError),

    #[error("Response payload is empty")]
    EmptyPayload,

    #[error("Response payload is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Response payload is not valid XML")]
    InvalidXml(#[source] XmlError),

    #[error("Response payload is not a structured document")]
    NotAMap,

    #[error("Request returned empty response")]
    MissingResponse,

    #[error("Response does not list the features it contains")]
    MissingFeatures,

    #[error("Request to Weather Underground API returned an error ({kind}). Description message: {description}")]
    Api { kind: String, description: String },
}

impl ParseError {
    /// `true` when the remote service answered with a structured error.
    pub fn is_api_error(&self) -> bool {
        matches!(self, ParseError::Api { .. })
    }

    /// `true` for every failure to obtain or decode a usable payload.
    pub fn is_runtime_error(&self) -> bool {
        !self.is_api_error()
    }
}
