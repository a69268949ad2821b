use crate::cache::error::CacheError;
use crate::config::ConfigError;
use crate::parsing::error::ParseError;
use crate::routing::error::RoutingError;
use crate::transport::error::TransportError;
use std::path::PathBuf;
use thiserror::Error;

/// A caller supplied value that is not accepted (feature name, query, format).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The parameter '{parameter}' has an invalid value '{value}'")]
pub struct InvalidArgument {
    pub parameter: &'static str,
    pub value: String,
}

impl InvalidArgument {
    pub(crate) fn new(parameter: &'static str, value: impl Into<String>) -> Self {
        Self {
            parameter,
            value: value.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum WundergroundError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to set up the HTTP client")]
    HttpClient(#[source] TransportError),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),
}

impl WundergroundError {
    /// Whether the caller can do something about this error: fix the request
    /// or react to the service's answer. Everything else is an internal fault
    /// (broken cache file, routing bug, I/O).
    pub fn is_recoverable(&self) -> bool {
        match self {
            WundergroundError::InvalidArgument(_) | WundergroundError::InvalidSettings(_) => true,
            WundergroundError::Parse(err) => err.is_api_error(),
            _ => false,
        }
    }
}
