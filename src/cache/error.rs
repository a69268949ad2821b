use crate::parsing::xml_value::XmlError;
use std::path::PathBuf;
use thiserror::Error;

/// Why a cache file's bytes could not be turned into a record, or back.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("not a valid JSON document")]
    Json(#[from] serde_json::Error),

    #[error("not a valid XML document")]
    Xml(#[from] XmlError),

    #[error("unexpected root element '{0}'")]
    UnexpectedRoot(String),

    #[error("{0}")]
    Shape(String),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Invalid data format in cache file '{0}'")]
    InvalidDataFormat(PathBuf, #[source] CodecError),

    #[error("Failed to encode cache data for '{0}'")]
    Encode(PathBuf, #[source] CodecError),

    #[error("Failed to read cache file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to write cache file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to create cache directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),
}
