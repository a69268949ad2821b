//! The network capability used to reach the API.

pub mod error;
pub mod http_transport;

use crate::transport::error::TransportError;
use async_trait::async_trait;

/// One outgoing request: URL, method and `(name, value)` headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Performs a single fetch and returns the raw response body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Any network, timeout or HTTP status failure.
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>, TransportError>;
}
