use crate::transport::error::TransportError;
use crate::transport::{FetchRequest, Transport};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`Transport`] over HTTP(S) with `reqwest`.
///
/// Connecting is bounded by a 10 second timeout; the response itself is not.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// [`TransportError::ClientBuild`] if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(TransportError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Uses an existing client as is.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TransportError::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| TransportError::InvalidHeader(name.clone()))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>, TransportError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| TransportError::InvalidMethod(request.method.clone()))?;
        let headers = Self::header_map(&request.headers)?;

        let response = self
            .client
            .request(method, &request.url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| TransportError::NetworkRequest(request.url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error status {:?} from remote service", e.status());
                return Err(if let Some(status) = e.status() {
                    TransportError::HttpStatus {
                        url: request.url.clone(),
                        status,
                        source: e,
                    }
                } else {
                    TransportError::NetworkRequest(request.url.clone(), e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::NetworkRequest(request.url.clone(), e))?;
        debug!("Received {} bytes from remote service", body.len());
        Ok(body.to_vec())
    }
}
