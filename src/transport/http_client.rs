use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::blocking::Client;
use tracing::{debug, trace};
use url::Url;

use super::Transport;
use crate::{config::ClientConfig, error::TransportError};

/// Posts request documents over HTTP(S) with a blocking `reqwest` client.
///
/// Redirects are followed and the whole body is buffered before returning.
/// There are no retries; a failed request is reported as-is.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        // The blocking client defaults to a 30 second timeout,
        // so "no timeout" has to be spelled out as `None`.
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::Client)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &Url, payload_field: &str, body: &[u8]) -> Result<Vec<u8>, TransportError> {
        // The API expects the whole document base64-encoded within a single form field.
        let encoded = STANDARD.encode(body);
        debug!(%url, payload_field, bytes = body.len(), "posting request");

        let response = self
            .client
            .post(url.clone())
            .form(&[(payload_field, encoded.as_str())])
            .send()
            .map_err(TransportError::Request)?;

        // We'll hold onto the body either way: on failure it usually explains why.
        let status = response.status();
        let contents = response.bytes().map_err(TransportError::Request)?;
        trace!(status = status.as_u16(), bytes = contents.len(), "received response");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&contents).into_owned(),
            });
        }

        Ok(contents.to_vec())
    }
}
