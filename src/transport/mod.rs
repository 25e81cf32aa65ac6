//! Getting request documents to the service and raw answers back.

mod http_client;

use url::Url;

use crate::error::TransportError;

pub use http_client::HttpTransport;

/// Form field the encoded request document travels in.
pub const PAYLOAD_FIELD: &str = "xml";

/// Something able to deliver a request document to the API.
///
/// Implementations post `body` base64-encoded within the form field
/// `payload_field`, and hand back the response body untouched.
pub trait Transport: Send + Sync {
    fn post(&self, url: &Url, payload_field: &str, body: &[u8]) -> Result<Vec<u8>, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&Url, &str, &[u8]) -> Result<Vec<u8>, TransportError> + Send + Sync,
{
    fn post(&self, url: &Url, payload_field: &str, body: &[u8]) -> Result<Vec<u8>, TransportError> {
        self(url, payload_field, body)
    }
}
