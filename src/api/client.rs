use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use tracing::{debug, trace};
use url::Url;

use super::Answer;
use crate::{
    config::{ClientConfig, Credentials, Environment},
    error::{AnswerError, Error, Result},
    services::{self, Delivery, Dictionary, MailDelivery, Partners, Pickup, Products, SubApi},
    transport::{HttpTransport, Transport, PAYLOAD_FIELD},
    xml::{self, Args},
};

/// The client shared through [`ApiClient::factory`].
/// At most one lives at a time: the one for the most recently requested key.
static SHARED: Mutex<Option<Arc<ApiClient>>> = Mutex::new(None);

/// Calls remote methods of the ShopLogistics API on behalf of a single API key.
pub struct ApiClient {
    credentials: Credentials,
    /// Where requests are posted.
    endpoint: Url,
    transport: Box<dyn Transport>,
}

impl ApiClient {
    /// Creates a client with the default HTTP configuration.
    pub fn new(api_key: impl Into<String>, environment: Environment) -> Result<Self> {
        Self::with_config(
            Credentials::new(api_key, environment)?,
            ClientConfig::default(),
        )
    }

    /// Creates a client posting over HTTP with the given options.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config).map_err(Error::Client)?;
        let endpoint = config.endpoint_for(credentials.environment());
        Ok(Self::with_transport(credentials, endpoint, transport))
    }

    /// Creates a client delivering requests through a custom transport.
    pub fn with_transport(
        credentials: Credentials,
        endpoint: Url,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            credentials,
            endpoint,
            transport: Box::new(transport),
        }
    }

    /// Returns the process-wide client for `api_key`.
    ///
    /// Asking again with the same key hands back the same client. Asking with
    /// a different key replaces it, so the previous client is no longer
    /// reachable from here. The environment does not take part in this
    /// comparison: the first one requested for a key sticks.
    pub fn factory(api_key: &str, environment: Environment) -> Result<Arc<Self>> {
        if api_key.is_empty() {
            return Err(Error::invalid("API key must not be empty"));
        }

        // Nothing can be left half-updated behind the lock, so a poisoned
        // lock is as good as a healthy one.
        let mut shared = SHARED.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = shared.as_ref() {
            if client.api_key() == api_key {
                return Ok(Arc::clone(client));
            }
        }

        debug!(%environment, "creating shared API client");
        let client = Arc::new(Self::new(api_key, environment)?);
        *shared = Some(Arc::clone(&client));
        Ok(client)
    }

    /// Calls `method` with `args` and decodes the service's answer.
    ///
    /// An empty method name is rejected before anything is sent. Failures
    /// to deliver the request or make sense of the response all surface as
    /// [`Error::Answer`].
    pub fn call_method(&self, method: &str, args: &Args) -> Result<Answer> {
        if method.is_empty() {
            return Err(Error::invalid("method name must not be empty"));
        }

        Ok(self.request_answer(method, args)?)
    }

    fn request_answer(&self, method: &str, args: &Args) -> std::result::Result<Answer, AnswerError> {
        let request = xml::encode(method, self.credentials.api_key(), args)?;
        debug!(method, endpoint = %self.endpoint, "calling API method");
        trace!(method, args = ?args.keys().collect::<Vec<_>>(), "encoded request");

        let body = self
            .transport
            .post(&self.endpoint, PAYLOAD_FIELD, request.as_bytes())?;
        trace!(method, body = %String::from_utf8_lossy(&body), "raw answer");

        Self::parse_answer(&body)
    }

    /// Decodes a raw response body into an [`Answer`].
    ///
    /// The document must be rooted at `<answer>`.
    pub fn parse_answer(body: &[u8]) -> std::result::Result<Answer, AnswerError> {
        let mut decoded = xml::decode_bytes(body)?;
        let answer = decoded
            .get_mut("answer")
            .map(serde_json::Value::take)
            .ok_or(AnswerError::EmptyAnswer)?;

        Answer::new(answer)
    }

    /// Returns the sub-API registered under `name`.
    ///
    /// Unknown names yield `None`; only an empty name is an error.
    pub fn get(self: &Arc<Self>, name: &str) -> Result<Option<SubApi>> {
        if name.is_empty() {
            return Err(Error::invalid("API class name must not be empty"));
        }

        Ok(services::construct(name, Arc::clone(self)))
    }

    pub fn delivery(self: &Arc<Self>) -> Delivery {
        Delivery::new(Arc::clone(self))
    }

    pub fn dictionary(self: &Arc<Self>) -> Dictionary {
        Dictionary::new(Arc::clone(self))
    }

    pub fn mail_delivery(self: &Arc<Self>) -> MailDelivery {
        MailDelivery::new(Arc::clone(self))
    }

    pub fn partners(self: &Arc<Self>) -> Partners {
        Partners::new(Arc::clone(self))
    }

    pub fn pickup(self: &Arc<Self>) -> Pickup {
        Pickup::new(Arc::clone(self))
    }

    pub fn products(self: &Arc<Self>) -> Products {
        Products::new(Arc::clone(self))
    }

    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    pub fn environment(&self) -> Environment {
        self.credentials.environment()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("credentials", &self.credentials)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}
