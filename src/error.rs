use thiserror::Error;

/// Failures while talking HTTP to the service.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying HTTP client could not be built.
    #[error("unable to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// Connection failures, timeouts, and body read errors.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    /// The service answered with a non-2xx status.
    /// We keep the body around, as it usually says what went wrong.
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },
}

/// The response body was not usable XML.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("response is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// The request document could not be written.
#[derive(Debug, Error)]
#[error("unable to encode request: {0}")]
pub struct EncodeError(pub String);

/// Anything that prevented us from obtaining a usable [`Answer`](crate::Answer).
///
/// Sub-APIs swallow this and report failure through their return values.
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("empty data answer")]
    EmptyAnswer,
}

/// Possible errors while working with the ShopLogistics API.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was missing or malformed.
    /// Raised before any network activity happens.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    /// The client itself could not be set up.
    #[error(transparent)]
    Client(TransportError),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
