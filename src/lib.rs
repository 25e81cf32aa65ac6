//! A client for the ShopLogistics delivery API.
//!
//! Every remote call is an XML document posted (base64-encoded) to a single
//! endpoint, answered by an `<answer>` document. [`ApiClient`] takes care of
//! the round-trip; the domain APIs in [`services`] build on top of it.
//!
//! ```no_run
//! use shoplogistics::{ApiClass, ApiClient, Environment};
//!
//! # fn main() -> shoplogistics::Result<()> {
//! let client = ApiClient::factory("your-api-key", Environment::Prod)?;
//! let mut partners = client.partners();
//!
//! match partners.get_partners(405065, None)? {
//!     Some(found) => println!("{found}"),
//!     None => println!("lookup failed: {:?}", partners.last_error_code()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod transport;
pub mod xml;

pub use api::{Answer, ApiClass, ApiClient, ApiState};
pub use config::{ClientConfig, Credentials, Environment, TEST_API_KEY};
pub use error::{AnswerError, DecodeError, EncodeError, Error, Result, TransportError};
pub use services::SubApi;
pub use transport::{HttpTransport, Transport};
