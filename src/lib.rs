//! A blocking HTTP client wrapper for JSON APIs.
//!
//! [`RequestClient`] owns one pooled transport and exposes a helper per HTTP
//! verb. Every call injects the configured credentials, encodes the
//! [`Payload`], and either decodes a `200` body into the caller's type or
//! returns an [`Error`] whose [`ErrorKind`] says what went wrong.
//!
//! ```no_run
//! use json_http_client::{ClientConfig, Payload, RequestClient};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Echo {
//!     #[serde(rename = "DummyField")]
//!     dummy_field: String,
//! }
//!
//! # fn main() -> json_http_client::Result<()> {
//! let client = RequestClient::create("https://example.com", ClientConfig::default().with_debug())?;
//! client.set_bearer_token("SuperSecretToken");
//!
//! let input = Echo { dummy_field: String::from("a123456") };
//! let output: Echo = client.post("https://example.com/echo", Payload::json(&input)?)?;
//! assert_eq!(output.dummy_field, "a123456");
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

pub mod client;
pub mod error;
pub mod http_client;
pub mod payload;


pub use crate::client::{FromReply, Reply, RequestClient};
pub use crate::error::{Error, ErrorKind, RemoteError};
pub use crate::http_client::reqwest::ReqwestHttpClient;
pub use crate::http_client::HttpClient;
pub use crate::payload::Payload;
pub use http::Method;

pub type Result<T> = std::result::Result<T, Error>;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const KEEP_ALIVE: Duration = Duration::from_secs(30);

/// Settings fixed for the lifetime of a [`RequestClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Log every request and response through the `log` facade.
    pub debug: bool,
    /// Skip certificate verification for `https` base addresses.
    pub accept_invalid_certs: bool,
    /// Bounds DNS resolution, the TCP connect and the TLS handshake.
    pub connect_timeout: Duration,
    pub keep_alive: Duration,
    /// Upper bound on a whole exchange, from sending the request to the last
    /// byte of the body. `None` leaves slow bodies and uploads unbounded.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            debug: false,
            accept_invalid_certs: false,
            connect_timeout: CONNECT_TIMEOUT,
            keep_alive: KEEP_ALIVE,
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            ..Self::default()
        }
    }

    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }

    /// Disables certificate verification.
    ///
    /// Only use this against hosts you control, e.g. a development server with a
    /// self-signed certificate.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    pub fn with_timeout(mut self, timeout: impl Into<Option<Duration>>) -> Self {
        self.timeout = timeout.into();
        self
    }
}
