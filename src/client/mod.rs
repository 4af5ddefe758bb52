use crate::error::{ErrorKind, RemoteError};
use crate::http_client::reqwest::ReqwestHttpClient;
use crate::http_client::{HttpClient, Request};
use crate::payload::Payload;
use crate::{ClientConfig, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use http::{Method, StatusCode};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::sync::{PoisonError, RwLock};
use url::Url;


#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Credentials {
    bearer_token: String,
    username: String,
    password: String,
}

/// A JSON-over-HTTP client bound to one pooled transport.
///
/// Credentials can be changed while other threads are sending; every request
/// works from a snapshot taken before it is built.
pub struct RequestClient<C: HttpClient = ReqwestHttpClient> {
    base_address: String,
    config: ClientConfig,
    credentials: RwLock<Credentials>,
    client: C,
}

impl RequestClient<ReqwestHttpClient> {
    pub fn new(base_address: &str) -> Result<Self> {
        Self::create(base_address, ClientConfig::default())
    }

    pub fn create(base_address: &str, config: ClientConfig) -> Result<Self> {
        let client =
            ReqwestHttpClient::create(base_address, &config).map_err(ErrorKind::Build)?;
        Ok(Self::with_transport(base_address, config, client))
    }
}

impl<C: HttpClient> RequestClient<C> {
    pub fn with_transport(base_address: &str, config: ClientConfig, client: C) -> Self {
        RequestClient {
            base_address: base_address.to_string(),
            config,
            credentials: RwLock::new(Credentials::default()),
            client,
        }
    }

    /// The address given at creation. Request URLs are never resolved against it.
    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends `Authorization: Bearer <token>` from now on, or nothing once `token` is empty.
    pub fn set_bearer_token(&self, token: impl Into<String>) {
        self.update_credentials(|credentials| credentials.bearer_token = token.into());
    }

    /// Sends HTTP Basic credentials from now on, or nothing once both are empty.
    ///
    /// Basic auth is applied after the bearer token and replaces it when both are set.
    pub fn set_basic_auth(&self, username: impl Into<String>, password: impl Into<String>) {
        self.update_credentials(|credentials| {
            credentials.username = username.into();
            credentials.password = password.into();
        });
    }

    pub fn clear_credentials(&self) {
        self.update_credentials(|credentials| *credentials = Credentials::default());
    }

    pub fn get<T: FromReply>(&self, url: &str) -> Result<T> {
        T::from_reply(self.execute(Method::GET, url, Payload::Empty)?)
    }

    pub fn post<T: FromReply>(&self, url: &str, payload: Payload) -> Result<T> {
        T::from_reply(self.execute(Method::POST, url, payload)?)
    }

    pub fn put<T: FromReply>(&self, url: &str, payload: Payload) -> Result<T> {
        T::from_reply(self.execute(Method::PUT, url, payload)?)
    }

    pub fn patch<T: FromReply>(&self, url: &str, payload: Payload) -> Result<T> {
        T::from_reply(self.execute(Method::PATCH, url, payload)?)
    }

    pub fn delete<T: FromReply>(&self, url: &str, payload: Payload) -> Result<T> {
        T::from_reply(self.execute(Method::DELETE, url, payload)?)
    }

    /// Performs one request and returns the body of a `200` response undecoded.
    ///
    /// Dropping the [`Reply`] discards the body, which has already been read in
    /// full. Any other status is returned as [`ErrorKind::Remote`].
    pub fn execute(&self, method: Method, url: &str, payload: Payload) -> Result<Reply> {
        let target = Url::parse(url).map_err(|source| ErrorKind::Parse {
            url: url.to_string(),
            source,
        })?;

        if self.config.debug {
            match &payload {
                Payload::Json(bytes) => debug!(
                    "Request {} to {}, data: {}",
                    method,
                    target,
                    String::from_utf8_lossy(bytes)
                ),
                Payload::Raw(_) => debug!("Request {} to {}, data: <raw stream>", method, target),
                Payload::Empty => debug!("Request {} to {}", method, target),
            }
        }

        let request = self.build_request(&method, &target, payload)?;

        let response = match self.client.execute(request) {
            Ok(response) => response,
            Err(source) => {
                if self.config.debug {
                    warn!("Request {} to {} failed: {}", method, target, source);
                }
                return Err(ErrorKind::Transport {
                    method,
                    url: target.to_string(),
                    source,
                }
                .into());
            }
        };

        let (parts, body) = response.into_parts();

        if parts.status != StatusCode::OK {
            let error = RemoteError::from_body(parts.status.as_u16(), &body);
            if self.config.debug {
                warn!(
                    "Response http error status {} from {}, data: {}",
                    parts.status,
                    target,
                    String::from_utf8_lossy(&body)
                );
            }
            return Err(error.into());
        }

        if self.config.debug {
            debug!(
                "Response status {} from {}, data: {}",
                parts.status,
                target,
                String::from_utf8_lossy(&body)
            );
        }

        Ok(Reply {
            url: target.to_string(),
            headers: parts.headers,
            body,
            debug: self.config.debug,
        })
    }

    fn build_request(&self, method: &Method, target: &Url, payload: Payload) -> Result<Request> {
        let credentials = self.credentials();
        let mut headers = HeaderMap::new();

        if !credentials.bearer_token.is_empty() {
            let token = format!("Bearer {}", credentials.bearer_token);
            headers.insert(AUTHORIZATION, sensitive_header(&token)?);
        }

        if !credentials.username.is_empty() || !credentials.password.is_empty() {
            let encoded = STANDARD.encode(format!(
                "{}:{}",
                credentials.username, credentials.password
            ));
            headers.insert(
                AUTHORIZATION,
                sensitive_header(&format!("Basic {}", encoded))?,
            );
        }

        if let Some(content_type) = payload.content_type() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }

        if let Some(content_length) = payload.content_length() {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(content_length));
        }

        let mut request = http::Request::builder()
            .method(method.clone())
            .uri(target.as_str())
            .body(payload)
            .map_err(ErrorKind::InvalidRequest)?;
        *request.headers_mut() = headers;

        Ok(request)
    }

    fn credentials(&self) -> Credentials {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update_credentials(&self, update: impl FnOnce(&mut Credentials)) {
        let mut credentials = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        update(&mut credentials);
    }
}

fn sensitive_header(value: &str) -> Result<HeaderValue> {
    let mut value =
        HeaderValue::from_str(value).map_err(|e| ErrorKind::InvalidRequest(e.into()))?;
    value.set_sensitive(true);
    Ok(value)
}

/// What a verb helper turns a `200` response into.
///
/// Any deserializable type decodes the body as JSON. Asking for the [`Reply`]
/// itself skips decoding, so an empty or non-JSON body still succeeds:
///
/// ```no_run
/// # use json_http_client::{Payload, Reply, RequestClient};
/// # fn main() -> json_http_client::Result<()> {
/// let client = RequestClient::new("https://example.com")?;
/// let _: Reply = client.delete("https://example.com/items/1", Payload::Empty)?;
/// # Ok(())
/// # }
/// ```
pub trait FromReply: Sized {
    fn from_reply(reply: Reply) -> Result<Self>;
}

impl<T: DeserializeOwned> FromReply for T {
    fn from_reply(reply: Reply) -> Result<T> {
        reply.json()
    }
}

impl FromReply for Reply {
    fn from_reply(reply: Reply) -> Result<Reply> {
        Ok(reply)
    }
}

/// The fully read body of a `200` response.
#[derive(Debug)]
pub struct Reply {
    url: String,
    headers: HeaderMap,
    body: Vec<u8>,
    debug: bool,
}

impl Reply {
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Decodes the body, reporting malformed JSON as [`ErrorKind::Decode`].
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|source| {
            let body = String::from_utf8_lossy(&self.body).into_owned();
            if self.debug {
                warn!(
                    "Response json decoding error from {}, data: {} err: {}",
                    self.url, body, source
                );
            }
            ErrorKind::Decode {
                url: self.url.clone(),
                body,
                source,
            }
            .into()
        })
    }
}
