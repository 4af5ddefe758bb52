use crate::http_client::BoxError;
use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Formatter;


#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
}

#[derive(Debug)]
pub enum ErrorKind {
    /// The target was not an absolute URL. Nothing was sent.
    Parse {
        url: String,
        source: url::ParseError,
    },
    /// The request could not be assembled, e.g. a credential holding bytes
    /// that are not allowed in a header value.
    InvalidRequest(http::Error),
    Encode(serde_json::Error),
    /// The transport could not be constructed.
    Build(BoxError),
    /// No HTTP status was obtained: DNS, connect, TLS, timeout or a broken body.
    Transport {
        method: Method,
        url: String,
        source: BoxError,
    },
    /// The server answered with anything but `200`.
    Remote(RemoteError),
    /// A `200` body could not be decoded into the requested type.
    Decode {
        url: String,
        body: String,
        source: serde_json::Error,
    },
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The HTTP status behind this error, `0` when none was received.
    pub fn status(&self) -> u16 {
        match &self.kind {
            ErrorKind::Remote(error) => error.status,
            ErrorKind::Decode { .. } => StatusCode::OK.as_u16(),
            _ => 0,
        }
    }

    pub fn remote(&self) -> Option<&RemoteError> {
        match &self.kind {
            ErrorKind::Remote(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self.kind, ErrorKind::Parse { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport { .. })
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.kind, ErrorKind::Remote(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self.kind, ErrorKind::Decode { .. })
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Parse { source, .. } => Some(source),
            ErrorKind::InvalidRequest(e) => Some(e),
            ErrorKind::Encode(e) => Some(e),
            ErrorKind::Build(e) => Some(&**e),
            ErrorKind::Transport { source, .. } => Some(&**source),
            ErrorKind::Remote(e) => Some(e),
            ErrorKind::Decode { source, .. } => Some(source),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ErrorKind::Parse { url, source } => {
                f.write_fmt(format_args!("Invalid url {:?}: {}", url, source))
            }
            ErrorKind::InvalidRequest(e) => f.write_fmt(format_args!("Http Request Error: {}", e)),
            ErrorKind::Encode(e) => {
                f.write_fmt(format_args!("Could not encode the request body: {}", e))
            }
            ErrorKind::Build(e) => {
                f.write_fmt(format_args!("Could not build the http client: {}", e))
            }
            ErrorKind::Transport {
                method,
                url,
                source,
            } => f.write_fmt(format_args!("{} {} failed: {}", method, url, source)),
            ErrorKind::Remote(e) => std::fmt::Display::fmt(e, f),
            ErrorKind::Decode { url, source, .. } => f.write_fmt(format_args!(
                "Could not decode the response from {}: {}",
                url, source
            )),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error { kind }
    }
}

impl From<RemoteError> for Error {
    fn from(error: RemoteError) -> Self {
        ErrorKind::Remote(error).into()
    }
}

/// The error a server reports alongside a non-`200` status.
///
/// Serializes to `{"error_type", "error_code", "error_description"}`; the
/// status travels on the status line and is never part of the body.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteError {
    #[serde(skip)]
    pub status: u16,
    pub error_type: String,
    pub error_code: i64,
    pub error_description: String,
}

impl RemoteError {
    /// Builds the error for `status` from whatever `body` holds.
    ///
    /// Fields that are missing or carry the wrong JSON type keep their default,
    /// and a body that is not a JSON object yields an otherwise empty error.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let mut error = RemoteError {
            status,
            ..RemoteError::default()
        };
        let fields = match serde_json::from_slice(body) {
            Ok(Value::Object(fields)) => fields,
            _ => return error,
        };
        if let Some(Value::String(error_type)) = fields.get("error_type") {
            error.error_type = error_type.clone();
        }
        if let Some(error_code) = fields.get("error_code").and_then(Value::as_i64) {
            error.error_code = error_code;
        }
        if let Some(Value::String(description)) = fields.get("error_description") {
            error.error_description = description.clone();
        }
        error
    }
}

impl std::error::Error for RemoteError {}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{}: [{}] {}",
            self.status, self.error_code, self.error_description
        ))
    }
}
