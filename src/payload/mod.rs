use crate::error::ErrorKind;
use crate::Result;
use serde::Serialize;
use std::fmt::Formatter;
use std::io::{Cursor, Read};

#[cfg(test)]
mod tests;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const RAW_CONTENT_TYPE: &str = "text/plain";

/// The body of an outgoing request.
#[derive(Default)]
pub enum Payload {
    #[default]
    Empty,
    /// Sent as-is with `Content-Type: text/plain` and streamed without a length.
    Raw(Box<dyn Read + Send>),
    /// Already encoded JSON, sent with an explicit `Content-Length`.
    Json(Vec<u8>),
}

impl Payload {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Payload> {
        serde_json::to_vec(value)
            .map(Payload::Json)
            .map_err(|e| ErrorKind::Encode(e).into())
    }

    pub fn raw(bytes: impl Into<Vec<u8>>) -> Payload {
        Payload::Raw(Box::new(Cursor::new(bytes.into())))
    }

    pub fn reader(reader: impl Read + Send + 'static) -> Payload {
        Payload::Raw(Box::new(reader))
    }

    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Payload::Empty => None,
            Payload::Raw(_) => Some(RAW_CONTENT_TYPE),
            Payload::Json(_) => Some(JSON_CONTENT_TYPE),
        }
    }

    /// The exact body length, only known up front for JSON.
    pub fn content_length(&self) -> Option<usize> {
        match self {
            Payload::Json(bytes) => Some(bytes.len()),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Payload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Empty => f.write_str("Empty"),
            Payload::Raw(_) => f.write_str("Raw(..)"),
            Payload::Json(bytes) => f
                .debug_tuple("Json")
                .field(&String::from_utf8_lossy(bytes))
                .finish(),
        }
    }
}
