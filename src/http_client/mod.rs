use crate::payload::Payload;
use crate::ClientConfig;


pub mod reqwest;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Request = http::Request<Payload>;

pub type Response = http::Response<Vec<u8>>;

/// The pooled transport a [`RequestClient`](crate::RequestClient) sends through.
///
/// One instance serves every call of a client, possibly from several threads at
/// once. `execute` reads the whole response body before returning so the
/// underlying connection is released on every path.
pub trait HttpClient {
    fn create(base_address: &str, config: &ClientConfig) -> Result<Self, BoxError>
    where
        Self: Sized;

    fn execute(&self, request: Request) -> Result<Response, BoxError>;
}
