use crate::http_client::{BoxError, HttpClient, Request, Response};
use crate::payload::Payload;
use crate::ClientConfig;
use log::trace;
use reqwest::blocking::{Body, Client, RequestBuilder};

pub struct ReqwestHttpClient {
    client: Client,
}

impl HttpClient for ReqwestHttpClient {
    fn create(base_address: &str, config: &ClientConfig) -> Result<ReqwestHttpClient, BoxError>
    where
        Self: Sized,
    {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .tcp_keepalive(config.keep_alive)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs && is_https(base_address))
            .build()?;

        Ok(ReqwestHttpClient { client })
    }

    fn execute(&self, request: Request) -> Result<Response, BoxError> {
        let (parts, body) = request.into_parts();
        let url = parts.uri.to_string();
        trace!("sending a {} request to {}", parts.method, url);

        let mut request_builder = self.client.request(parts.method, &url).headers(parts.headers);
        request_builder = set_body(body, request_builder);
        let response = request_builder.send()?;

        trace!("got {} response from {}", response.status(), url);

        let mut response_builder = http::Response::builder()
            .version(response.version())
            .status(response.status());

        for (name, value) in response.headers() {
            response_builder = response_builder.header(name, value);
        }

        let body = response.bytes()?;

        Ok(response_builder.body(body.to_vec())?)
    }
}

pub(super) fn is_https(base_address: &str) -> bool {
    base_address
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https"))
}

fn set_body(body: Payload, request_builder: RequestBuilder) -> RequestBuilder {
    match body {
        Payload::Empty => request_builder,
        Payload::Raw(reader) => request_builder.body(Body::new(reader)),
        Payload::Json(bytes) => request_builder.body(bytes),
    }
}
