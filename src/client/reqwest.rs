//! Adapters over `reqwest`, blocking and async
//!
//! Both adapters translate requests the same way; they differ only in which
//! reqwest client performs the call.

use reqwest::Method;
use tracing::{debug, trace};

use super::{collect_headers, format_http_version, reason_phrase, AsyncHttpClient, HttpClient};
use crate::errors::HttpError;
use crate::models::{Request, Response};

fn parse_method(request: &Request) -> Result<Method, HttpError<reqwest::Error>> {
    Method::from_bytes(request.method().as_bytes())
        .map_err(|e| HttpError::InvalidRequest(http::Error::from(e)))
}

/// [`HttpClient`] backed by `reqwest::blocking::Client`
///
/// The blocking client runs its own runtime internally; do not call it from
/// inside an async task.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &reqwest::blocking::Client {
        &self.client
    }
}

impl From<reqwest::blocking::Client> for ReqwestClient {
    fn from(client: reqwest::blocking::Client) -> Self {
        Self::new(client)
    }
}

impl HttpClient for ReqwestClient {
    type Error = HttpError<reqwest::Error>;

    fn request(&self, request: &Request) -> Result<Response, Self::Error> {
        debug!(method = %request.method(), url = %request.url(), backend = "reqwest-blocking", "Sending request");

        let mut builder = self.client.request(parse_method(request)?, request.url());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder
            .body(request.content().to_vec())
            .send()
            .map_err(HttpError::Backend)?;

        let http_version = format_http_version(response.version());
        let status = response.status();
        let headers = collect_headers(response.headers());
        let content = response.bytes().map_err(HttpError::Backend)?;

        trace!(status = status.as_u16(), bytes = content.len(), "Response received");

        Ok(Response::new(http_version, status.as_u16(), reason_phrase(status))
            .with_headers(headers)
            .with_content(content))
    }
}

/// [`AsyncHttpClient`] backed by `reqwest::Client`
#[derive(Debug, Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }
}

impl From<reqwest::Client> for AsyncReqwestClient {
    fn from(client: reqwest::Client) -> Self {
        Self::new(client)
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    type Error = HttpError<reqwest::Error>;

    async fn request(&self, request: &Request) -> Result<Response, Self::Error> {
        debug!(method = %request.method(), url = %request.url(), backend = "reqwest", "Sending request");

        let mut builder = self.client.request(parse_method(request)?, request.url());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder
            .body(request.content().clone())
            .send()
            .await
            .map_err(HttpError::Backend)?;

        let http_version = format_http_version(response.version());
        let status = response.status();
        let headers = collect_headers(response.headers());
        let content = response.bytes().await.map_err(HttpError::Backend)?;

        trace!(status = status.as_u16(), bytes = content.len(), "Response received");

        Ok(Response::new(http_version, status.as_u16(), reason_phrase(status))
            .with_headers(headers)
            .with_content(content))
    }
}
