//! Blocking adapter over a pooled `ureq::Agent`
//!
//! The agent owns the connection pool and all transport configuration.
//! Note that ureq reports 4xx/5xx statuses as errors by default; build the
//! agent with `http_status_as_error(false)` to receive them as responses.

use tracing::{debug, trace};
use ureq::Agent;

use super::{collect_headers, format_http_version, reason_phrase, HttpClient};
use crate::errors::HttpError;
use crate::models::{Request, Response};

/// [`HttpClient`] backed by a `ureq::Agent`
#[derive(Debug, Clone)]
pub struct UreqClient {
    agent: Agent,
}

impl UreqClient {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }

    /// The wrapped agent
    pub fn inner(&self) -> &Agent {
        &self.agent
    }
}

impl From<Agent> for UreqClient {
    fn from(agent: Agent) -> Self {
        Self::new(agent)
    }
}

impl HttpClient for UreqClient {
    type Error = HttpError<ureq::Error>;

    fn request(&self, request: &Request) -> Result<Response, Self::Error> {
        debug!(method = %request.method(), url = %request.url(), backend = "ureq", "Sending request");

        let mut builder = http::Request::builder()
            .method(request.method())
            .uri(request.url());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        // ureq refuses a body on GET/HEAD, so empty content goes out as no body
        let response = if request.content().is_empty() {
            self.agent.run(builder.body(())?)
        } else {
            self.agent.run(builder.body(request.content().to_vec())?)
        }
        .map_err(HttpError::Backend)?;
        let (parts, mut body) = response.into_parts();
        // read_to_vec() alone stops at ureq's 10 MiB default
        let content = body
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(HttpError::Backend)?;

        trace!(status = parts.status.as_u16(), bytes = content.len(), "Response received");

        Ok(Response::new(
            format_http_version(parts.version),
            parts.status.as_u16(),
            reason_phrase(parts.status),
        )
        .with_headers(collect_headers(&parts.headers))
        .with_content(content))
    }
}
