//! HTTP client contracts and backend adapters
//!
//! [`HttpClient`] and [`AsyncHttpClient`] are the only types calling code
//! needs to depend on. Each adapter wraps an already-configured client from
//! one HTTP library and translates [`Request`] and [`Response`] across the
//! boundary. Timeouts, TLS, proxies, pooling and retries stay with the
//! wrapped client.

pub mod version;

#[cfg(feature = "reqwest")]
pub mod reqwest;
#[cfg(feature = "ureq")]
pub mod ureq;

use std::future::Future;

use crate::models::{HeadersDict, Request, Response};

// Re-exports
pub use version::format_http_version;

#[cfg(feature = "reqwest")]
pub use self::reqwest::{AsyncReqwestClient, ReqwestClient};
#[cfg(feature = "ureq")]
pub use self::ureq::UreqClient;

/// Blocking HTTP client
pub trait HttpClient {
    /// Error produced when the request cannot be completed
    type Error;

    /// Send `request` and wait for the full response body
    fn request(&self, request: &Request) -> Result<Response, Self::Error>;
}

/// Non-blocking HTTP client
///
/// The returned future suspends the calling task only. Dropping it cancels
/// the call; adapters hold no buffered state of their own, so the wrapped
/// client stays usable afterwards.
pub trait AsyncHttpClient {
    type Error;

    fn request(
        &self,
        request: &Request,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    type Error = C::Error;

    fn request(&self, request: &Request) -> Result<Response, Self::Error> {
        (**self).request(request)
    }
}

impl<C: AsyncHttpClient + ?Sized> AsyncHttpClient for &C {
    type Error = C::Error;

    fn request(
        &self,
        request: &Request,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send {
        (**self).request(request)
    }
}

/// Materialize a header map into a plain map, last value wins
pub(crate) fn collect_headers(headers: &http::HeaderMap) -> HeadersDict {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

/// Reason phrase for a status code, empty when none is registered
pub(crate) fn reason_phrase(status: http::StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}
