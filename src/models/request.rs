//! Transport-agnostic HTTP request

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::HeadersDict;

/// An HTTP request described as plain data.
///
/// Values are immutable once built: the `with_*` methods consume the request
/// and return a new one. Headers default to an empty map and content to an
/// empty body, so `Request::new(method, url)` is always a complete request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    method: String,
    url: String,
    #[serde(default)]
    headers: HeadersDict,
    #[serde(default)]
    content: Bytes,
}

impl Request {
    /// Create a request with no headers and an empty body
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HeadersDict::new(),
            content: Bytes::new(),
        }
    }

    /// Add one header, replacing any earlier value under the same name
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the whole header map
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers = headers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Set the request body
    pub fn with_content(mut self, content: impl Into<Bytes>) -> Self {
        self.content = content.into();
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Headers in insertion order
    pub fn headers(&self) -> &HeadersDict {
        &self.headers
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}
