//! Transport-agnostic HTTP response

use std::borrow::Cow;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::HeadersDict;

/// An HTTP response as reported by a backend, fully buffered.
///
/// `http_version` is `"{major}.{minor}"` (e.g. `"1.1"`) or empty when the
/// backend cannot report it. Headers are collapsed into a plain map, so the
/// last value seen for a repeated header name wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    http_version: String,
    status_code: u16,
    reason_phrase: String,
    #[serde(default)]
    headers: HeadersDict,
    #[serde(default)]
    content: Bytes,
}

impl Response {
    /// Create a response with no headers and an empty body
    pub fn new(
        http_version: impl Into<String>,
        status_code: u16,
        reason_phrase: impl Into<String>,
    ) -> Self {
        Self {
            http_version: http_version.into(),
            status_code,
            reason_phrase: reason_phrase.into(),
            headers: HeadersDict::new(),
            content: Bytes::new(),
        }
    }

    /// Replace the header map; later duplicates overwrite earlier ones
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

    /// Set the response body
    pub fn with_content(mut self, content: impl Into<Bytes>) -> Self {
        self.content = content.into();
        self
    }

    pub fn http_version(&self) -> &str {
        &self.http_version
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    pub fn headers(&self) -> &HeadersDict {
        &self.headers
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Look up a header by name, ignoring ASCII case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body decoded as UTF-8, with invalid sequences replaced
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}
