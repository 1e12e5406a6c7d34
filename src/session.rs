//! Session backend: HTTP and WebSocket from one configured handle
//!
//! A [`Session`] (blocking) or [`AsyncSession`] pairs a reqwest client with
//! a tungstenite client built from the same [`SessionBuilder`], so default
//! headers and the rustls configuration apply to requests and WebSocket
//! handshakes alike. Each session implements both the HTTP and the
//! WebSocket contract.

use std::ops::AsyncFnOnce;
use std::sync::Arc;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use rustls::ClientConfig;
use tracing::debug;
use tungstenite::protocol::WebSocketConfig;

use crate::client::{AsyncHttpClient, AsyncReqwestClient, HttpClient, ReqwestClient};
use crate::errors::{HttpError, WebSocketError};
use crate::models::{Request, Response};
use crate::websocket::{
    AsyncWebSocketClient, TokioTungsteniteClient, TungsteniteClient, WebSocketClient,
};

/// Shared settings for a [`Session`] or [`AsyncSession`]
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    headers: HeaderMap,
    tls: Option<Arc<ClientConfig>>,
    websocket: WebSocketConfig,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `name: value` with every request and handshake
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Add several default headers at once
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// TLS configuration for `https://` and `wss://`
    pub fn tls(mut self, tls: Arc<ClientConfig>) -> Self {
        self.tls = Some(tls);
        self
    }

    pub fn websocket_config(mut self, config: WebSocketConfig) -> Self {
        self.websocket = config;
        self
    }

    /// Build a blocking session.
    ///
    /// Like `reqwest::blocking::Client`, this must not be called from
    /// inside an async runtime.
    pub fn build(self) -> Result<Session, reqwest::Error> {
        let mut http = reqwest::blocking::Client::builder().default_headers(self.headers.clone());
        if let Some(tls) = &self.tls {
            http = http.tls_backend_preconfigured(ClientConfig::clone(tls));
        }
        let http = http.build()?;

        let mut websocket = TungsteniteClient::new(self.websocket).with_headers(self.headers.clone());
        if let Some(tls) = self.tls.clone() {
            websocket = websocket.with_tls(tls);
        }

        debug!(headers = self.headers.len(), tls = self.tls.is_some(), "Blocking session built");
        Ok(Session::new(http, websocket))
    }

    /// Build an async session
    pub fn build_async(self) -> Result<AsyncSession, reqwest::Error> {
        let mut http = reqwest::Client::builder().default_headers(self.headers.clone());
        if let Some(tls) = &self.tls {
            http = http.tls_backend_preconfigured(ClientConfig::clone(tls));
        }
        let http = http.build()?;

        let mut websocket =
            TokioTungsteniteClient::new(self.websocket).with_headers(self.headers.clone());
        if let Some(tls) = self.tls.clone() {
            websocket = websocket.with_tls(tls);
        }

        debug!(headers = self.headers.len(), tls = self.tls.is_some(), "Async session built");
        Ok(AsyncSession::new(http, websocket))
    }
}

/// Blocking session over `reqwest::blocking::Client` and [`TungsteniteClient`]
#[derive(Debug, Clone)]
pub struct Session {
    http: ReqwestClient,
    websocket: TungsteniteClient,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Pair handles configured elsewhere
    pub fn new(http: reqwest::blocking::Client, websocket: TungsteniteClient) -> Self {
        Self {
            http: ReqwestClient::new(http),
            websocket,
        }
    }

    pub fn http(&self) -> &ReqwestClient {
        &self.http
    }

    pub fn websocket(&self) -> &TungsteniteClient {
        &self.websocket
    }
}

impl HttpClient for Session {
    type Error = HttpError<reqwest::Error>;

    fn request(&self, request: &Request) -> Result<Response, Self::Error> {
        self.http.request(request)
    }
}

impl WebSocketClient for Session {
    type Connection = <TungsteniteClient as WebSocketClient>::Connection;
    type Error = WebSocketError<tungstenite::Error>;

    fn connect<T, E, F>(&self, url: &str, scope: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self::Connection) -> Result<T, E>,
        E: From<Self::Error>,
    {
        self.websocket.connect(url, scope)
    }
}

/// Async session over `reqwest::Client` and [`TokioTungsteniteClient`]
#[derive(Debug, Clone)]
pub struct AsyncSession {
    http: AsyncReqwestClient,
    websocket: TokioTungsteniteClient,
}

impl AsyncSession {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Pair handles configured elsewhere
    pub fn new(http: reqwest::Client, websocket: TokioTungsteniteClient) -> Self {
        Self {
            http: AsyncReqwestClient::new(http),
            websocket,
        }
    }

    pub fn http(&self) -> &AsyncReqwestClient {
        &self.http
    }

    pub fn websocket(&self) -> &TokioTungsteniteClient {
        &self.websocket
    }
}

impl AsyncHttpClient for AsyncSession {
    type Error = HttpError<reqwest::Error>;

    async fn request(&self, request: &Request) -> Result<Response, Self::Error> {
        self.http.request(request).await
    }
}

impl AsyncWebSocketClient for AsyncSession {
    type Connection = <TokioTungsteniteClient as AsyncWebSocketClient>::Connection;
    type Error = WebSocketError<tungstenite::Error>;

    async fn connect<T, E, F>(&self, url: &str, scope: F) -> Result<T, E>
    where
        F: AsyncFnOnce(&mut Self::Connection) -> Result<T, E>,
        E: From<Self::Error>,
    {
        self.websocket.connect(url, scope).await
    }
}
