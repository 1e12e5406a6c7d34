//! Blocking WebSocket adapter over `tungstenite`

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

use http::HeaderMap;
use rustls::ClientConfig;
use tracing::{debug, trace, warn};
use tungstenite::client::connect_with_config;
use tungstenite::error::UrlError;
use tungstenite::handshake::client::{Request, Response};
use tungstenite::handshake::HandshakeError;
use tungstenite::protocol::WebSocketConfig;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{client_tls_with_config, Connector, Error, WebSocket};

use super::frame::{classify, ignore_closed, to_frame};
use super::handshake::handshake_request;
use super::{WebSocketClient, WebSocketConnection};
use crate::errors::WebSocketError;
use crate::models::Message;

/// Redirects followed during the opening handshake
const MAX_REDIRECTS: u8 = 3;

/// [`WebSocketClient`] that opens sockets with `tungstenite`
///
/// Without a TLS config, connections go through
/// `tungstenite::client::connect_with_config`, which follows redirects and
/// uses tungstenite's default connector for `wss://`. With one, the TCP
/// stream is opened here and wrapped with the given rustls config; no
/// redirects are followed.
#[derive(Debug, Clone, Default)]
pub struct TungsteniteClient {
    config: WebSocketConfig,
    tls: Option<Arc<ClientConfig>>,
    headers: HeaderMap,
}

impl TungsteniteClient {
    pub fn new(config: WebSocketConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Use `tls` for `wss://` connections
    pub fn with_tls(mut self, tls: Arc<ClientConfig>) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Send `headers` with every opening handshake
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// The protocol configuration applied to every connection
    pub fn config(&self) -> &WebSocketConfig {
        &self.config
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn tls(&self) -> Option<&Arc<ClientConfig>> {
        self.tls.as_ref()
    }

    fn open(&self, url: &str) -> Result<(WebSocket<MaybeTlsStream<TcpStream>>, Response), Error> {
        let request = handshake_request(url, &self.headers)?;
        match &self.tls {
            None => connect_with_config(request, Some(self.config), MAX_REDIRECTS),
            Some(tls) => self.open_with_tls(request, tls.clone()),
        }
    }

    fn open_with_tls(
        &self,
        request: Request,
        tls: Arc<ClientConfig>,
    ) -> Result<(WebSocket<MaybeTlsStream<TcpStream>>, Response), Error> {
        let uri = request.uri();
        let host = uri
            .host()
            .ok_or(Error::Url(UrlError::NoHostName))?
            .trim_start_matches('[')
            .trim_end_matches(']');
        let port = uri.port_u16().unwrap_or(match uri.scheme_str() {
            Some("wss") => 443,
            _ => 80,
        });
        let stream = TcpStream::connect((host, port))?;

        client_tls_with_config(
            request,
            stream,
            Some(self.config),
            Some(Connector::Rustls(tls)),
        )
        .map_err(|err| match err {
            HandshakeError::Failure(err) => err,
            // Blocking streams never interrupt the handshake
            HandshakeError::Interrupted(_) => Error::Io(io::ErrorKind::WouldBlock.into()),
        })
    }
}

impl From<WebSocketConfig> for TungsteniteClient {
    fn from(config: WebSocketConfig) -> Self {
        Self::new(config)
    }
}

impl WebSocketClient for TungsteniteClient {
    type Connection = TungsteniteConnection<MaybeTlsStream<TcpStream>>;
    type Error = WebSocketError<Error>;

    fn connect<T, E, F>(&self, url: &str, scope: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self::Connection) -> Result<T, E>,
        E: From<Self::Error>,
    {
        debug!(url = %url, backend = "tungstenite", tls = self.tls.is_some(), "Opening WebSocket");

        let (socket, response) = self.open(url).map_err(WebSocketError::Backend)?;
        trace!(status = response.status().as_u16(), "WebSocket handshake complete");

        let mut connection = TungsteniteConnection::new(socket);
        let result = scope(&mut connection);
        let closed = connection.close();

        match (result, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) => Err(E::from(err)),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                warn!(error = %close_err, "WebSocket close failed after scope error");
                Err(err)
            }
        }
    }
}

/// A blocking WebSocket connection over any `Read + Write` stream
pub struct TungsteniteConnection<S: Read + Write> {
    socket: WebSocket<S>,
}

impl<S: Read + Write> TungsteniteConnection<S> {
    /// Wrap a socket whose handshake has already completed
    pub fn new(socket: WebSocket<S>) -> Self {
        Self { socket }
    }

    pub fn get_ref(&self) -> &WebSocket<S> {
        &self.socket
    }

    /// Start the close handshake and flush the close frame
    fn close(&mut self) -> Result<(), WebSocketError<Error>> {
        debug!("Closing WebSocket");
        ignore_closed(self.socket.close(None))?;
        Ok(())
    }
}

impl<S: Read + Write> WebSocketConnection for TungsteniteConnection<S> {
    type Error = WebSocketError<Error>;

    fn send(&mut self, message: Message) -> Result<(), Self::Error> {
        trace!(kind = message.type_name(), bytes = message.as_bytes().len(), "Sending frame");
        self.socket.send(to_frame(message))?;
        Ok(())
    }

    fn receive(&mut self) -> Result<Message, Self::Error> {
        let frame = self.socket.read()?;
        trace!(bytes = frame.len(), "Frame received");
        classify(frame)
    }
}

impl<S: Read + Write> Drop for TungsteniteConnection<S> {
    fn drop(&mut self) {
        // Still writable here only if close() never ran, e.g. the scope panicked
        if self.socket.can_write() {
            if let Err(err) = ignore_closed(self.socket.close(None)) {
                debug!(error = %err, "WebSocket close on drop failed");
            }
        }
    }
}

impl<S: Read + Write> std::fmt::Debug for TungsteniteConnection<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TungsteniteConnection")
            .field("can_write", &self.socket.can_write())
            .finish()
    }
}
