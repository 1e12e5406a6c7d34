//! Async WebSocket adapter over `tokio-tungstenite`

use std::ops::AsyncFnOnce;
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use http::HeaderMap;
use rustls::ClientConfig;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::tungstenite::Error;
use tokio_tungstenite::{connect_async_tls_with_config, Connector, MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace, warn};

use super::frame::{classify, ignore_closed, to_frame};
use super::handshake::handshake_request;
use super::{AsyncWebSocketClient, AsyncWebSocketConnection};
use crate::errors::WebSocketError;
use crate::models::Message;

/// [`AsyncWebSocketClient`] that opens sockets with `tokio-tungstenite`
///
/// Without a TLS config, `wss://` URLs use tokio-tungstenite's own default
/// connector.
#[derive(Debug, Clone, Default)]
pub struct TokioTungsteniteClient {
    config: WebSocketConfig,
    tls: Option<Arc<ClientConfig>>,
    headers: HeaderMap,
}

impl TokioTungsteniteClient {
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

    pub fn config(&self) -> &WebSocketConfig {
        &self.config
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn tls(&self) -> Option<&Arc<ClientConfig>> {
        self.tls.as_ref()
    }
}

impl From<WebSocketConfig> for TokioTungsteniteClient {
    fn from(config: WebSocketConfig) -> Self {
        Self::new(config)
    }
}

impl AsyncWebSocketClient for TokioTungsteniteClient {
    type Connection = TokioTungsteniteConnection<MaybeTlsStream<TcpStream>>;
    type Error = WebSocketError<Error>;

    async fn connect<T, E, F>(&self, url: &str, scope: F) -> Result<T, E>
    where
        F: AsyncFnOnce(&mut Self::Connection) -> Result<T, E>,
        E: From<Self::Error>,
    {
        debug!(url = %url, backend = "tokio-tungstenite", tls = self.tls.is_some(), "Opening WebSocket");

        let request = handshake_request(url, &self.headers).map_err(WebSocketError::Backend)?;
        let connector = self.tls.clone().map(Connector::Rustls);
        let (stream, response) =
            connect_async_tls_with_config(request, Some(self.config), false, connector)
                .await
                .map_err(WebSocketError::Backend)?;
        trace!(status = response.status().as_u16(), "WebSocket handshake complete");

        // Dropped with this future on cancellation, which releases the socket
        let mut connection = TokioTungsteniteConnection::new(stream);
        let result = scope(&mut connection).await;
        let closed = connection.close().await;

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

/// An async WebSocket connection over any tokio byte stream
#[derive(Debug)]
pub struct TokioTungsteniteConnection<S> {
    stream: WebSocketStream<S>,
}

impl<S> TokioTungsteniteConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap a stream whose handshake has already completed
    pub fn new(stream: WebSocketStream<S>) -> Self {
        Self { stream }
    }

    pub fn get_ref(&self) -> &WebSocketStream<S> {
        &self.stream
    }

    async fn close(&mut self) -> Result<(), WebSocketError<Error>> {
        debug!("Closing WebSocket");
        ignore_closed(self.stream.close(None).await)?;
        Ok(())
    }
}

impl<S> AsyncWebSocketConnection for TokioTungsteniteConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    type Error = WebSocketError<Error>;

    async fn send(&mut self, message: Message) -> Result<(), Self::Error> {
        trace!(kind = message.type_name(), bytes = message.as_bytes().len(), "Sending frame");
        SinkExt::send(&mut self.stream, to_frame(message)).await?;
        Ok(())
    }

    async fn receive(&mut self) -> Result<Message, Self::Error> {
        match self.stream.next().await {
            Some(frame) => {
                let frame = frame?;
                trace!(bytes = frame.len(), "Frame received");
                classify(frame)
            }
            None => Err(WebSocketError::Backend(Error::ConnectionClosed)),
        }
    }
}
