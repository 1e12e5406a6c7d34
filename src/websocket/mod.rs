//! WebSocket client contracts and backend adapters
//!
//! A client opens a connection that lives only inside a caller-supplied
//! scope. The connection is handed to the scope as `&mut`, so it cannot
//! escape; the adapter closes the socket when the scope returns, and the
//! connection's `Drop` releases it on panic or cancellation.

#[cfg(any(feature = "tungstenite", feature = "tokio-tungstenite"))]
mod frame;
#[cfg(any(feature = "tungstenite", feature = "tokio-tungstenite"))]
mod handshake;
#[cfg(any(feature = "tungstenite", feature = "tokio-tungstenite"))]
pub mod tls;
#[cfg(feature = "tokio-tungstenite")]
pub mod tokio_tungstenite;
#[cfg(feature = "tungstenite")]
pub mod tungstenite;

use std::future::Future;
use std::ops::AsyncFnOnce;

use crate::models::Message;

#[cfg(feature = "tokio-tungstenite")]
pub use self::tokio_tungstenite::{TokioTungsteniteClient, TokioTungsteniteConnection};
#[cfg(feature = "tungstenite")]
pub use self::tungstenite::{TungsteniteClient, TungsteniteConnection};

/// Blocking WebSocket client
pub trait WebSocketClient {
    type Connection: WebSocketConnection;

    /// Error produced when the connection cannot be opened or closed
    type Error;

    /// Open a connection to `url` and run `scope` with it.
    ///
    /// The socket is closed exactly once when `scope` returns, whether it
    /// returned `Ok` or `Err`. An error from `scope` takes precedence over
    /// an error raised while closing.
    fn connect<T, E, F>(&self, url: &str, scope: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self::Connection) -> Result<T, E>,
        E: From<Self::Error>;
}

/// Blocking WebSocket connection carrying text and binary messages
pub trait WebSocketConnection {
    type Error;

    /// Send a text frame for [`Message::Text`] and a binary frame for
    /// [`Message::Binary`].
    fn send(&mut self, message: Message) -> Result<(), Self::Error>;

    /// Wait for the next complete message.
    ///
    /// Frames that are neither text nor binary are reported as errors.
    fn receive(&mut self) -> Result<Message, Self::Error>;
}

/// Non-blocking WebSocket client
///
/// Unlike [`AsyncHttpClient::request`](crate::AsyncHttpClient::request),
/// `connect` does not promise a `Send` future. The future drives the
/// caller's scope, and the future an `AsyncFnOnce` returns cannot be named
/// in a bound on stable Rust. A concrete adapter's future is `Send`
/// whenever the scope's future is. Generic code that must stay `?Send` can
/// run sessions on a `tokio::task::LocalSet`.
pub trait AsyncWebSocketClient {
    type Connection: AsyncWebSocketConnection;
    type Error;

    /// Open a connection to `url` and run `scope` with it.
    ///
    /// Same release rules as [`WebSocketClient::connect`]. If the returned
    /// future is dropped while suspended, the connection is dropped with it
    /// and the socket is released without a close handshake.
    fn connect<T, E, F>(&self, url: &str, scope: F) -> impl Future<Output = Result<T, E>>
    where
        F: AsyncFnOnce(&mut Self::Connection) -> Result<T, E>,
        E: From<Self::Error>;
}

/// Non-blocking WebSocket connection
pub trait AsyncWebSocketConnection {
    type Error;

    fn send(&mut self, message: Message) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn receive(&mut self) -> impl Future<Output = Result<Message, Self::Error>> + Send;
}
