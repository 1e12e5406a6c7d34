//! anyfetch library interface
//!
//! One request/response and WebSocket interface over interchangeable HTTP
//! client libraries. Calling code depends on the traits; an adapter wraps an
//! already-configured client from one concrete library.
//!
//! # Module Organization
//!
//! - [`models`] - Value types crossing the adapter boundary (Request, Response, Message)
//! - [`client`] - HTTP contracts (HttpClient, AsyncHttpClient) and adapters
//! - [`websocket`] - WebSocket contracts and adapters
//! - `session` - One handle serving both HTTP and WebSocket (feature `session`)
//! - [`errors`] - Pass-through error wrappers (HttpError, WebSocketError)
//!
//! # Backends
//!
//! | Feature | Adapters |
//! |---|---|
//! | `ureq` | [`UreqClient`](client::UreqClient) |
//! | `reqwest` | [`ReqwestClient`](client::ReqwestClient), [`AsyncReqwestClient`](client::AsyncReqwestClient) |
//! | `tungstenite` | [`TungsteniteClient`](websocket::TungsteniteClient) |
//! | `tokio-tungstenite` | [`TokioTungsteniteClient`](websocket::TokioTungsteniteClient) |
//! | `session` | `Session`, `AsyncSession`: reqwest plus tungstenite sharing headers and TLS |

pub mod client;
pub mod errors;
pub mod models;
#[cfg(feature = "session")]
pub mod session;
pub mod websocket;

pub use client::{AsyncHttpClient, HttpClient};
pub use errors::{HttpError, WebSocketError};
pub use models::{FrameKind, Message, Request, Response};
pub use websocket::{
    AsyncWebSocketClient, AsyncWebSocketConnection, WebSocketClient, WebSocketConnection,
};
