//! Common test utilities for anyfetch integration tests
//!
//! This module provides shared test infrastructure including:
//! - Canned HTTP responses served by wiremock
//! - In-process WebSocket peers (blocking and async) that echo data frames
//!   and record every frame they receive
//! - Tracing setup driven by `RUST_LOG`

#![allow(dead_code)]

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Body of the canned response
pub const CANNED_BODY: &[u8] = b"hi";

/// Path the canned response is mounted on
pub const CANNED_PATH: &str = "/hello";

/// Install a test subscriber once; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Mount `GET /hello` returning 200 OK, `content-type: text/plain`, body `hi`
pub async fn mount_canned(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(CANNED_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(CANNED_BODY.to_vec())
                .insert_header("content-type", "text/plain"),
        )
        .mount(server)
        .await;
}

/// Path of the oversized response mounted by [`mount_large`]
pub const LARGE_PATH: &str = "/large";

/// Size of the oversized response, just past ureq's 10 MiB read default
pub const LARGE_LEN: usize = 11 * 1024 * 1024;

/// Mount `GET /large` returning [`LARGE_LEN`] bytes of `a`
pub async fn mount_large(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(LARGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b'a'; LARGE_LEN]))
        .mount(server)
        .await;
}

/// A URL on localhost where nothing is listening
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

/// Count close frames among the frames a peer received
#[cfg(any(feature = "tungstenite", feature = "tokio-tungstenite"))]
pub fn close_count(frames: &[tungstenite::Message]) -> usize {
    frames
        .iter()
        .filter(|frame| matches!(frame, tungstenite::Message::Close(_)))
        .count()
}

/// Everything a WebSocket peer saw from its client
#[cfg(any(feature = "tungstenite", feature = "tokio-tungstenite"))]
#[derive(Debug, Default)]
pub struct PeerLog {
    /// Headers of the opening handshake request
    pub headers: http::HeaderMap,
    /// Every frame received, in order
    pub frames: Vec<tungstenite::Message>,
}

#[cfg(any(feature = "tungstenite", feature = "tokio-tungstenite"))]
fn record_headers(
    headers: &mut http::HeaderMap,
) -> impl FnOnce(
    &tungstenite::handshake::server::Request,
    tungstenite::handshake::server::Response,
) -> Result<tungstenite::handshake::server::Response, tungstenite::handshake::server::ErrorResponse>
       + Unpin
       + '_ {
    move |request, response| {
        *headers = request.headers().clone();
        Ok(response)
    }
}

/// Start a blocking WebSocket peer on a background thread.
///
/// The peer sends `greeting` right after the handshake, echoes every text
/// and binary frame, and returns all frames it received once the client
/// goes away.
#[cfg(feature = "tungstenite")]
pub fn spawn_sync_peer(
    greeting: Vec<tungstenite::Message>,
) -> (String, std::thread::JoinHandle<Vec<tungstenite::Message>>) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let handle = std::thread::spawn(move || serve_sync(listener, greeting).frames);
    (url, handle)
}

/// Like [`spawn_sync_peer`], also reporting the handshake headers
#[cfg(feature = "tungstenite")]
pub fn spawn_sync_logged_peer(
    greeting: Vec<tungstenite::Message>,
) -> (String, std::thread::JoinHandle<PeerLog>) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let handle = std::thread::spawn(move || serve_sync(listener, greeting));
    (url, handle)
}

#[cfg(feature = "tungstenite")]
fn serve_sync(listener: std::net::TcpListener, greeting: Vec<tungstenite::Message>) -> PeerLog {
    let (stream, _) = listener.accept().unwrap();
    let mut headers = http::HeaderMap::new();
    let mut ws = tungstenite::accept_hdr(stream, record_headers(&mut headers))
        .unwrap_or_else(|_| panic!("WebSocket handshake failed"));

    for frame in greeting {
        ws.send(frame).unwrap();
    }

    let mut frames = Vec::new();
    while let Ok(frame) = ws.read() {
        let echo = frame.is_text() || frame.is_binary();
        frames.push(frame.clone());
        if echo && ws.send(frame).is_err() {
            break;
        }
    }
    PeerLog { headers, frames }
}

/// Async counterpart of [`spawn_sync_peer`], running on the current runtime
#[cfg(feature = "tokio-tungstenite")]
pub async fn spawn_async_peer(
    greeting: Vec<tungstenite::Message>,
) -> (String, tokio::task::JoinHandle<Vec<tungstenite::Message>>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move { serve_async(listener, greeting).await.frames });
    (url, handle)
}

/// Async counterpart of [`spawn_sync_logged_peer`]
#[cfg(feature = "tokio-tungstenite")]
pub async fn spawn_async_logged_peer(
    greeting: Vec<tungstenite::Message>,
) -> (String, tokio::task::JoinHandle<PeerLog>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(serve_async(listener, greeting));
    (url, handle)
}

#[cfg(feature = "tokio-tungstenite")]
async fn serve_async(
    listener: tokio::net::TcpListener,
    greeting: Vec<tungstenite::Message>,
) -> PeerLog {
    use futures::{SinkExt, StreamExt};

    let (stream, _) = listener.accept().await.unwrap();
    let mut headers = http::HeaderMap::new();
    let mut ws = tokio_tungstenite::accept_hdr_async(stream, record_headers(&mut headers))
        .await
        .unwrap();

    for frame in greeting {
        ws.send(frame).await.unwrap();
    }

    let mut frames = Vec::new();
    while let Some(Ok(frame)) = ws.next().await {
        let echo = frame.is_text() || frame.is_binary();
        frames.push(frame.clone());
        if echo && ws.send(frame).await.is_err() {
            break;
        }
    }
    PeerLog { headers, frames }
}
