//! Opening handshake shared by both tungstenite adapters

use http::HeaderMap;
use tungstenite::client::IntoClientRequest;
use tungstenite::handshake::client::Request;
use tungstenite::Error;

/// Handshake request for `url` carrying `headers` on top of the
/// WebSocket ones. A header given here replaces the generated one.
pub(crate) fn handshake_request(url: &str, headers: &HeaderMap) -> Result<Request, Error> {
    let mut request = url.into_client_request()?;
    for (name, value) in headers {
        request.headers_mut().insert(name.clone(), value.clone());
    }
    Ok(request)
}
