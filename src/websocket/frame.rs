//! Translation between tungstenite frames and [`Message`]

use tungstenite::{Error, Message as Frame};

use crate::errors::WebSocketError;
use crate::models::{FrameKind, Message};

/// Outgoing frame for a message: binary payloads become binary frames,
/// everything else a text frame.
pub(crate) fn to_frame(message: Message) -> Frame {
    match message {
        Message::Text(text) => Frame::Text(text.into()),
        Message::Binary(data) => Frame::Binary(data),
    }
}

/// Classify an incoming frame, keeping the backend's own type tag
pub(crate) fn classify(frame: Frame) -> Result<Message, WebSocketError<Error>> {
    match frame {
        Frame::Text(text) => Ok(Message::Text(text.as_str().to_owned())),
        Frame::Binary(data) => Ok(Message::Binary(data)),
        Frame::Ping(_) => Err(WebSocketError::UnexpectedFrame(FrameKind::Ping)),
        Frame::Pong(_) => Err(WebSocketError::UnexpectedFrame(FrameKind::Pong)),
        Frame::Close(_) => Err(WebSocketError::UnexpectedFrame(FrameKind::Close)),
        Frame::Frame(_) => Err(WebSocketError::UnexpectedFrame(FrameKind::Frame)),
    }
}

/// Closing an already-closed socket counts as released
pub(crate) fn ignore_closed(result: Result<(), Error>) -> Result<(), Error> {
    match result {
        Err(Error::ConnectionClosed | Error::AlreadyClosed) => Ok(()),
        other => other,
    }
}
