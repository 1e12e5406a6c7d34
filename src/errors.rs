//! Error types for anyfetch
//!
//! Backend failures are never translated: they travel inside the `Backend`
//! variant exactly as the wrapped library produced them. The only errors
//! raised by the facade itself are a request that cannot be expressed in the
//! backend's typed request, and a WebSocket frame that is neither text nor
//! binary.

use thiserror::Error;

use crate::models::FrameKind;

/// Error returned by HTTP adapters
#[derive(Error, Debug)]
pub enum HttpError<E> {
    /// Failure reported by the wrapped HTTP library
    #[error(transparent)]
    Backend(E),

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] http::Error),
}

impl<E> HttpError<E> {
    /// The backend error, if this failure came from the backend
    pub fn backend(&self) -> Option<&E> {
        match self {
            HttpError::Backend(err) => Some(err),
            HttpError::InvalidRequest(_) => None,
        }
    }

    pub fn into_backend(self) -> Option<E> {
        match self {
            HttpError::Backend(err) => Some(err),
            HttpError::InvalidRequest(_) => None,
        }
    }
}

/// Error returned by WebSocket adapters
#[derive(Error, Debug)]
pub enum WebSocketError<E> {
    /// Failure reported by the wrapped WebSocket library
    #[error(transparent)]
    Backend(#[from] E),

    #[error("Received {0} frame, expected text or binary")]
    UnexpectedFrame(FrameKind),
}

impl<E> WebSocketError<E> {
    pub fn backend(&self) -> Option<&E> {
        match self {
            WebSocketError::Backend(err) => Some(err),
            WebSocketError::UnexpectedFrame(_) => None,
        }
    }

    pub fn is_unexpected_frame(&self) -> bool {
        matches!(self, WebSocketError::UnexpectedFrame(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_backend_error_is_transparent() {
        let err: HttpError<io::Error> =
            HttpError::Backend(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        assert_eq!(err.to_string(), "refused");
        assert_eq!(err.backend().map(io::Error::kind), Some(io::ErrorKind::ConnectionRefused));
    }

    #[test]
    fn test_invalid_request_message() {
        let invalid = http::Method::from_bytes(b"BAD METHOD").unwrap_err();
        let err: HttpError<io::Error> = http::Error::from(invalid).into();
        assert!(err.to_string().starts_with("Invalid request:"));
        assert!(err.into_backend().is_none());
    }

    #[test]
    fn test_unexpected_frame_message() {
        let err: WebSocketError<io::Error> = WebSocketError::UnexpectedFrame(FrameKind::Ping);
        assert_eq!(err.to_string(), "Received ping frame, expected text or binary");
        assert!(err.is_unexpected_frame());
        assert!(err.backend().is_none());
    }

    #[test]
    fn test_backend_converts_with_question_mark() {
        fn fails() -> Result<(), WebSocketError<io::Error>> {
            Err::<(), _>(io::Error::other("reset"))?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert!(!err.is_unexpected_frame());
        assert_eq!(err.to_string(), "reset");
    }
}
