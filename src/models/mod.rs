//! Shared data model
//!
//! Plain value types that cross the adapter boundary. Nothing here performs
//! I/O or depends on a backend library.
//!
//! # Why IndexMap?
//!
//! Request headers go out in the order the caller supplied them, which some
//! servers care about. Response headers keep the order the backend reported.

pub mod message;
pub mod request;
pub mod response;

use indexmap::IndexMap;

pub use message::{FrameKind, Message};
pub use request::Request;
pub use response::Response;

/// Header name to single value; duplicates collapse to the last value
pub type HeadersDict = IndexMap<String, String>;
