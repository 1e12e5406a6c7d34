//! HTTP protocol version formatting

use http::Version;

/// Format a protocol version as `"{major}.{minor}"`.
///
/// Returns an empty string for versions the `http` crate may add later.
pub fn format_http_version(version: Version) -> String {
    let (major, minor) = match version {
        Version::HTTP_09 => (0, 9),
        Version::HTTP_10 => (1, 0),
        Version::HTTP_11 => (1, 1),
        Version::HTTP_2 => (2, 0),
        Version::HTTP_3 => (3, 0),
        _ => return String::new(),
    };
    format!("{}.{}", major, minor)
}
