//! TLS configuration for the WebSocket clients
//!
//! The facade never configures TLS on its own. This helper builds the
//! configuration most callers want, so they have something to hand to
//! `with_tls` on either WebSocket client or to a session builder.

use std::sync::Arc;

use rustls::{ClientConfig, RootCertStore};
use tracing::{debug, warn};

/// Client config trusting the system certificate store.
///
/// Falls back to the bundled webpki roots when no native certificate could
/// be loaded, e.g. in minimal containers.
pub fn native_roots_config() -> Result<Arc<ClientConfig>, rustls::Error> {
    let mut root_store = RootCertStore::empty();
    let cert_result = rustls_native_certs::load_native_certs();

    if !cert_result.errors.is_empty() {
        warn!(errors = cert_result.errors.len(), "Some native certificates could not be loaded");
    }
    let (added, ignored) = root_store.add_parsable_certificates(cert_result.certs);
    debug!(added, ignored, "Native root certificates loaded");

    if root_store.is_empty() {
        root_store = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(Arc::new(config))
}
