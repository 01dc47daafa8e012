//! Error types for node communication.
//!
//! The dashboard's error policy is deliberately lenient (see the component
//! modules): a transport failure skips one refresh, malformed fields render
//! as placeholders, and only explicit collaborator failures (camera start)
//! surface to the user. These variants exist so callers can tell those
//! cases apart.

use thiserror::Error;

/// Errors that can occur when talking to the greenhouse node.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The node did not answer at all (connection refused, DNS, timeout).
    #[error("node not reachable at {url}: {source}")]
    NotReachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP request or body decoding failed after the node answered.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured server URL is unusable.
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),

    /// The node answered with a non-success status.
    #[error("node API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The camera collaborator reported an operational failure. The message
    /// is the server-reported reason, surfaced verbatim in a blocking alert.
    #[error("camera start failed: {0}")]
    Camera(String),
}

/// Result type for node operations.
pub type Result<T> = std::result::Result<T, Error>;
