use thiserror::Error;

use specsync_shared::ProtocolError;

/// Errors reported by a [`Network`](crate::Network) implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The request could not be sent or no response was received
    #[error("Request to {endpoint} failed: {message}")]
    Request {
        endpoint: String,
        message: String,
    },

    /// The server answered with a non-success status code
    #[error("Request to {endpoint} returned HTTP status {status}")]
    Status {
        endpoint: String,
        status: u16,
    },

    /// The response body could not be read
    #[error("Failed to read response body from {endpoint}: {message}")]
    Body {
        endpoint: String,
        message: String,
    },
}

/// Errors that can fail a single sync tick. A failed tick leaves the last
/// published state in place
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Transport error
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Payload decoding error
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Errors that can occur while constructing a [`SpecStore`](crate::SpecStore)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecStoreError {
    /// The runtime driving the background loops could not be started
    #[error("Failed to build the sync runtime: {message}")]
    RuntimeBuild {
        message: String,
    },
}
