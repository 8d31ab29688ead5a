//! Unified error types for the routing core.
//!
//! Conversion-specific errors live in `waymark-convert`; this module covers
//! the transport and routing domains. Component-level errors never escalate
//! beyond the task handling the event that produced them.

use thiserror::Error;

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors reported by the chat transport collaborator.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The transport could not resolve a file handle to a location.
    #[error("failed to resolve file '{file_id}': {reason}")]
    ResolveFailed {
        /// The opaque file handle that failed to resolve.
        file_id: String,
        /// Reason for failure.
        reason: String,
    },

    /// Downloading a remote file failed.
    #[error("failed to download '{location}': {reason}")]
    DownloadFailed {
        /// The remote location.
        location: String,
        /// Reason for failure.
        reason: String,
    },

    /// An outbound send failed.
    #[error("failed to send message: {0}")]
    SendFailed(String),

    /// I/O error while staging a file locally.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// =============================================================================
// Routing Errors
// =============================================================================

/// Errors raised while demultiplexing a callback payload.
///
/// All of these are logged and dropped without user-facing output; a
/// malformed payload means a programming or replay problem, not something
/// the user can act on.
#[derive(Debug, Clone, Error)]
pub enum RoutingError {
    /// The payload did not start with a parseable component id.
    #[error("callback payload has no component id: {payload:?}")]
    InvalidComponentId {
        /// The offending payload.
        payload: String,
    },

    /// The component id did not match any registered component.
    #[error("no component registered with id {id}")]
    UnknownComponent {
        /// The unresolved id.
        id: usize,
    },

    /// A component-level payload tail had fewer fields than expected.
    #[error("malformed callback payload, expected {expected} fields: {payload:?}")]
    MalformedPayload {
        /// Number of fields the component expected.
        expected: usize,
        /// The offending tail.
        payload: String,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;
