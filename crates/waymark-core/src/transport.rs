//! Transport seam.
//!
//! The actual chat transport (long polling, authentication, wire encoding)
//! is a collaborator outside this workspace. The core only needs the three
//! operations below; tests substitute a recording mock.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportResult;
use crate::outbound::Outbound;

/// Operations the core requires from the chat transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Delivers one outbound message.
    async fn send(&self, message: Outbound) -> TransportResult<()>;

    /// Resolves an opaque file handle to a downloadable location.
    async fn resolve_file(&self, file_id: &str) -> TransportResult<String>;

    /// Downloads `location` into the local file `dest`, returning the number
    /// of bytes written.
    async fn download(&self, location: &str, dest: &Path) -> TransportResult<u64>;
}

/// Shared transport handle.
pub type BoxedTransport = Arc<dyn Transport>;
