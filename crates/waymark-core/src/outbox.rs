//! Outbound message queue.
//!
//! Components never talk to the transport directly for regular messages;
//! they enqueue [`Outbound`] values on a shared [`Outbox`]. Exactly one
//! sender task owns the receiving end and performs transport sends in FIFO
//! enqueue order, which is the only serialization point for outbound
//! traffic. Multiple producers may enqueue concurrently; each producer's own
//! order is preserved.

use tokio::sync::mpsc;
use tracing::warn;

use crate::outbound::Outbound;

/// Clonable producer handle for the outbound queue.
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<Outbound>,
}

/// Creates the outbound queue, returning the producer handle and the
/// receiver the single sender task drains.
pub fn outbound_channel() -> (Outbox, mpsc::UnboundedReceiver<Outbound>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Outbox { tx }, rx)
}

impl Outbox {
    /// Enqueues a message for delivery.
    ///
    /// A closed queue means the sender task is gone (shutdown in progress);
    /// the message is dropped with a warning rather than propagated as an
    /// error, since no component can do anything useful about it.
    pub fn send(&self, message: Outbound) {
        if self.tx.send(message).is_err() {
            warn!("outbound queue closed, dropping message");
        }
    }
}
