//! Bounded queue decoupling request handlers from outbound delivery.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

/// A rendered email ready for delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient address.
    pub to: String,
    /// Sender address.
    pub from_address: String,
    /// Sender display name.
    pub from_name: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
}

/// One outbound message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Outbound {
    /// An email for the mail provider.
    Email(EmailMessage),
    /// A JSON payload for a webhook URL.
    Webhook {
        /// Destination URL.
        url: String,
        /// Payload to POST.
        payload: serde_json::Value,
    },
}

/// Producer half of the delivery queue.
///
/// `enqueue` never blocks and never fails the caller: when the queue is
/// full or the runner is gone, the message is dropped and logged. A
/// committed write must not be failed by its side effects.
#[derive(Debug, Clone)]
pub struct OutboundQueue {
    tx: mpsc::Sender<Outbound>,
}

impl OutboundQueue {
    /// Build a queue with the given capacity, returning the producer and
    /// the receiver the runner drains.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Outbound>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Drop a message on the queue.
    pub fn enqueue(&self, message: Outbound) {
        if let Err(e) = self.tx.try_send(message) {
            warn!(error = %e, "Outbound queue rejected message, dropping");
        }
    }
}
