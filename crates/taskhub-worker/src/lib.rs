//! # taskhub-worker
//!
//! Fire-and-forget outbound delivery. Request handlers drop messages on
//! the [`queue::OutboundQueue`] and move on; the [`runner::DeliveryRunner`]
//! drains the queue on its own task, POSTs each message over HTTP, and
//! logs failures without ever surfacing them to the write that triggered
//! the send.

pub mod queue;
pub mod runner;
pub mod transport;

pub use queue::{EmailMessage, Outbound, OutboundQueue};
pub use runner::DeliveryRunner;
pub use transport::{DeliveryTransport, HttpTransport};
