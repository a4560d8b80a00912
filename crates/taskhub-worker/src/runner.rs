//! Background task draining the outbound queue.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};

use crate::queue::Outbound;
use crate::transport::DeliveryTransport;

/// Drains the outbound queue and delivers each message.
///
/// Failures are logged and dropped; there is no retry. The runner keeps
/// going until the queue closes or shutdown is signalled, then drains
/// whatever is already buffered.
pub struct DeliveryRunner {
    rx: mpsc::Receiver<Outbound>,
    transport: Arc<dyn DeliveryTransport>,
    shutdown: watch::Receiver<bool>,
}

impl DeliveryRunner {
    /// Build a runner over the receiver half of an
    /// [`crate::queue::OutboundQueue`].
    pub fn new(
        rx: mpsc::Receiver<Outbound>,
        transport: Arc<dyn DeliveryTransport>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            rx,
            transport,
            shutdown,
        }
    }

    /// Run until shutdown. Intended to be spawned.
    pub async fn run(mut self) {
        info!("Delivery runner started");
        loop {
            tokio::select! {
                message = self.rx.recv() => {
                    match message {
                        Some(message) => self.deliver(message).await,
                        None => break,
                    }
                }
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        // Drain messages that were already enqueued before shutdown.
        while let Ok(message) = self.rx.try_recv() {
            self.deliver(message).await;
        }
        info!("Delivery runner stopped");
    }

    async fn deliver(&self, message: Outbound) {
        let result = match &message {
            Outbound::Email(email) => {
                debug!(to = %email.to, subject = %email.subject, "Delivering email");
                self.transport.send_email(email).await
            }
            Outbound::Webhook { url, payload } => {
                debug!(url = %url, "Delivering webhook");
                self.transport.send_webhook(url, payload).await
            }
        };

        if let Err(e) = result {
            error!(error = %e, "Outbound delivery failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::{EmailMessage, OutboundQueue};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use taskhub_core::AppError;
    use taskhub_core::result::AppResult;

    #[derive(Default)]
    struct RecordingTransport {
        emails: Mutex<Vec<String>>,
        webhooks: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl DeliveryTransport for RecordingTransport {
        async fn send_email(&self, message: &EmailMessage) -> AppResult<()> {
            if self.fail {
                return Err(AppError::external_service("mail provider down"));
            }
            self.emails.lock().unwrap().push(message.to.clone());
            Ok(())
        }

        async fn send_webhook(&self, url: &str, _payload: &serde_json::Value) -> AppResult<()> {
            if self.fail {
                return Err(AppError::external_service("webhook down"));
            }
            self.webhooks.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn email(to: &str) -> EmailMessage {
        EmailMessage {
            to: to.to_string(),
            from_address: "no-reply@taskhub.local".to_string(),
            from_name: "TaskHub".to_string(),
            subject: "hi".to_string(),
            text: "body".to_string(),
        }
    }

    #[tokio::test]
    async fn test_delivers_queued_messages() {
        let (queue, rx) = OutboundQueue::new(8);
        let transport = Arc::new(RecordingTransport::default());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let dyn_transport: Arc<dyn DeliveryTransport> = transport.clone();
        let handle = tokio::spawn(DeliveryRunner::new(rx, dyn_transport, shutdown_rx).run());

        queue.enqueue(Outbound::Email(email("a@example.com")));
        queue.enqueue(Outbound::Webhook {
            url: "http://example.invalid/hook".to_string(),
            payload: serde_json::json!({"text": "hi"}),
        });

        tokio::task::yield_now().await;
        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        assert_eq!(*transport.emails.lock().unwrap(), vec!["a@example.com"]);
        assert_eq!(
            *transport.webhooks.lock().unwrap(),
            vec!["http://example.invalid/hook"]
        );
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let (queue, rx) = OutboundQueue::new(8);
        let transport = Arc::new(RecordingTransport {
            fail: true,
            ..Default::default()
        });
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let dyn_transport: Arc<dyn DeliveryTransport> = transport.clone();
        let handle = tokio::spawn(DeliveryRunner::new(rx, dyn_transport, shutdown_rx).run());

        queue.enqueue(Outbound::Email(email("a@example.com")));
        tokio::task::yield_now().await;
        shutdown_tx.send(true).unwrap();

        // The runner survives the failure and exits cleanly on shutdown.
        handle.await.unwrap();
    }
}
