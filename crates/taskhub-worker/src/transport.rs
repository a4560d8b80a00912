//! Delivery transport abstraction.

use std::time::Duration;

use async_trait::async_trait;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;

use crate::queue::EmailMessage;

/// Sends rendered messages to the outside world.
///
/// The production impl POSTs over HTTP; tests substitute a recording
/// double.
#[async_trait]
pub trait DeliveryTransport: Send + Sync + 'static {
    /// Deliver an email via the configured mail provider.
    async fn send_email(&self, message: &EmailMessage) -> AppResult<()>;

    /// POST a JSON payload to a webhook URL.
    async fn send_webhook(&self, url: &str, payload: &serde_json::Value) -> AppResult<()>;
}

/// HTTP-based transport used in production.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    mail_endpoint: String,
}

impl HttpTransport {
    /// Build a transport posting emails to `mail_endpoint`.
    pub fn new(mail_endpoint: String, request_timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            mail_endpoint,
        })
    }

    async fn post_json(&self, url: &str, payload: &serde_json::Value) -> AppResult<()> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Delivery to {url} failed: {e}")))?;

        response.error_for_status().map_err(|e| {
            AppError::external_service(format!("Delivery to {url} rejected: {e}"))
        })?;
        Ok(())
    }
}

#[async_trait]
impl DeliveryTransport for HttpTransport {
    async fn send_email(&self, message: &EmailMessage) -> AppResult<()> {
        let payload = serde_json::to_value(message)?;
        self.post_json(&self.mail_endpoint, &payload).await
    }

    async fn send_webhook(&self, url: &str, payload: &serde_json::Value) -> AppResult<()> {
        self.post_json(url, payload).await
    }
}
