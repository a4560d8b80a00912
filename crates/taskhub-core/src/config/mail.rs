//! Outbound email configuration.

use serde::{Deserialize, Serialize};

/// Settings for invitation/welcome emails.
///
/// Delivery happens over HTTP: the worker POSTs rendered messages to
/// `delivery_endpoint`, which is expected to be a mail-provider API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Base URL of the web client, used to build signup/decline links.
    pub client_url: String,
    /// Sender address for all outbound mail.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Sender display name for all outbound mail.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// HTTP endpoint that accepts rendered email payloads.
    pub delivery_endpoint: String,
}

fn default_from_address() -> String {
    "no-reply@taskhub.local".to_string()
}

fn default_from_name() -> String {
    "TaskHub".to_string()
}
