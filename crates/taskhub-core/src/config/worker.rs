//! Background delivery worker configuration.

use serde::{Deserialize, Serialize};

/// Settings for the outbound delivery worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the delivery worker runs at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Bounded capacity of the outbound queue. When full, new messages
    /// are dropped and logged rather than blocking request handlers.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Timeout for a single outbound HTTP delivery, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            queue_capacity: default_queue_capacity(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_queue_capacity() -> usize {
    256
}

fn default_request_timeout() -> u64 {
    10
}
