//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// HTTP server bind and CORS settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}
