//! Project health status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Traffic-light health status shown on project cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// On track.
    Green,
    /// At risk.
    Yellow,
    /// Off track.
    Red,
}

impl ProjectStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = taskhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "red" => Ok(Self::Red),
            _ => Err(taskhub_core::AppError::validation(format!(
                "Invalid project status: '{s}'. Expected one of: green, yellow, red"
            ))),
        }
    }
}
