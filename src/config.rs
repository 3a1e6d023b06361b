use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SENDER_ADDRESS: &str = "noreply@pocketbook.app";

/// Tunables for a tracker instance. Every field is optional in the JSON file;
/// missing ones fall back to the defaults and unknown keys are rejected.
///
/// The goal reward and the shop list are fixed and cannot be configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// "From" address on outgoing notifications
    pub sender_address: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            sender_address: DEFAULT_SENDER_ADDRESS.to_string(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}
