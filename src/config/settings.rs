//! Application settings.

use serde::{Deserialize, Serialize};

/// Line format of the log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Application-wide settings from the `[settings]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,
    /// Event loop tick in milliseconds (spinner and toast expiry).
    pub tick_rate_ms: u64,
    /// Attempts per request for retryable failures.
    pub max_retries: u32,
    /// Format of the log file.
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_profile: None,
            tick_rate_ms: 100,
            max_retries: 3,
            log_format: LogFormat::Text,
        }
    }
}

impl Settings {
    /// Clamp values into usable ranges.
    pub fn normalized(mut self) -> Self {
        self.tick_rate_ms = self.tick_rate_ms.clamp(16, 1000);
        self.max_retries = self.max_retries.max(1);
        self
    }
}
