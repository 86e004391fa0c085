use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_CHANNEL_KEY;
use crate::lifecycle::{PollPolicy, DEFAULT_POLL_DELAY_MS, DEFAULT_TIMEOUT_SECS, POLL_HARD_CAP};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub poll: PollConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for the `browserActApi` credential.
    #[serde(default)]
    pub api_key: String,

    /// Value of the `api-channel-ak` identification header.
    #[serde(default = "default_channel_key")]
    pub channel_key: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://api.browseract.com/v2".to_string()
}

fn default_channel_key() -> String {
    DEFAULT_CHANNEL_KEY.to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            channel_key: default_channel_key(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ApiConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_poll_delay_ms")]
    pub delay_ms: u64,

    /// Upper bound on status checks per run, whatever the timeout.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Used when an item's timeout is missing, zero or not a number.
    #[serde(default = "default_timeout_secs")]
    pub default_timeout_secs: f64,
}

fn default_poll_delay_ms() -> u64 {
    DEFAULT_POLL_DELAY_MS
}

fn default_max_attempts() -> u32 {
    POLL_HARD_CAP
}

fn default_timeout_secs() -> f64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_poll_delay_ms(),
            max_attempts: default_max_attempts(),
            default_timeout_secs: default_timeout_secs(),
        }
    }
}

impl PollConfig {
    pub fn policy(&self) -> PollPolicy {
        PollPolicy::new(self.delay_ms, self.max_attempts)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "browseract_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}
