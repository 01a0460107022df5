//! Configuration file parsing.
//!
//! The file is TOML unless its extension is `.json`. Both formats share one
//! serde model, so a JSON file with an `apprise_urls` list parses as is.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from the config file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Destinations for change notifications
    #[serde(default, alias = "apprise_urls")]
    pub notification_targets: Vec<String>,

    /// Public address lookup configuration
    #[serde(default)]
    pub lookup: LookupSection,

    /// State file locations
    #[serde(default)]
    pub state: StateSection,

    /// Notification request shaping
    #[serde(default)]
    pub notify: NotifySection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,

    /// Verbose self-test timing
    #[serde(default)]
    pub self_test: SelfTestSection,
}

/// Public address lookup section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupSection {
    /// Lookup endpoints, tried in order
    #[serde(default)]
    pub endpoints: Vec<String>,

    /// Per-request timeout in seconds
    pub timeout: Option<u64>,
}

/// State file section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateSection {
    /// File holding the last observed address
    pub address_file: Option<PathBuf>,

    /// File holding heartbeat statistics
    pub heartbeat_file: Option<PathBuf>,

    /// Days between heartbeat notifications
    pub heartbeat_days: Option<u64>,
}

/// Notification request section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifySection {
    /// HTTP method (default: POST)
    pub method: Option<String>,

    /// HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Handlebars body template
    pub body_template: Option<String>,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Maximum number of attempts per target
    pub max_attempts: Option<u32>,

    /// Initial retry delay in seconds
    pub initial_delay: Option<u64>,

    /// Maximum retry delay in seconds
    pub max_delay: Option<u64>,

    /// Backoff multiplier
    pub multiplier: Option<f64>,
}

/// Self-test section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelfTestSection {
    /// Sampling window in seconds
    pub window: Option<u64>,

    /// Gap between samples in seconds
    pub interval: Option<u64>,
}

impl FileConfig {
    /// Loads configuration from a file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        if is_json(path) {
            Self::parse_json(&content)
        } else {
            Self::parse_toml(&content)
        }
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(ConfigError::from)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# pubip-notify Configuration File

# Notification targets (required, at least one)
# Each target receives an HTTP request whenever the public IP changes.
notification_targets = [
    # "https://hooks.example.com/ip-changed",
]

[lookup]
# Lookup endpoints returning the caller's address, tried in order
# Note: --lookup-url REPLACES this list entirely (not merged)
# endpoints = ["https://api.ipify.org", "https://ifconfig.me/ip"]

# Per-request timeout in seconds (default: 5)
# timeout = 5

[state]
# File holding the last observed address (default: PreviousIP.txt)
# address_file = "PreviousIP.txt"

# Heartbeat statistics file (default: heartbeat.json, disable with --no-heartbeat)
# heartbeat_file = "heartbeat.json"

# Days between heartbeat notifications (default: 30)
# heartbeat_days = 30

[notify]
# HTTP method (default: POST)
# method = "POST"

# Handlebars body template (default: JSON of the notification)
# Available variables: {{title}}, {{body}}, {{kind}}, {{previous}}, {{current}}, {{timestamp}}
# {{var}} is escaped for use inside a JSON string; {{{var}}} inserts it raw
# body_template = '{"text": "{{body}}"}'

# HTTP headers
# [notify.headers]
# Authorization = "Bearer your-token-here"

[retry]
# Maximum number of attempts per target (default: 3)
# max_attempts = 3

# Initial retry delay in seconds (default: 5)
# initial_delay = 5

# Maximum retry delay in seconds (default: 60)
# max_delay = 60

# Backoff multiplier (default: 2.0)
# multiplier = 2.0

[self_test]
# Sampling window for --verbose in seconds (default: 300)
# window = 300

# Gap between samples in seconds (default: 90)
# interval = 90
"#
    .to_string()
}
