use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default schedule endpoint
pub const DEFAULT_URL: &str = "http://localhost:5000/gantt-data";

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Optional dashboard features. All on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Search box and id filtering
    #[serde(default = "default_true")]
    pub search: bool,
    /// `S<n>` subproject and reopen badges in the ID column
    #[serde(default = "default_true")]
    pub badges: bool,
    /// Receivable/payable tables in the project detail view
    #[serde(default = "default_true")]
    pub finance: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        FeatureConfig {
            search: true,
            badges: true,
            finance: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Quiet period after the last keystroke before a search applies
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Theme color overrides, keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            debounce_ms: default_debounce_ms(),
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default tracing filter directive (overridden by GANTT_LOG)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}
