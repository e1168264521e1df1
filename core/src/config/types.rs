use serde::{Deserialize, Serialize};

use crate::query::PubState;

use super::vocabulary::{default_channels, default_products, default_tour_types};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dump: DumpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "dhubdump_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub client_id: Option<String>,

    /// Normally passed on the command line; accepted here for unattended runs.
    #[serde(default)]
    pub secret: Option<String>,

    /// Per-request timeout. Bulk dumps are large, keep this generous.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Log every datahub request and response at info level.
    #[serde(default)]
    pub verbose: bool,
}

fn default_base_url() -> String {
    "https://datahub.westtoer.be".to_string()
}

fn default_timeout_ms() -> u64 {
    600_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client_id: None,
            secret: None,
            timeout_ms: default_timeout_ms(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodConfig {
    pub name: String,
    pub days: u32,
}

impl PeriodConfig {
    pub fn new(name: impl Into<String>, days: u32) -> Self {
        Self {
            name: name.into(),
            days,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Delay between two task dispatches.
    #[serde(default = "default_time_between_ms")]
    pub time_between_ms: u64,

    /// Report file name, relative to the output root.
    #[serde(default = "default_report_file")]
    pub report_file: String,

    #[serde(default = "default_products")]
    pub products: Vec<String>,

    #[serde(default = "default_channels")]
    pub channels: Vec<String>,

    #[serde(default = "default_tour_types")]
    pub tour_types: Vec<String>,

    #[serde(default = "default_periods")]
    pub periods: Vec<PeriodConfig>,

    #[serde(default = "default_pub_states")]
    pub pub_states: Vec<PubState>,

    /// Product ids dumped by the `samples` request. Empty by default, so the
    /// ids have to be listed under `[dump] samples` for that request to fetch
    /// anything; otherwise it is skipped with a warning.
    #[serde(default)]
    pub samples: Vec<String>,

    /// Appended to a channel name when filtering, so `de_kust*` also matches
    /// the language variants.
    #[serde(default = "default_channel_wildcard")]
    pub channel_wildcard: String,

    /// Leave the upper bound of period filters open instead of pinning it to
    /// the assembly time.
    #[serde(default)]
    pub open_ended_periods: bool,
}

fn default_time_between_ms() -> u64 {
    100
}

fn default_report_file() -> String {
    "dhubdump-report.csv".to_string()
}

fn default_periods() -> Vec<PeriodConfig> {
    vec![PeriodConfig::new("week", 7), PeriodConfig::new("day", 1)]
}

fn default_pub_states() -> Vec<PubState> {
    vec![PubState::Ignore, PubState::Published]
}

fn default_channel_wildcard() -> String {
    "*".to_string()
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            time_between_ms: default_time_between_ms(),
            report_file: default_report_file(),
            products: default_products(),
            channels: default_channels(),
            tour_types: default_tour_types(),
            periods: default_periods(),
            pub_states: default_pub_states(),
            samples: Vec::new(),
            channel_wildcard: default_channel_wildcard(),
            open_ended_periods: false,
        }
    }
}
