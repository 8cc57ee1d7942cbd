//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Observation source section
    #[serde(default)]
    pub source: SourceSection,

    /// Socket filter configuration
    #[serde(default)]
    pub filter: FilterSection,

    /// Monitoring configuration
    #[serde(default)]
    pub monitor: MonitorSection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,
}

/// Observation source section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    /// Path to the observation file
    pub path: Option<String>,
}

/// Socket filter configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Protocols to monitor: "tcp", "udp", or "both"
    pub protocol: Option<String>,

    /// Regex patterns for processes to include
    #[serde(default)]
    pub include: Vec<String>,

    /// Regex patterns for processes to exclude
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Ports or port ranges ("N" or "N-M") to exclude
    #[serde(default)]
    pub exclude_ports: Vec<String>,
}

/// Monitoring configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Polling interval in seconds
    pub poll_interval: Option<u64>,
}

/// Output configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Output format: "text" or "json"
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# portwatch Configuration File

[source]
# Observation file to poll (required)
# A JSON array of listening sockets, rewritten by an external enumerator:
# [{"protocol": "tcp", "port": 22, "socket_identity": "socket:[1234]", "process": "sshd"}]
# path = "~/.cache/portwatch/listening.json"

[filter]
# Protocols to monitor: "tcp", "udp", or "both" (default: both)
# protocol = "both"

# Regex patterns for processes to include (empty = all)
# Note: CLI patterns REPLACE these entirely (not merged)
# include = ["^nginx", "^sshd$"]

# Regex patterns for processes to exclude
# Note: CLI patterns REPLACE these entirely (not merged)
# exclude = ["^chrome"]

# Ports or port ranges to exclude, "N" or "N-M"
# Note: CLI ranges REPLACE these entirely (not merged)
# exclude_ports = ["53", "32768-60999"]

[monitor]
# Polling interval in seconds (default: 5)
poll_interval = 5

[output]
# Output format: "text" or "json" (default: text)
# format = "text"
"#
    .to_string()
}
