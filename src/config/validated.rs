//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::socket::Protocol;
use crate::socket::filter::{FilterChain, PortRangeFilter, ProcessRegexFilter, ProtocolFilter};

use super::cli::{Cli, ProtocolArg};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// How emitted snapshots are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Column-aligned rendering followed by a blank line.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    /// Returns the configuration name of this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidFormat {
                value: s.to_string(),
            }),
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Observation file to poll (required, tilde-expanded)
    pub input: PathBuf,

    /// Protocols being monitored
    pub protocols: Vec<Protocol>,

    /// Socket filter, including the protocol selection
    pub filter: FilterChain,

    /// Polling interval
    pub poll_interval: Duration,

    /// Output format for emitted snapshots
    pub format: OutputFormat,

    /// Print a single snapshot and exit
    pub once: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let protocols: Vec<&str> = self.protocols.iter().map(|p| p.as_str()).collect();

        write!(
            f,
            "Config {{ input: {}, protocols: {}, poll_interval: {:?}, format: {}, once: {}, \
             filters: {} }}",
            self.input.display(),
            protocols.join("+"),
            self.poll_interval,
            self.format,
            self.once,
            self.filter.len(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The observation file path is missing
    /// - Protocol, format, or port range values are invalid
    /// - Regex patterns are invalid
    /// - The poll interval is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let input = Self::resolve_input(cli, toml)?;
        let protocols = Self::resolve_protocols(cli, toml)?;
        let filter = Self::build_filter(cli, toml, &protocols)?;
        let poll_interval = Self::resolve_poll_interval(cli, toml)?;
        let format = Self::resolve_format(cli, toml)?;

        Ok(Self {
            input,
            protocols,
            filter,
            poll_interval,
            format,
            once: cli.once,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(&expand_tilde(path))?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_input(cli: &Cli, toml: Option<&TomlConfig>) -> Result<PathBuf, ConfigError> {
        let path = cli
            .input
            .clone()
            .or_else(|| toml.and_then(|t| t.source.path.as_ref().map(PathBuf::from)))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::INPUT,
                    "Use --input or set source.path in config file",
                )
            })?;

        Ok(expand_tilde(&path))
    }

    fn resolve_protocols(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Vec<Protocol>, ConfigError> {
        if let Some(arg) = cli.protocol {
            return Ok(arg.protocols());
        }

        let value = toml
            .and_then(|t| t.filter.protocol.as_deref())
            .unwrap_or(defaults::PROTOCOL);

        parse_protocol_selection(value).map(ProtocolArg::protocols)
    }

    fn build_filter(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        protocols: &[Protocol],
    ) -> Result<FilterChain, ConfigError> {
        let mut filter = FilterChain::new();

        let excluded_protocols: Vec<Protocol> = [Protocol::Tcp, Protocol::Udp]
            .into_iter()
            .filter(|p| !protocols.contains(p))
            .collect();
        if !excluded_protocols.is_empty() {
            filter = filter.exclude(ProtocolFilter::new(excluded_protocols));
        }

        // CLI lists replace TOML lists, each list independently
        let includes = pick_list(&cli.include_processes, toml.map(|t| &t.filter.include));
        for pattern in includes {
            filter = filter.include(parse_regex(pattern)?);
        }

        let excludes = pick_list(&cli.exclude_processes, toml.map(|t| &t.filter.exclude));
        for pattern in excludes {
            filter = filter.exclude(parse_regex(pattern)?);
        }

        let port_ranges = pick_list(&cli.exclude_ports, toml.map(|t| &t.filter.exclude_ports));
        for value in port_ranges {
            filter = filter.exclude(PortRangeFilter::new(parse_port_range(value)?));
        }

        Ok(filter)
    }

    fn resolve_poll_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .poll_interval
            .or_else(|| toml.and_then(|t| t.monitor.poll_interval))
            .unwrap_or(defaults::POLL_INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "poll_interval",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_format(cli: &Cli, toml: Option<&TomlConfig>) -> Result<OutputFormat, ConfigError> {
        if let Some(arg) = cli.format {
            return Ok(arg.into());
        }

        toml.and_then(|t| t.output.format.as_deref())
            .unwrap_or(defaults::FORMAT)
            .parse()
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn pick_list<'a>(cli: &'a [String], toml: Option<&'a Vec<String>>) -> &'a [String] {
    match toml {
        Some(list) if cli.is_empty() => list.as_slice(),
        _ => cli,
    }
}

fn parse_regex(pattern: &str) -> Result<ProcessRegexFilter, ConfigError> {
    ProcessRegexFilter::new(pattern).map_err(|e| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}

/// Parses a protocol selection: a single protocol name, or `both` / `all`.
fn parse_protocol_selection(s: &str) -> Result<ProtocolArg, ConfigError> {
    if matches!(s.trim().to_ascii_lowercase().as_str(), "both" | "all") {
        return Ok(ProtocolArg::Both);
    }

    s.parse::<Protocol>()
        .map(ProtocolArg::from)
        .map_err(|_| ConfigError::InvalidProtocol {
            value: s.to_string(),
        })
}

/// Parses `N` or `N-M` into an inclusive port range.
pub(super) fn parse_port_range(s: &str) -> Result<RangeInclusive<u16>, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidPortRange {
        value: s.to_string(),
        reason: reason.to_string(),
    };
    let parse_port = |part: &str| {
        part.trim()
            .parse::<u16>()
            .map_err(|_| invalid("ports must be integers between 0 and 65535"))
    };

    let (start, end) = match s.split_once('-') {
        Some((start, end)) => (parse_port(start)?, parse_port(end)?),
        None => {
            let port = parse_port(s)?;
            (port, port)
        }
    };

    if start > end {
        return Err(invalid("start must not be greater than end"));
    }

    Ok(start..=end)
}

/// Replaces a leading `~` component with the user's home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
pub(super) fn expand_tilde(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => dirs::home_dir()
            .map_or_else(|| path.to_path_buf(), |home| home.join(components.as_path())),
        _ => path.to_path_buf(),
    }
}
