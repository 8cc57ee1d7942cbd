//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::socket::Protocol;

use super::validated::OutputFormat;

/// portwatch: Listening Port Monitor
///
/// Polls a table of listening TCP/UDP sockets and reports a canonical
/// snapshot whenever the set of sockets meaningfully changes.
#[derive(Debug, Parser)]
#[command(name = "portwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Observation file (JSON array of listening sockets) to poll
    #[arg(long, short, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Polling interval in seconds
    #[arg(long = "poll-interval", value_name = "SECS")]
    pub poll_interval: Option<u64>,

    /// Protocols to monitor
    #[arg(long, value_enum)]
    pub protocol: Option<ProtocolArg>,

    /// Regex pattern for processes to include (can be specified multiple times)
    #[arg(long = "include-process", value_name = "PATTERN")]
    pub include_processes: Vec<String>,

    /// Regex pattern for processes to exclude (can be specified multiple times)
    #[arg(long = "exclude-process", value_name = "PATTERN")]
    pub exclude_processes: Vec<String>,

    /// Port or port range to exclude, 'N' or 'N-M' (can be specified multiple times)
    #[arg(long = "exclude-port", value_name = "RANGE")]
    pub exclude_ports: Vec<String>,

    /// Output format for emitted snapshots
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Print one snapshot and exit
    #[arg(long)]
    pub once: bool,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for portwatch
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "portwatch.toml")]
        output: PathBuf,
    },
}

/// Protocol selection for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProtocolArg {
    /// Monitor TCP listeners only
    Tcp,
    /// Monitor UDP sockets only
    Udp,
    /// Monitor both TCP and UDP
    Both,
}

impl ProtocolArg {
    /// Returns the protocols this selection covers.
    #[must_use]
    pub fn protocols(self) -> Vec<Protocol> {
        match self {
            Self::Tcp => vec![Protocol::Tcp],
            Self::Udp => vec![Protocol::Udp],
            Self::Both => vec![Protocol::Tcp, Protocol::Udp],
        }
    }
}

impl From<Protocol> for ProtocolArg {
    fn from(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Tcp => Self::Tcp,
            Protocol::Udp => Self::Udp,
        }
    }
}

/// Output format argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Column-aligned text, one socket per line
    Text,
    /// One JSON object per update
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
