//! Configuration layer for portwatch.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The observation file (`--input` / `source.path`) has no default and must
//! come from one of the two sources. A leading `~` is expanded to the home
//! directory.
//!
//! For filter lists (`include`, `exclude`, `exclude_ports`), CLI values **replace**
//! the TOML list entirely (not merged). Each list is handled independently:
//! passing `--include-process` replaces only the TOML includes.
//!
//! # CLI-Only Options
//!
//! `--once` and `--verbose` have no TOML counterpart.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use cli::{Cli, Command, FormatArg, ProtocolArg};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{OutputFormat, ValidatedConfig, write_default_config};
