//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use portwatch::config::{ConfigError, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, missing required fields, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - unreadable observation file, closed stdout, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

fn config_hint(error: &ConfigError) -> Option<String> {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::INPUT => Some(
            "Pass --input with the observation file, or run 'portwatch init' to generate a \
             configuration template."
                .to_string(),
        ),
        ConfigError::FileRead { path, .. } => Some(format!(
            "Check the --config path '{}', or run 'portwatch init' to create it.",
            path.display()
        )),
        ConfigError::InvalidPortRange { .. } => Some(
            "Port ranges are written as 'N' or 'N-M', for example 53 or 6000-6010.".to_string(),
        ),
        _ => None,
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only snapshots.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_input_points_at_flag_and_init() {
        let hint = config_hint(&ConfigError::missing(field::INPUT, "")).unwrap();

        assert!(hint.contains("--input"));
        assert!(hint.contains("portwatch init"));
    }

    #[test]
    fn unreadable_config_names_the_path() {
        let error = ConfigError::FileRead {
            path: PathBuf::from("/etc/portwatch.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };

        let hint = config_hint(&error).unwrap();

        assert!(hint.contains("/etc/portwatch.toml"));
    }

    #[test]
    fn port_range_hint_shows_syntax() {
        let error = ConfigError::InvalidPortRange {
            value: "80-22".to_string(),
            reason: "start must not be greater than end".to_string(),
        };

        assert!(config_hint(&error).unwrap().contains("'N-M'"));
    }

    #[test]
    fn other_errors_have_no_hint() {
        let error = ConfigError::InvalidFormat {
            value: "yaml".to_string(),
        };

        assert!(config_hint(&error).is_none());
    }
}
