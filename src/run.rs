//! Application execution logic.
//!
//! This module contains the main async execution loop that polls the
//! observation file and writes each changed snapshot to stdout.

use std::io::{self, Write};
use std::time::{Duration, SystemTime};

use serde::Serialize;
use thiserror::Error;
use tokio::signal;
use tokio_stream::StreamExt;

use portwatch::config::{OutputFormat, ValidatedConfig};
use portwatch::monitor::{PollingMonitor, PortUpdate, Snapshot, normalize, render};
use portwatch::socket::filter::{FilterChain, FilteredCollector};
use portwatch::socket::{CollectError, Collector, FileCollector};

/// Type alias for the application's filtered collector.
type AppCollector = FilteredCollector<FileCollector, FilterChain>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to collect the single snapshot requested by `--once`.
    #[error("Failed to collect listening ports: {0}")]
    InitialCollect(#[source] CollectError),

    /// Unexpected stream termination.
    #[error("Monitor stream terminated unexpectedly")]
    StreamTerminated,

    /// Failed to write a snapshot to stdout.
    #[error("Failed to write output: {0}")]
    Output(#[source] io::Error),
}

/// Runtime options extracted from validated config.
///
/// This struct holds only the fields needed for the monitoring loop,
/// allowing the config's `filter` field to be moved separately.
struct RuntimeOptions {
    poll_interval: Duration,
    format: OutputFormat,
    once: bool,
}

impl From<&ValidatedConfig> for RuntimeOptions {
    fn from(config: &ValidatedConfig) -> Self {
        Self {
            poll_interval: config.poll_interval,
            format: config.format,
            once: config.once,
        }
    }
}

/// JSON line written for each update in `json` format.
#[derive(Debug, Serialize)]
struct JsonUpdate<'a> {
    timestamp: u64,
    ports: &'a Snapshot,
}

/// Executes the main application.
///
/// This function:
/// 1. Creates the file collector with configured filters
/// 2. In `--once` mode, collects and prints a single snapshot
/// 3. Otherwise polls until a shutdown signal (Ctrl+C / SIGTERM)
///
/// # Errors
///
/// Returns an error if:
/// - The single `--once` collection fails
/// - The monitor stream terminates unexpectedly
/// - Writing to stdout fails
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// a real async runtime with signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let options = RuntimeOptions::from(&config);

    // Consumes config.filter
    let collector = FilteredCollector::new(FileCollector::new(config.input), config.filter);

    if options.once {
        let update = collect_once(&collector, SystemTime::now())?;
        return write_update(&mut io::stdout().lock(), &update, options.format)
            .map_err(RunError::Output);
    }

    tracing::info!(
        "Watching {} (interval: {:?})",
        collector.inner().path().display(),
        options.poll_interval
    );
    run_polling_loop(collector, options).await
}

/// Collects one batch and normalizes it into a timestamped update.
fn collect_once<C: Collector>(
    collector: &C,
    timestamp: SystemTime,
) -> Result<PortUpdate, RunError> {
    let batch = collector.collect().map_err(RunError::InitialCollect)?;
    Ok(PortUpdate::new(normalize(batch), timestamp))
}

/// Runs the polling loop until shutdown.
///
/// Excluded from coverage - requires signal handling.
#[cfg(not(tarpaulin_include))]
async fn run_polling_loop(collector: AppCollector, options: RuntimeOptions) -> Result<(), RunError> {
    let monitor = PollingMonitor::new(collector, options.poll_interval);

    let mut stream = monitor.into_stream();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                return Ok(());
            }

            update = stream.next() => {
                let Some(update) = update else {
                    return Err(RunError::StreamTerminated);
                };

                tracing::info!("Listening ports changed: {} socket(s)", update.snapshot.len());
                write_update(&mut io::stdout().lock(), &update, options.format)
                    .map_err(RunError::Output)?;
            }
        }
    }
}

/// Writes one update in the configured format and flushes.
///
/// `text` writes the rendered snapshot followed by a blank separator line;
/// `json` writes a single `{"timestamp":..,"ports":[..]}` line.
fn write_update<W: Write>(out: &mut W, update: &PortUpdate, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            let rendered = render(&update.snapshot);
            if !rendered.is_empty() {
                writeln!(out, "{rendered}")?;
            }
            writeln!(out)?;
        }
        OutputFormat::Json => {
            let line = JsonUpdate {
                timestamp: update.unix_timestamp(),
                ports: &update.snapshot,
            };
            serde_json::to_writer(&mut *out, &line)?;
            writeln!(out)?;
        }
    }

    out.flush()
}

/// Returns a future that completes when a shutdown signal is received.
///
/// If a handler cannot be installed the failure is logged and that signal
/// source never fires.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
