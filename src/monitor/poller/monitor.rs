//! Polling monitor configuration.
//!
//! This module provides [`PollingMonitor`], the builder/configuration struct
//! for creating polling-based port monitors.

use super::stream::PollingStream;
use crate::socket::Collector;
use crate::time::{Clock, SystemClock};
use std::time::Duration;

/// Polling-based listening port monitor.
///
/// Periodically invokes a [`Collector`], canonicalizes the batch and emits a
/// [`super::super::PortUpdate`] whenever the set of live sockets changes.
///
/// # Type Parameters
///
/// * `C` - The [`Collector`] implementation producing raw batches
/// * `K` - The [`Clock`] implementation for timestamps (defaults to [`SystemClock`])
///
/// # Example
///
/// ```ignore
/// use portwatch::monitor::PollingMonitor;
/// use portwatch::socket::FileCollector;
/// use std::time::Duration;
///
/// let monitor = PollingMonitor::new(FileCollector::new("ports.json"), Duration::from_secs(5));
///
/// let mut stream = monitor.into_stream();
/// while let Some(update) = stream.next().await {
///     println!("{}", update.snapshot);
/// }
/// ```
pub struct PollingMonitor<C, K = SystemClock> {
    collector: C,
    clock: K,
    interval: Duration,
}

impl<C> PollingMonitor<C, SystemClock>
where
    C: Collector,
{
    /// Creates a new polling monitor with system clock.
    #[must_use]
    pub const fn new(collector: C, interval: Duration) -> Self {
        Self::with_clock(collector, SystemClock, interval)
    }
}

impl<C, K> PollingMonitor<C, K>
where
    C: Collector,
    K: Clock,
{
    /// Creates a new polling monitor with a custom clock.
    ///
    /// This constructor allows injecting a mock clock for testing.
    #[must_use]
    pub const fn with_clock(collector: C, clock: K, interval: Duration) -> Self {
        Self {
            collector,
            clock,
            interval,
        }
    }

    /// Returns the configured polling interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Converts this monitor into a stream of port updates.
    ///
    /// The first successful poll is always emitted. The stream never
    /// terminates on its own; drop it (e.g. from a `select!` on a shutdown
    /// signal) to stop polling.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime or with a zero interval.
    #[must_use]
    pub fn into_stream(self) -> PollingStream<C, K> {
        PollingStream::new(self.collector, self.clock, self.interval)
    }
}
