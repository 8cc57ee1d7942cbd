//! Polling stream implementation.
//!
//! This module provides [`PollingStream`], a stream that periodically
//! collects listening sockets and yields a new snapshot when they change.

use super::super::{PortUpdate, Snapshot, normalize, unchanged};
use crate::socket::{CollectError, Collector};
use crate::time::Clock;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tokio_stream::Stream;

/// A stream of port updates produced by polling.
///
/// This type is returned by [`super::PollingMonitor::into_stream`]. Polls run
/// one at a time from `poll_next`, so the snapshot used for comparison is
/// always the most recently emitted one.
pub struct PollingStream<C, K> {
    collector: C,
    clock: K,
    interval: Interval,
    /// Last emitted snapshot; `None` until the first successful poll
    current: Option<Snapshot>,
}

impl<C, K> PollingStream<C, K>
where
    C: Collector,
    K: Clock,
{
    pub(super) fn new(collector: C, clock: K, poll_interval: Duration) -> Self {
        let mut interval = interval(poll_interval);
        // A slow collector must not cause a burst of catch-up polls
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            collector,
            clock,
            interval,
            current: None,
        }
    }

    /// Returns the most recently emitted snapshot, if any.
    #[must_use]
    pub const fn current_snapshot(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    /// Performs a single poll and returns an update if the snapshot changed.
    fn poll_once(&mut self) -> Result<Option<PortUpdate>, CollectError> {
        let batch = self.collector.collect()?;
        let raw_count = batch.len();
        let snapshot = normalize(batch);

        if let Some(previous) = &self.current {
            if unchanged(previous, &snapshot) {
                tracing::trace!(ports = snapshot.len(), "Listening ports unchanged");
                return Ok(None);
            }
        }

        tracing::debug!(
            observed = raw_count,
            ports = snapshot.len(),
            "Listening ports changed"
        );
        self.current = Some(snapshot.clone());
        Ok(Some(PortUpdate::new(snapshot, self.clock.now())))
    }
}

impl<C, K> Stream for PollingStream<C, K>
where
    C: Collector + Unpin,
    K: Clock + Unpin,
{
    type Item = PortUpdate;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            // Registers the waker for the next tick when Pending
            if self.interval.poll_tick(cx).is_pending() {
                return Poll::Pending;
            }

            // Collector errors must not terminate the stream; the previous
            // snapshot stays current until a poll succeeds.
            match self.poll_once() {
                Ok(Some(update)) => return Poll::Ready(Some(update)),
                Ok(None) => {}
                Err(e) => tracing::warn!("Failed to collect listening ports: {e}"),
            }
        }
    }
}
