//! Tests for `PollingMonitor` configuration.

use super::*;
use crate::socket::{CollectError, Collector, Observation};
use crate::time::Clock;
use std::time::{Duration, SystemTime};

/// Mock clock returning a fixed time.
struct FixedClock(u64);

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(self.0)
    }
}

/// Mock collector that always returns the same batch.
struct FixedCollector(Vec<Observation>);

impl Collector for FixedCollector {
    fn collect(&self) -> Result<Vec<Observation>, CollectError> {
        Ok(self.0.clone())
    }
}

#[test]
fn new_creates_with_interval() {
    let monitor = PollingMonitor::new(FixedCollector(vec![]), Duration::from_secs(5));

    assert_eq!(monitor.interval(), Duration::from_secs(5));
}

#[test]
fn with_clock_allows_custom_clock() {
    let monitor =
        PollingMonitor::with_clock(FixedCollector(vec![]), FixedClock(1000), Duration::from_secs(30));

    assert_eq!(monitor.interval(), Duration::from_secs(30));
}

#[tokio::test]
async fn into_stream_starts_without_snapshot() {
    let monitor = PollingMonitor::new(FixedCollector(vec![]), Duration::from_millis(10));
    let stream = monitor.into_stream();

    assert!(stream.current_snapshot().is_none());
}
