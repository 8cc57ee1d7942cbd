//! Update events emitted by the poller.

use std::time::{SystemTime, UNIX_EPOCH};

use super::Snapshot;

/// A snapshot that differs from the previously emitted one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortUpdate {
    /// The new canonical snapshot.
    pub snapshot: Snapshot,
    /// When the snapshot was taken.
    pub timestamp: SystemTime,
}

impl PortUpdate {
    /// Creates a new update.
    #[must_use]
    pub const fn new(snapshot: Snapshot, timestamp: SystemTime) -> Self {
        Self {
            snapshot,
            timestamp,
        }
    }

    /// Returns the timestamp as whole seconds since the Unix epoch.
    ///
    /// Pre-epoch timestamps map to 0.
    #[must_use]
    pub fn unix_timestamp(&self) -> u64 {
        self.timestamp
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs())
    }
}
