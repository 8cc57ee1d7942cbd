//! Injectable time source.
//!
//! [`PortUpdate`](crate::monitor::PortUpdate) timestamps come from a
//! [`Clock`] so poller tests can assert exact times.

use std::time::SystemTime;

/// Source of wall-clock time for stamping emitted snapshots.
///
/// # Example
///
/// ```
/// use portwatch::time::{Clock, SystemClock};
///
/// let stamp = SystemClock.now();
/// assert!(stamp > std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;
}

/// Clock backed by [`SystemTime::now()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> SystemTime {
        (*self).now()
    }
}
