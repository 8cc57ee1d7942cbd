//! Default values for configuration options.

use std::time::Duration;

/// Default polling interval in seconds.
pub const POLL_INTERVAL_SECS: u64 = 5;

/// Default protocol selection.
pub const PROTOCOL: &str = "both";

/// Default output format.
pub const FORMAT: &str = "text";

/// Default polling interval as Duration.
#[must_use]
pub const fn poll_interval() -> Duration {
    Duration::from_secs(POLL_INTERVAL_SECS)
}
