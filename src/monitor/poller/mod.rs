//! Polling-based listening port monitor.
//!
//! This module provides:
//! - [`PollingMonitor`]: Builder/configuration for polling-based monitoring
//! - [`PollingStream`]: Stream that yields a [`super::PortUpdate`] per change

mod monitor;
mod stream;

pub use monitor::PollingMonitor;
pub use stream::PollingStream;

#[cfg(test)]
mod monitor_test;
