//! Monitor layer for canonicalizing snapshots and detecting changes.
//!
//! This module provides types and functions for:
//! - Canonical snapshots of listening sockets ([`Snapshot`], [`normalize`], [`compare`])
//! - Detecting meaningful changes between snapshots ([`unchanged`])
//! - Rendering snapshots for logs ([`render`])
//! - Polling-based monitoring ([`PollingMonitor`], [`PollingStream`], [`PortUpdate`])

mod change;
mod poller;
mod render;
mod snapshot;
mod update;

pub use change::unchanged;
pub use poller::{PollingMonitor, PollingStream};
pub use render::render;
pub use snapshot::{Snapshot, compare, normalize};
pub use update::PortUpdate;
