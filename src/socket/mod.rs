//! Socket layer for representing and collecting listening socket records.
//!
//! This module provides types and traits for:
//! - Representing one listening socket ([`Observation`], [`Protocol`])
//! - Producing raw observation batches ([`Collector`])
//! - Reading batches written by an external enumerator ([`FileCollector`])
//! - Selecting which sockets to watch ([`filter`])

mod collector;
mod file;
pub mod filter;
mod observation;

#[cfg(test)]
mod filter_tests;

pub use collector::{CollectError, Collector};
pub use file::FileCollector;
pub use observation::{Observation, ParseProtocolError, Protocol};
