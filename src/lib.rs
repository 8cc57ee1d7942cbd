//! portwatch: Listening Port Monitor
//!
//! A library for keeping a canonical snapshot of listening TCP/UDP sockets
//! and detecting when that set meaningfully changes.

pub mod config;
pub mod monitor;
pub mod socket;
pub mod time;
