//! Core types for listening socket records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Transport protocol of a listening socket.
///
/// Ordering between protocols is defined by their textual name
/// (see [`Protocol::as_str`]), not by variant declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// TCP listener.
    Tcp,
    /// UDP socket bound to a local port.
    Udp,
}

impl Protocol {
    /// Returns the lowercase textual name (`"tcp"` or `"udp"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown protocol name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown protocol '{0}': expected tcp or udp")]
pub struct ParseProtocolError(String);

impl FromStr for Protocol {
    type Err = ParseProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            _ => Err(ParseProtocolError(s.to_string())),
        }
    }
}

/// One listening endpoint as seen in a single enumeration pass.
///
/// `process` and `socket_identity` are best-effort: an empty string means
/// the collector could not resolve them.
///
/// # Equality
///
/// The derived equality compares every field, including `process`.
/// Change detection between snapshots deliberately ignores `process`;
/// see [`crate::monitor::unchanged`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    /// Transport protocol.
    pub protocol: Protocol,
    /// Local port number.
    pub port: u16,
    /// Name of the owning process, empty if unresolved.
    #[serde(default)]
    pub process: String,
    /// Opaque OS handle for the kernel socket (e.g. `socket:[165614651]`).
    #[serde(default)]
    pub socket_identity: String,
}

impl Observation {
    /// Creates a fully populated observation.
    #[must_use]
    pub fn new(
        protocol: Protocol,
        port: u16,
        socket_identity: impl Into<String>,
        process: impl Into<String>,
    ) -> Self {
        Self {
            protocol,
            port,
            process: process.into(),
            socket_identity: socket_identity.into(),
        }
    }

    /// Creates a TCP observation.
    #[must_use]
    pub fn tcp(port: u16, socket_identity: impl Into<String>, process: impl Into<String>) -> Self {
        Self::new(Protocol::Tcp, port, socket_identity, process)
    }

    /// Creates a UDP observation.
    #[must_use]
    pub fn udp(port: u16, socket_identity: impl Into<String>, process: impl Into<String>) -> Self {
        Self::new(Protocol::Udp, port, socket_identity, process)
    }

    /// Returns the `(protocol, port)` key used for deduplication.
    #[must_use]
    pub const fn key(&self) -> (Protocol, u16) {
        (self.protocol, self.port)
    }

    /// Returns true if both observations describe the same live socket.
    ///
    /// Compares protocol, port and socket identity; `process` is ignored.
    #[must_use]
    pub fn same_socket(&self, other: &Self) -> bool {
        self.protocol == other.protocol
            && self.port == other.port
            && self.socket_identity == other.socket_identity
    }
}
