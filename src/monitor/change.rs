//! Change detection between canonical snapshots.

use super::Snapshot;

/// Returns true if two snapshots describe the same set of live sockets.
///
/// Both snapshots are canonical, so the comparison is an index-wise walk:
/// lengths must match and every position must agree on protocol, port and
/// socket identity. The `process` field is ignored, since name resolution
/// can differ between polls of the same socket.
///
/// A port that is closed and immediately re-bound shows up with a new socket
/// identity and is therefore reported as changed.
///
/// # Examples
///
/// ```
/// use portwatch::monitor::{normalize, unchanged};
/// use portwatch::socket::Observation;
///
/// let previous = normalize(vec![Observation::tcp(22, "sockA", "sshd")]);
/// let renamed = normalize(vec![Observation::tcp(22, "sockA", "sshd2")]);
/// let rebound = normalize(vec![Observation::tcp(22, "sockB", "sshd")]);
///
/// assert!(unchanged(&previous, &renamed));
/// assert!(!unchanged(&previous, &rebound));
/// ```
#[must_use]
pub fn unchanged(previous: &Snapshot, current: &Snapshot) -> bool {
    previous.len() == current.len()
        && previous
            .iter()
            .zip(current.iter())
            .all(|(before, after)| before.same_socket(after))
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
