//! Canonical snapshots of listening sockets.

use std::cmp::Ordering;

use serde::Serialize;

use crate::socket::Observation;

/// A canonical, immutable view of what is listening at one point in time.
///
/// A snapshot can only be built by [`normalize`], which guarantees that it is
/// strictly sorted by [`compare`] and holds at most one observation per
/// `(protocol, port)`. There is no mutable access to its contents.
///
/// Serializes as a plain JSON array of observations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    observations: Vec<Observation>,
}

impl Snapshot {
    /// Returns the observations in canonical order.
    #[must_use]
    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    /// Returns an iterator over the observations in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Returns the number of distinct `(protocol, port)` entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns true if nothing is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Consumes the snapshot and returns its observations.
    #[must_use]
    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

/// Total order over observations used to canonicalize a batch.
///
/// Fields are compared most-significant first:
/// 1. `port`, numerically
/// 2. `protocol`, by textual name (`"tcp"` before `"udp"`)
/// 3. `socket_identity`, lexicographically (empty first)
/// 4. `process`, lexicographically (empty first)
#[must_use]
pub fn compare(a: &Observation, b: &Observation) -> Ordering {
    a.port
        .cmp(&b.port)
        .then_with(|| a.protocol.as_str().cmp(b.protocol.as_str()))
        .then_with(|| a.socket_identity.cmp(&b.socket_identity))
        .then_with(|| a.process.cmp(&b.process))
}

/// Sorts and deduplicates a raw batch into a canonical [`Snapshot`].
///
/// The batch is sorted with [`compare`], then a single pass keeps the first
/// observation for each `(protocol, port)` key and drops the rest. Because of
/// the sort order the survivor is the one with the smallest
/// `(socket_identity, process)` pair.
///
/// Pure and total; the result does not depend on the input order.
///
/// # Examples
///
/// ```
/// use portwatch::monitor::normalize;
/// use portwatch::socket::Observation;
///
/// let snapshot = normalize(vec![
///     Observation::tcp(80, "sock2", "nginx"),
///     Observation::udp(53, "sock3", "dns"),
///     Observation::tcp(80, "", ""),
/// ]);
///
/// assert_eq!(
///     snapshot.as_slice(),
///     &[Observation::udp(53, "sock3", "dns"), Observation::tcp(80, "", "")]
/// );
/// ```
#[must_use]
pub fn normalize(mut batch: Vec<Observation>) -> Snapshot {
    batch.sort_by(compare);

    let mut observations: Vec<Observation> = Vec::with_capacity(batch.len());
    for observation in batch {
        let duplicate = observations
            .last()
            .is_some_and(|last| last.key() == observation.key());
        if !duplicate {
            observations.push(observation);
        }
    }

    Snapshot { observations }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
