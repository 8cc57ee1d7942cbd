//! Human-readable rendering of snapshots.
//!
//! The output is meant for logs and eyeball diffs. It is not a stable
//! machine format; use the JSON serialization of [`Snapshot`] for that.

use std::fmt::{self, Write};

use super::Snapshot;
use crate::socket::Observation;

/// Renders a snapshot as fixed-width text, one line per observation.
///
/// Columns: protocol (left, 3), port (right, 5), socket identity (left, 17),
/// then the process name as a quoted, escaped literal so empty or
/// control-character names stay unambiguous. Lines are separated by `\n`
/// with no trailing newline.
///
/// ```
/// use portwatch::monitor::{normalize, render};
/// use portwatch::socket::Observation;
///
/// let snapshot = normalize(vec![
///     Observation::tcp(22, "socket:[1234]", "sshd"),
///     Observation::udp(53, "", ""),
/// ]);
///
/// assert_eq!(
///     render(&snapshot),
///     "tcp    22 socket:[1234]     \"sshd\"\nudp    53                   \"\""
/// );
/// ```
#[must_use]
pub fn render(snapshot: &Snapshot) -> String {
    snapshot.to_string()
}

fn write_line(f: &mut impl Write, observation: &Observation) -> fmt::Result {
    write!(
        f,
        "{:<3} {:>5} {:<17} {:?}",
        observation.protocol.as_str(),
        observation.port,
        observation.socket_identity,
        observation.process,
    )
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, observation) in self.iter().enumerate() {
            if index > 0 {
                f.write_char('\n')?;
            }
            write_line(f, observation)?;
        }
        Ok(())
    }
}
