//! Collector trait and error types.

use std::path::PathBuf;

use super::Observation;
use thiserror::Error;

/// Error type for collection operations.
///
/// Describes what went wrong without dictating recovery strategy.
/// The poller skips the failed tick and keeps its previous snapshot.
#[derive(Debug, Error)]
pub enum CollectError {
    /// The observation source could not be read.
    #[error("Failed to read observations from '{}': {source}", path.display())]
    Io {
        /// Path of the observation source.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The observation source contained malformed records.
    #[error("Failed to parse observations from '{}': {source}", path.display())]
    Parse {
        /// Path of the observation source.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Trait for producing raw batches of listening socket observations.
///
/// # Design
///
/// - Platform enumeration (walking `/proc`, socket tables, process lookup)
///   lives behind this trait and outside the core
/// - Enables dependency injection for testing with mock implementations
/// - Decorators such as [`super::filter::FilteredCollector`] wrap any collector
///
/// # Example
///
/// ```ignore
/// use portwatch::socket::{Collector, CollectError, Observation};
///
/// struct Fixed(Vec<Observation>);
///
/// impl Collector for Fixed {
///     fn collect(&self) -> Result<Vec<Observation>, CollectError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait Collector: Send + Sync {
    /// Enumerates the sockets currently listening on this machine.
    ///
    /// The batch is unordered and may contain several observations for the
    /// same `(protocol, port)`; canonicalization is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError`] when the underlying source cannot be read
    /// or contains malformed records.
    fn collect(&self) -> Result<Vec<Observation>, CollectError>;
}

impl<T: Collector + ?Sized> Collector for &T {
    fn collect(&self) -> Result<Vec<Observation>, CollectError> {
        (*self).collect()
    }
}
