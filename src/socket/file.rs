//! File-backed collector.

use std::path::{Path, PathBuf};

use super::{CollectError, Collector, Observation};

/// Reads a raw observation batch from a JSON file on every call.
///
/// The file holds a JSON array of [`Observation`] records and is expected
/// to be rewritten by an external enumerator between polls. A file that
/// contains only whitespace is treated as an empty batch.
#[derive(Debug, Clone)]
pub struct FileCollector {
    path: PathBuf,
}

impl FileCollector {
    /// Creates a collector reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the observation file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, content: &str) -> Result<Vec<Observation>, CollectError> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(content).map_err(|source| CollectError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl Collector for FileCollector {
    fn collect(&self) -> Result<Vec<Observation>, CollectError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| CollectError::Io {
            path: self.path.clone(),
            source,
        })?;

        let batch = self.parse(&content)?;
        tracing::trace!(
            path = %self.path.display(),
            count = batch.len(),
            "Collected observation batch"
        );
        Ok(batch)
    }
}
