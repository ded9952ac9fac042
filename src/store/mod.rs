//! Durable single-snapshot store for the scraped story list.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::{core::NewsError, listing::Story};

/// File-backed store holding the most recent story snapshot as a JSON array.
///
/// One writer (the refresh job) and many readers (request handlers) share
/// the file. `replace` goes through a sibling temp file and a rename, so a
/// concurrent reader sees either the old or the new snapshot in full, never
/// a torn write. Only whole-snapshot replace and whole-snapshot read are
/// supported.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a snapshot has ever been written.
    pub fn is_populated(&self) -> bool {
        self.path.exists()
    }

    /// Atomically overwrite the snapshot with `stories`.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Io`] if the temp file cannot be written or the
    /// rename fails, and [`NewsError::Data`] if serialization fails.
    pub async fn replace(&self, stories: &[Story]) -> Result<(), NewsError> {
        let bytes = serde_json::to_vec(stories)
            .map_err(|e| NewsError::Data(format!("snapshot encode: {e}")))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write to temp, then rename: the snapshot file is always complete.
        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::NotReady`] when no snapshot has ever been
    /// written and [`NewsError::Corrupt`] when the file exists but cannot
    /// be parsed.
    pub async fn read(&self) -> Result<Vec<Story>, NewsError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(NewsError::NotReady);
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes).map_err(|e| NewsError::Corrupt(e.to_string()))
    }
}
