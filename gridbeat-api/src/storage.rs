//! Sample file store
//!
//! Writes uploaded audio bytes under the sample directory, keyed by a fresh
//! UUID. The stored extension is the first dot-segment suffix of the
//! original filename, lower-cased; extensionless uploads land under the
//! bare UUID.

use gridbeat_common::Result;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct FileStore {
    sample_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: Uuid,
    pub file_path: PathBuf,
    pub file_extension: String,
}

impl FileStore {
    pub fn new(sample_dir: impl Into<PathBuf>) -> Self {
        Self {
            sample_dir: sample_dir.into(),
        }
    }

    pub fn sample_dir(&self) -> &Path {
        &self.sample_dir
    }

    /// Write `data` to disk, creating the sample directory if absent.
    /// Write failures propagate to the caller and abort the mutation.
    pub async fn store(&self, filename: &str, data: &[u8]) -> Result<StoredFile> {
        let file_extension = filename
            .split('.')
            .nth(1)
            .unwrap_or_default()
            .to_lowercase();

        let id = Uuid::new_v4();

        let file_name = if file_extension.is_empty() {
            id.to_string()
        } else {
            format!("{}.{}", id, file_extension)
        };
        let file_path = self.sample_dir.join(file_name);

        tokio::fs::create_dir_all(&self.sample_dir).await?;
        tokio::fs::write(&file_path, data).await?;

        debug!("Stored sample file at path {}", file_path.display());

        Ok(StoredFile {
            id,
            file_path,
            file_extension,
        })
    }
}
