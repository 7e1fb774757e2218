//! Artefact storage
//!
//! Persists raw uploads and converted JSON under artefact-ID-addressed paths:
//! `<artefact_id>.upload.<ext>` for the file as received and
//! `<artefact_id>.json` for the payload. Only the extension of the uploaded
//! file name is kept, so callers cannot influence where files are written.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A file written by an [`ArtefactStore`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredArtefact {
    pub artefact_id: Uuid,
    pub path: PathBuf,
    /// Hex SHA-256 of the bytes written
    pub checksum: String,
}

/// Destination for uploaded files and their converted JSON.
pub trait ArtefactStore {
    /// Store the upload as received as `<artefact_id>.upload[.<ext>]`
    fn save_uploaded_file(
        &self,
        artefact_id: Uuid,
        file_name: &str,
        content: &[u8],
    ) -> StorageResult<StoredArtefact>;

    /// Store the converted or validated payload as `<artefact_id>.json`
    fn save_json(&self, artefact_id: Uuid, payload: &Value) -> StorageResult<StoredArtefact>;
}

/// [`ArtefactStore`] writing into a directory on the local file system.
#[derive(Debug, Clone)]
pub struct FileSystemArtefactStore {
    root: PathBuf,
}

impl FileSystemArtefactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn write(
        &self,
        artefact_id: Uuid,
        file_name: String,
        content: &[u8],
    ) -> StorageResult<StoredArtefact> {
        std::fs::create_dir_all(&self.root).map_err(|e| {
            StorageError::IoError(format!(
                "Failed to create directory {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let path = self.root.join(file_name);
        std::fs::write(&path, content).map_err(|e| {
            StorageError::IoError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        info!("Stored artefact {} at {}", artefact_id, path.display());
        Ok(StoredArtefact {
            artefact_id,
            path,
            checksum: checksum(content),
        })
    }
}

impl ArtefactStore for FileSystemArtefactStore {
    fn save_uploaded_file(
        &self,
        artefact_id: Uuid,
        file_name: &str,
        content: &[u8],
    ) -> StorageResult<StoredArtefact> {
        let stored_name = match file_extension(file_name) {
            Some(ext) => format!("{}.upload.{}", artefact_id, ext),
            None => format!("{}.upload", artefact_id),
        };
        self.write(artefact_id, stored_name, content)
    }

    fn save_json(&self, artefact_id: Uuid, payload: &Value) -> StorageResult<StoredArtefact> {
        let content = serde_json::to_vec_pretty(payload)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        self.write(artefact_id, format!("{}.json", artefact_id), &content)
    }
}

/// Lower-cased extension of `file_name`, if it has a plain alphanumeric one
pub(crate) fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
}

fn checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}
