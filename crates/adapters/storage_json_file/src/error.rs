//! Storage-specific error type wrapping filesystem and codec errors.

use jsonserver_domain::error::JsonServerError;

/// Errors originating from the JSON file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the file failed.
    #[error("file I/O error")]
    Io(#[from] std::io::Error),

    /// The file content is not a JSON object, or encoding failed.
    #[error("JSON codec error")]
    Json(#[from] serde_json::Error),

    /// The temporary file could not be renamed over the target.
    #[error("failed to replace document file")]
    Persist(#[from] tempfile::PersistError),

    /// The blocking task running the filesystem work panicked or was cancelled.
    #[error("blocking storage task failed")]
    Join(#[from] tokio::task::JoinError),
}

impl From<StorageError> for JsonServerError {
    fn from(err: StorageError) -> Self {
        Self::Internal(Box::new(err))
    }
}
