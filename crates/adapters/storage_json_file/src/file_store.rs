//! JSON file implementation of [`DocumentStore`].

use std::fs;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use jsonserver_app::ports::DocumentStore;
use jsonserver_domain::document::Document;
use jsonserver_domain::error::JsonServerError;

use crate::error::StorageError;

/// File-backed document store.
///
/// Holds nothing but the path: every load reads the file again, every save
/// rewrites it completely.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the file at `path`. The file is not touched.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> impl Future<Output = Result<Document, JsonServerError>> + Send {
        let path = self.path.clone();
        async move {
            let document = tokio::task::spawn_blocking(move || read_document(&path))
                .await
                .map_err(StorageError::from)??;
            Ok(document)
        }
    }

    fn save(&self, document: Document) -> impl Future<Output = Result<(), JsonServerError>> + Send {
        let path = self.path.clone();
        async move {
            tokio::task::spawn_blocking(move || write_document(&path, &document))
                .await
                .map_err(StorageError::from)??;
            Ok(())
        }
    }
}

fn read_document(path: &Path) -> Result<Document, StorageError> {
    let bytes = fs::read(path)?;
    let document = serde_json::from_slice(&bytes)?;
    Ok(document)
}

/// Write next to the target then rename over it, so readers see either the
/// old or the new document and never a truncated file.
fn write_document(path: &Path, document: &Document) -> Result<(), StorageError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, document)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), metadata.permissions())?;
    }

    tmp.persist(path)?;
    tracing::trace!(path = %path.display(), "document written");
    Ok(())
}
