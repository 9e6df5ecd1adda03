//! Document service: whole-document use-cases and per-key service factory.

use std::sync::Arc;

use tokio::sync::Mutex;

use jsonserver_domain::document::Document;
use jsonserver_domain::error::JsonServerError;
use jsonserver_domain::key::ResourceKey;

use crate::ports::{DocumentStore, IdGenerator};
use crate::services::resource_service::ResourceService;

/// Ports shared by every service built from one [`DocumentService`].
pub(crate) struct Backend<S, G> {
    pub(crate) store: S,
    pub(crate) ids: G,
    /// Serializes read-modify-write cycles issued through this process.
    pub(crate) write_lock: Mutex<()>,
}

/// Application service for the document as a whole.
///
/// `Clone` is implemented manually so the ports themselves do not need to be
/// `Clone`. Only the `Arc` is cloned.
pub struct DocumentService<S, G> {
    backend: Arc<Backend<S, G>>,
}

impl<S, G> Clone for DocumentService<S, G> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<S, G> DocumentService<S, G> {
    /// Create a new service backed by the given store and id source.
    pub fn new(store: S, ids: G) -> Self {
        Self {
            backend: Arc::new(Backend {
                store,
                ids,
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// Build the service scoped to one resource key.
    ///
    /// Every resource service shares this document's store and write lock,
    /// so mutations on different keys never overwrite each other.
    #[must_use]
    pub fn resource(&self, key: ResourceKey) -> ResourceService<S, G> {
        ResourceService::new(Arc::clone(&self.backend), key)
    }
}

impl<S: DocumentStore, G: IdGenerator> DocumentService<S, G> {
    /// Return the entire document as stored.
    ///
    /// # Errors
    ///
    /// Returns an internal error when the store cannot be read or decoded.
    pub async fn dump(&self) -> Result<Document, JsonServerError> {
        self.backend.store.load().await
    }

    /// Load the document and classify every top-level key.
    ///
    /// Meant to be called once at startup: the classification is kept for
    /// the lifetime of the process even if the file changes shape later.
    ///
    /// # Errors
    ///
    /// Returns an internal error when the store cannot be read or decoded.
    pub async fn discover(&self) -> Result<Vec<ResourceKey>, JsonServerError> {
        let document = self.dump().await?;
        let keys = document.resource_keys();
        tracing::debug!(count = keys.len(), "discovered resource keys");
        Ok(keys)
    }
}
