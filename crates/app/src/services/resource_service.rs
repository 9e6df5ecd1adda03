//! Resource service: CRUD use-cases scoped to one resource key.
//!
//! Every operation loads the whole document from the store. Mutations hold
//! the document write lock from load to save, apply their change in memory
//! and persist the entire document.

use std::collections::HashSet;
use std::sync::Arc;

use jsonserver_domain::document::Document;
use jsonserver_domain::error::{
    AlreadyExistsError, DocumentError, JsonServerError, NotFoundError, ValidationError,
};
use jsonserver_domain::key::ResourceKey;
use jsonserver_domain::resource::Resource;

use crate::ports::{DocumentStore, IdGenerator};
use crate::services::document_service::Backend;

/// Upper bound on id candidates drawn for a single create.
pub const MAX_ID_ATTEMPTS: usize = 10_000;

/// Application service for the resources stored under one key.
pub struct ResourceService<S, G> {
    backend: Arc<Backend<S, G>>,
    key: ResourceKey,
}

impl<S, G> Clone for ResourceService<S, G> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            key: self.key.clone(),
        }
    }
}

impl<S, G> ResourceService<S, G> {
    pub(crate) fn new(backend: Arc<Backend<S, G>>, key: ResourceKey) -> Self {
        Self { backend, key }
    }

    /// The key this service is scoped to.
    #[must_use]
    pub fn key(&self) -> &ResourceKey {
        &self.key
    }

    fn name(&self) -> &str {
        self.key.name()
    }

    /// Scalar keys own no collection: list-only operations report the key as
    /// missing.
    fn require_list(&self) -> Result<(), JsonServerError> {
        if self.key.is_list() {
            Ok(())
        } else {
            Err(NotFoundError::Key {
                key: self.name().to_string(),
            }
            .into())
        }
    }
}

impl<S: DocumentStore, G: IdGenerator> ResourceService<S, G> {
    /// List every resource of the key.
    ///
    /// # Errors
    ///
    /// Returns [`JsonServerError::NotFound`] when the key is missing from the
    /// document or is a scalar key, or an internal error from the store.
    pub async fn find(&self) -> Result<Vec<Resource>, JsonServerError> {
        self.require_list()?;
        let document = self.backend.store.load().await?;
        document.resources(self.name())
    }

    /// Look up one resource by id.
    ///
    /// A scalar key ignores `id` and answers `{ <key>: <value> }`.
    ///
    /// # Errors
    ///
    /// Returns [`JsonServerError::NotFound`] when the key or id does not exist,
    /// or an internal error from the store.
    pub async fn find_by_id(&self, id: &str) -> Result<Resource, JsonServerError> {
        let document = self.backend.store.load().await?;
        if self.key.is_list() {
            document.resource(self.name(), id)
        } else {
            self.wrap_scalar(&document)
        }
    }

    /// Append a new resource, generating an id when none is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`JsonServerError::AlreadyExists`] when the supplied id is
    /// taken, [`JsonServerError::Validation`] when the supplied id is neither
    /// a string nor a number, [`JsonServerError::NotFound`] for a missing or
    /// scalar key, or an internal error when no free id can be found or the
    /// store fails.
    pub async fn create(&self, mut resource: Resource) -> Result<Resource, JsonServerError> {
        self.require_list()?;
        let _guard = self.backend.write_lock.lock().await;
        let mut document = self.backend.store.load().await?;
        let existing: HashSet<String> = document.ids(self.name())?.into_iter().collect();

        if resource.contains_id() {
            let id = resource.id().ok_or(ValidationError::InvalidId)?;
            if existing.contains(&id) {
                return Err(AlreadyExistsError {
                    key: self.name().to_string(),
                    id,
                }
                .into());
            }
            resource.set_id(id);
        } else {
            let id = self.generate_id(&existing)?;
            resource.set_id(id);
        }

        document.push(self.name(), resource.clone())?;
        self.backend.store.save(document).await?;
        tracing::debug!(key = self.name(), id = ?resource.id(), "resource created");
        Ok(resource)
    }

    /// Fully replace the resource with `id`. The stored id is always `id`.
    ///
    /// # Errors
    ///
    /// Returns [`JsonServerError::NotFound`] when the key or id does not exist,
    /// or an internal error from the store.
    pub async fn replace(
        &self,
        id: &str,
        mut resource: Resource,
    ) -> Result<Resource, JsonServerError> {
        self.require_list()?;
        let _guard = self.backend.write_lock.lock().await;
        let mut document = self.backend.store.load().await?;

        resource.set_id(id);
        document.swap(self.name(), id, resource.clone())?;
        self.backend.store.save(document).await?;
        tracing::debug!(key = self.name(), id, "resource replaced");
        Ok(resource)
    }

    /// Merge `patch` into the resource with `id`, field by field.
    ///
    /// # Errors
    ///
    /// Returns [`JsonServerError::NotFound`] when the key or id does not exist,
    /// or an internal error from the store.
    pub async fn update(&self, id: &str, patch: Resource) -> Result<Resource, JsonServerError> {
        self.require_list()?;
        let _guard = self.backend.write_lock.lock().await;
        let mut document = self.backend.store.load().await?;

        let mut merged = document.resource(self.name(), id)?;
        merged.merge(patch);
        merged.set_id(id);
        document.swap(self.name(), id, merged.clone())?;
        self.backend.store.save(document).await?;
        tracing::debug!(key = self.name(), id, "resource updated");
        Ok(merged)
    }

    /// Remove the resource with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`JsonServerError::NotFound`] when the key or id does not exist,
    /// or an internal error from the store.
    pub async fn delete(&self, id: &str) -> Result<(), JsonServerError> {
        self.require_list()?;
        let _guard = self.backend.write_lock.lock().await;
        let mut document = self.backend.store.load().await?;

        document.remove(self.name(), id)?;
        self.backend.store.save(document).await?;
        tracing::debug!(key = self.name(), id, "resource deleted");
        Ok(())
    }

    fn wrap_scalar(&self, document: &Document) -> Result<Resource, JsonServerError> {
        let value = document.get(self.name()).ok_or_else(|| NotFoundError::Key {
            key: self.name().to_string(),
        })?;
        let mut wrapped = Resource::new();
        wrapped.insert(self.name(), value.clone());
        Ok(wrapped)
    }

    fn generate_id(&self, existing: &HashSet<String>) -> Result<String, JsonServerError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.backend.ids.next_id();
            if !existing.contains(&candidate) {
                return Ok(candidate);
            }
        }
        tracing::warn!(key = self.name(), attempts = MAX_ID_ATTEMPTS, "id space exhausted");
        Err(DocumentError::IdSpaceExhausted {
            key: self.name().to_string(),
            attempts: MAX_ID_ATTEMPTS,
        }
        .into())
    }
}
