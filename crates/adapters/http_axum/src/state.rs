//! Shared application state for axum handlers.

use std::sync::Arc;

use jsonserver_app::services::document_service::DocumentService;
use jsonserver_domain::key::ResourceKey;

/// State of the fixed endpoints (`/`, `/db`) and source of the per-key
/// services.
///
/// Generic over the document store and id generator to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`.
pub struct AppState<S, G> {
    /// Whole-document service; also builds the per-key services.
    pub document_service: DocumentService<S, G>,
    /// Keys that get routes, in document order.
    pub keys: Arc<[ResourceKey]>,
}

impl<S, G> Clone for AppState<S, G> {
    fn clone(&self) -> Self {
        Self {
            document_service: self.document_service.clone(),
            keys: Arc::clone(&self.keys),
        }
    }
}

impl<S, G> AppState<S, G> {
    /// Create the state from the keys discovered at startup.
    ///
    /// Keys that cannot be used as a path segment (see
    /// [`ResourceKey::is_routable`]) are dropped with a warning; they remain
    /// visible through `/db`.
    pub fn new(document_service: DocumentService<S, G>, keys: Vec<ResourceKey>) -> Self {
        let keys: Vec<ResourceKey> = keys
            .into_iter()
            .filter(|key| {
                let routable = key.is_routable();
                if !routable {
                    tracing::warn!(key = key.name(), "resource key cannot be routed, skipping");
                }
                routable
            })
            .collect();

        Self {
            document_service,
            keys: keys.into(),
        }
    }
}
