//! JSON REST handler modules and the per-key dispatch table.

#[allow(clippy::missing_errors_doc)]
pub mod db;
pub mod payload;
#[allow(clippy::missing_errors_doc)]
pub mod resources;

use axum::Router;
use axum::routing::get;

use jsonserver_app::ports::{DocumentStore, IdGenerator};
use jsonserver_domain::key::ResourceKind;

use crate::state::AppState;

/// Build the routes of every resource key.
///
/// Each key gets its own sub-router carrying a `ResourceService` scoped to
/// that key as state:
///
/// | key kind | route | verbs |
/// |---|---|---|
/// | list | `/<key>` | `GET` list, `POST` create |
/// | list | `/<key>/{id}` | `GET` read, `PUT` replace, `PATCH` update, `DELETE` delete |
/// | scalar | `/<key>` | `GET` read |
pub fn routes<S, G>(state: &AppState<S, G>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
    G: IdGenerator + Send + Sync + 'static,
{
    state.keys.iter().fold(Router::new(), |router, key| {
        let service = state.document_service.resource(key.clone());
        let key_router = match key.kind() {
            ResourceKind::List => Router::new()
                .route(
                    &key.collection_path(),
                    get(resources::list::<S, G>).post(resources::create::<S, G>),
                )
                .route(
                    &key.item_path(),
                    get(resources::read::<S, G>)
                        .put(resources::replace::<S, G>)
                        .patch(resources::update::<S, G>)
                        .delete(resources::delete::<S, G>),
                ),
            ResourceKind::Scalar => Router::new().route(
                &key.collection_path(),
                get(resources::read_scalar::<S, G>),
            ),
        };
        tracing::debug!(key = key.name(), kind = ?key.kind(), "registered resource routes");
        router.merge(key_router.with_state(service))
    })
}
