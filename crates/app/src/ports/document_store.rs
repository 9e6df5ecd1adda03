//! Storage port: whole-document persistence.

use std::future::Future;

use jsonserver_domain::document::Document;
use jsonserver_domain::error::JsonServerError;

/// Backing store holding the entire document.
///
/// Every use-case loads a fresh copy and mutating use-cases write the whole
/// document back. Implementations must leave the previous content intact when
/// a save fails.
pub trait DocumentStore {
    /// Read and decode the whole document.
    fn load(&self) -> impl Future<Output = Result<Document, JsonServerError>> + Send;

    /// Encode and overwrite the whole document.
    fn save(&self, document: Document) -> impl Future<Output = Result<(), JsonServerError>> + Send;
}
