//! # jsonserver-adapter-storage-json-file
//!
//! Whole-document persistence in a single JSON file.
//!
//! ## Responsibilities
//! - Implement the `DocumentStore` port defined in `jsonserver-app::ports`
//! - Decode the file on every load; a malformed file fails that request
//! - Encode pretty-printed and replace the file atomically on every save
//! - Run blocking filesystem work off the async executor
//!
//! ## Dependency rule
//! Depends on `jsonserver-app` (for port traits) and `jsonserver-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod error;
pub mod file_store;

pub use error::StorageError;
pub use file_store::JsonFileStore;
