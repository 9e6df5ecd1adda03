//! # jsonserver-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `DocumentStore`: load and save the whole backing document
//!   - `IdGenerator`: propose identifiers for new resources
//! - Define the **use-cases**:
//!   - `DocumentService`: dump the document, hand out per-key services
//!   - `ResourceService`: find, create, replace, update and delete the
//!     resources of one key
//! - Provide **in-process infrastructure** that needs no IO
//!   (`RandomIdGenerator`)
//!
//! ## Dependency rule
//! Depends on `jsonserver-domain` only (plus `tokio::sync` and `rand`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod id_generator;
pub mod ports;
pub mod services;
