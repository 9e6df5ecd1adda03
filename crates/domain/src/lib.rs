//! # jsonserver-domain
//!
//! Pure domain model for json-server.
//!
//! ## Responsibilities
//! - Define the **Document** (the decoded backing file) and its top-level keys
//! - Classify every key once as a **List** (array of resources) or a
//!   **Scalar** (any other value) resource
//! - Define the **Resource** representation and identifier comparison rules
//! - Validate request payloads before they reach storage
//! - Define the error taxonomy shared by every layer
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod document;
pub mod error;
pub mod key;
pub mod resource;
