//! # jsonserver-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Build the **dispatch table** from the resource keys discovered at startup:
//!   full CRUD under `/<key>` and `/<key>/{id}` for list keys, a single
//!   `GET /<key>` for scalar keys
//! - Serve the whole document at `/db` and a human-readable index at `/`
//! - Validate request payloads before any storage work happens
//! - Map application errors to HTTP status codes and `{"error": …}` bodies
//! - Log every request and turn handler panics into `500` responses
//!
//! ## Dependency rule
//! Depends on `jsonserver-app` (for port traits and services) and
//! `jsonserver-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod home;
pub mod router;
pub mod state;
pub mod trace;
