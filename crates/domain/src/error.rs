//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts them into
//! [`JsonServerError`] via `#[from]`. The HTTP adapter maps every variant to a
//! fixed status code.

/// Top-level error returned by every use-case.
#[derive(Debug, thiserror::Error)]
pub enum JsonServerError {
    /// The request payload does not have the required shape.
    #[error("bad request")]
    Validation(#[from] ValidationError),

    /// The resource key or the resource id does not exist.
    #[error("resource not found")]
    NotFound(#[from] NotFoundError),

    /// A resource with the same id already exists in the collection.
    #[error("resource already exists")]
    AlreadyExists(#[from] AlreadyExistsError),

    /// Anything else: I/O failures, malformed backing file, id exhaustion.
    #[error("internal error")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Payload validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The body could not be decoded as a JSON object.
    #[error("payload must be a JSON object")]
    NotAnObject,
    /// The body is an empty object.
    #[error("payload must not be empty")]
    EmptyPayload,
    /// The body holds nothing but an `id` field.
    #[error("payload must contain more than an id")]
    IdOnly,
    /// The supplied `id` is neither a string nor a number.
    #[error("id must be a string or a number")]
    InvalidId,
}

/// Lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    /// No top-level key with that name holds a collection.
    #[error("resource key {key} not found")]
    Key { key: String },
    /// The collection has no resource with that id.
    #[error("resource {id} not found in {key}")]
    Resource { key: String, id: String },
}

/// Id collision on create.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("resource {id} already exists in {key}")]
pub struct AlreadyExistsError {
    pub key: String,
    pub id: String,
}

/// The backing document no longer matches what the server was started with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// A list key now holds something other than an array.
    #[error("resource key {key} no longer holds an array")]
    NotAList { key: String },
    /// An element of a list key is not a JSON object.
    #[error("element {index} of {key} is not an object")]
    NotAResource { key: String, index: usize },
    /// Id generation gave up.
    #[error("no free id found for {key} after {attempts} attempts")]
    IdSpaceExhausted { key: String, attempts: usize },
}

impl From<DocumentError> for JsonServerError {
    fn from(err: DocumentError) -> Self {
        Self::Internal(Box::new(err))
    }
}
