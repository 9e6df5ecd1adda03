//! Resource keys: top-level document properties exposed as path segments.

use serde::Serialize;
use serde_json::Value;

/// Shape of a resource key, decided once when the server starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Backed by an array of objects; exposes full CRUD.
    List,
    /// Backed by any other value; exposes a single read.
    Scalar,
}

impl ResourceKind {
    /// Classify a top-level value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        if value.is_array() {
            Self::List
        } else {
            Self::Scalar
        }
    }
}

/// Path segments owned by fixed endpoints.
pub const RESERVED_NAMES: &[&str] = &["db"];

/// A top-level key together with its fixed classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceKey {
    name: String,
    kind: ResourceKind,
}

impl ResourceKey {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    #[must_use]
    pub fn list(name: impl Into<String>) -> Self {
        Self::new(name, ResourceKind::List)
    }

    #[must_use]
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(name, ResourceKind::Scalar)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        self.kind == ResourceKind::List
    }

    /// Whether the name can be used verbatim as a single URL path segment
    /// without clashing with a fixed endpoint.
    ///
    /// Only unreserved URL characters (ASCII alphanumerics and `-._~`) are
    /// accepted.
    #[must_use]
    pub fn is_routable(&self) -> bool {
        !self.name.is_empty()
            && !RESERVED_NAMES.contains(&self.name.as_str())
            && self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'))
    }

    /// `/<name>`
    #[must_use]
    pub fn collection_path(&self) -> String {
        format!("/{}", self.name)
    }

    /// `/<name>/{id}`
    #[must_use]
    pub fn item_path(&self) -> String {
        format!("/{}/{{id}}", self.name)
    }
}
