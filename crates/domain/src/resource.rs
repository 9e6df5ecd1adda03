//! Resource: one JSON object inside a list collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Name of the identifier field.
pub const ID_FIELD: &str = "id";

/// A flat JSON object. Every field is opaque except [`ID_FIELD`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(Map<String, Value>);

impl Resource {
    /// Create an empty resource.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier rendered as a string, if it has a comparable type.
    ///
    /// Strings compare by content and numbers by their decimal rendering, so
    /// a file holding `"id": 1` is reachable at `/books/1`.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.0.get(ID_FIELD).and_then(id_to_string)
    }

    /// Whether the identifier equals `id` under string comparison.
    #[must_use]
    pub fn has_id(&self, id: &str) -> bool {
        self.0
            .get(ID_FIELD)
            .and_then(id_to_string)
            .is_some_and(|current| current == id)
    }

    /// Whether the payload carries an `id` field of any type.
    #[must_use]
    pub fn contains_id(&self) -> bool {
        self.0.contains_key(ID_FIELD)
    }

    /// Force the identifier to `id`, overwriting whatever was there.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.0.insert(ID_FIELD.to_string(), Value::String(id.into()));
    }

    /// Shallow merge: every field of `patch` overwrites the same field here.
    pub fn merge(&mut self, patch: Resource) {
        for (field, value) in patch.0 {
            self.0.insert(field, value);
        }
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Insert or overwrite a field.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the resource has no field at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that a request payload is usable for create, replace or update.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyPayload`] for `{}` and
    /// [`ValidationError::IdOnly`] when `id` is the only field.
    pub fn validate_payload(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPayload);
        }
        if self.len() == 1 && self.contains_id() {
            return Err(ValidationError::IdOnly);
        }
        Ok(())
    }

    /// Convert back into a plain JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Resource {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for Resource {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(ValidationError::NotAnObject),
        }
    }
}

impl From<Resource> for Value {
    fn from(resource: Resource) -> Self {
        resource.into_value()
    }
}

pub(crate) fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
