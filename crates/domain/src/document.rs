//! Document: the decoded content of the backing JSON file.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DocumentError, JsonServerError, NotFoundError};
use crate::key::{ResourceKey, ResourceKind};
use crate::resource::{Resource, id_to_string};

/// Mapping from resource key to its collection or scalar value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Wrap an already decoded top-level object.
    #[must_use]
    pub fn new(entries: Map<String, Value>) -> Self {
        Self(entries)
    }

    /// Classify every top-level key, preserving document order.
    #[must_use]
    pub fn resource_keys(&self) -> Vec<ResourceKey> {
        self.0
            .iter()
            .map(|(name, value)| ResourceKey::new(name.clone(), ResourceKind::of(value)))
            .collect()
    }

    /// Raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Read every resource of a list key.
    ///
    /// # Errors
    ///
    /// [`NotFoundError::Key`] when `key` is missing, or an internal error when
    /// the value is not an array of objects.
    pub fn resources(&self, key: &str) -> Result<Vec<Resource>, JsonServerError> {
        let items = self.items(key)?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Resource::try_from(item.clone()).map_err(|_| {
                    JsonServerError::from(DocumentError::NotAResource {
                        key: key.to_string(),
                        index,
                    })
                })
            })
            .collect()
    }

    /// Find one resource of a list key by string-compared id.
    ///
    /// # Errors
    ///
    /// [`NotFoundError`] when the key or the id is missing.
    pub fn resource(&self, key: &str, id: &str) -> Result<Resource, JsonServerError> {
        self.resources(key)?
            .into_iter()
            .find(|res| res.has_id(id))
            .ok_or_else(|| resource_not_found(key, id))
    }

    /// Every identifier currently used in a list key.
    ///
    /// # Errors
    ///
    /// Same as [`Document::resources`].
    pub fn ids(&self, key: &str) -> Result<Vec<String>, JsonServerError> {
        Ok(self
            .items(key)?
            .iter()
            .filter_map(|item| item.get(crate::resource::ID_FIELD).and_then(id_to_string))
            .collect())
    }

    /// Append a resource to a list key.
    ///
    /// # Errors
    ///
    /// Same as [`Document::resources`].
    pub fn push(&mut self, key: &str, resource: Resource) -> Result<(), JsonServerError> {
        self.items_mut(key)?.push(resource.into_value());
        Ok(())
    }

    /// Swap the resource with `id` for `resource`, returning the previous one.
    ///
    /// # Errors
    ///
    /// [`NotFoundError`] when the key or id is missing.
    pub fn swap(
        &mut self,
        key: &str,
        id: &str,
        resource: Resource,
    ) -> Result<Resource, JsonServerError> {
        let index = self.position(key, id)?;
        let items = self.items_mut(key)?;
        let previous = std::mem::replace(&mut items[index], resource.into_value());
        Resource::try_from(previous).map_err(|_| {
            DocumentError::NotAResource {
                key: key.to_string(),
                index,
            }
            .into()
        })
    }

    /// Remove the resource with `id`.
    ///
    /// # Errors
    ///
    /// [`NotFoundError`] when the key or id is missing.
    pub fn remove(&mut self, key: &str, id: &str) -> Result<Resource, JsonServerError> {
        let index = self.position(key, id)?;
        let removed = self.items_mut(key)?.remove(index);
        Resource::try_from(removed).map_err(|_| {
            DocumentError::NotAResource {
                key: key.to_string(),
                index,
            }
            .into()
        })
    }

    /// Consume the document.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    fn position(&self, key: &str, id: &str) -> Result<usize, JsonServerError> {
        let resources = self.resources(key)?;
        resources
            .iter()
            .position(|res| res.has_id(id))
            .ok_or_else(|| resource_not_found(key, id))
    }

    fn items(&self, key: &str) -> Result<&Vec<Value>, JsonServerError> {
        match self.0.get(key) {
            None => Err(key_not_found(key)),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(DocumentError::NotAList {
                key: key.to_string(),
            }
            .into()),
        }
    }

    fn items_mut(&mut self, key: &str) -> Result<&mut Vec<Value>, JsonServerError> {
        match self.0.get_mut(key) {
            None => Err(key_not_found(key)),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(DocumentError::NotAList {
                key: key.to_string(),
            }
            .into()),
        }
    }
}

impl From<Map<String, Value>> for Document {
    fn from(entries: Map<String, Value>) -> Self {
        Self(entries)
    }
}

fn key_not_found(key: &str) -> JsonServerError {
    NotFoundError::Key {
        key: key.to_string(),
    }
    .into()
}

fn resource_not_found(key: &str, id: &str) -> JsonServerError {
    NotFoundError::Resource {
        key: key.to_string(),
        id: id.to_string(),
    }
    .into()
}
