//! Entities: records of named values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A single record.
///
/// Associations receive entities when records are deleted; what they read
/// from them depends on the association type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity {
    properties: IndexMap<String, Value>,
}

impl Entity {
    /// Creates an entity without properties.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entity from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`OrmError::Config`](crate::OrmError::Config) if the value is
    /// not an object.
    pub fn from_json(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns a property value.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.properties.get(property)
    }

    /// Sets a property value.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.properties.insert(property.into(), value.into());
        self
    }

    /// Returns whether the property is set.
    #[must_use]
    pub fn has(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    /// Returns the property names.
    pub fn properties(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties.keys().map(String::as_str)
    }
}
