//! Index and constraint definitions.
//!
//! Indexes and constraints share one attribute shape: a type, an ordered
//! list of columns and optional per-column prefix lengths. Raw
//! [`KeyAttributes`] are validated by [`TableSchema`](crate::TableSchema)
//! into an [`IndexDefinition`] or a [`ConstraintDefinition`].

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Index types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexType {
    /// Plain index.
    Index,
    /// Full text index, on platforms that support them.
    Fulltext,
}

impl IndexType {
    /// Returns the configuration name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Fulltext => "fulltext",
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index" => Ok(Self::Index),
            "fulltext" => Ok(Self::Fulltext),
            other => Err(SchemaError::InvalidSchema(format!(
                "Invalid index type \"{other}\""
            ))),
        }
    }
}

/// Constraint types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintType {
    /// Primary key.
    Primary,
    /// Unique key.
    Unique,
    /// Foreign key. Only the local columns are tracked.
    Foreign,
}

impl ConstraintType {
    /// Returns the configuration name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Unique => "unique",
            Self::Foreign => "foreign",
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Self::Primary),
            "unique" => Ok(Self::Unique),
            "foreign" => Ok(Self::Foreign),
            other => Err(SchemaError::InvalidSchema(format!(
                "Invalid constraint type \"{other}\""
            ))),
        }
    }
}

/// Unvalidated index or constraint attributes.
///
/// The type is kept as a string so that configuration naming an unknown type
/// can be reported as an invalid schema rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAttributes {
    /// Index or constraint type name.
    #[serde(rename = "type")]
    pub key_type: Option<String>,
    /// Columns covered, in order.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Prefix length per column.
    #[serde(default)]
    pub length: IndexMap<String, u32>,
}

impl KeyAttributes {
    /// Creates attributes with the given type and no columns.
    #[must_use]
    pub fn new(key_type: impl Into<String>) -> Self {
        Self {
            key_type: Some(key_type.into()),
            ..Self::default()
        }
    }

    /// Sets the covered columns.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the prefix length for one column.
    #[must_use]
    pub fn length(mut self, column: impl Into<String>, length: u32) -> Self {
        self.length.insert(column.into(), length);
        self
    }

    pub(crate) fn type_name(&self) -> &str {
        self.key_type.as_deref().unwrap_or_default()
    }
}

impl From<&str> for KeyAttributes {
    fn from(key_type: &str) -> Self {
        Self::new(key_type)
    }
}

impl From<String> for KeyAttributes {
    fn from(key_type: String) -> Self {
        Self::new(key_type)
    }
}

impl From<IndexType> for KeyAttributes {
    fn from(index_type: IndexType) -> Self {
        Self::new(index_type.as_str())
    }
}

impl From<ConstraintType> for KeyAttributes {
    fn from(constraint_type: ConstraintType) -> Self {
        Self::new(constraint_type.as_str())
    }
}

/// Index or constraint input as it appears in configuration: either a bare
/// type name or a full attribute object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KeySpec {
    /// Bare type name, e.g. `"unique"`.
    Type(String),
    /// Attribute object.
    Attributes(KeyAttributes),
}

impl From<KeySpec> for KeyAttributes {
    fn from(spec: KeySpec) -> Self {
        match spec {
            KeySpec::Type(key_type) => Self::new(key_type),
            KeySpec::Attributes(attrs) => attrs,
        }
    }
}

/// A validated index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    /// Index type.
    #[serde(rename = "type")]
    pub index_type: IndexType,
    /// Indexed columns, in order.
    pub columns: Vec<String>,
    /// Prefix length per column.
    pub length: IndexMap<String, u32>,
}

/// A validated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintDefinition {
    /// Constraint type.
    #[serde(rename = "type")]
    pub constraint_type: ConstraintType,
    /// Constrained columns, in order.
    pub columns: Vec<String>,
    /// Prefix length per column.
    pub length: IndexMap<String, u32>,
}
