//! Building schemas from configuration.
//!
//! A table configuration is an object whose keys are column names, plus the
//! reserved `_constraints` and `_indexes` keys:
//!
//! ```json
//! {
//!     "id": {"type": "integer"},
//!     "title": "string",
//!     "_constraints": {
//!         "primary": {"type": "primary", "columns": ["id"]}
//!     },
//!     "_indexes": {
//!         "by_title": {"type": "index", "columns": ["title"]}
//!     }
//! }
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use crate::column::ColumnSpec;
use crate::error::Result;
use crate::key::KeySpec;
use crate::table::TableSchema;

/// Deserialized table configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TableConfig {
    /// Constraints by name.
    #[serde(rename = "_constraints", default)]
    pub constraints: IndexMap<String, KeySpec>,
    /// Indexes by name.
    #[serde(rename = "_indexes", default)]
    pub indexes: IndexMap<String, KeySpec>,
    /// Columns by name.
    #[serde(flatten)]
    pub columns: IndexMap<String, ColumnSpec>,
}

impl TableSchema {
    /// Builds a schema from a deserialized configuration.
    ///
    /// Columns are added first so that constraints and indexes can refer to
    /// any of them regardless of where they appear in the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidSchema`](crate::SchemaError::InvalidSchema)
    /// for invalid constraints or indexes.
    pub fn from_config(name: impl Into<String>, config: TableConfig) -> Result<Self> {
        let mut schema = Self::with_columns(name, config.columns);
        for (constraint, spec) in config.constraints {
            schema.add_constraint(constraint, spec)?;
        }
        for (index, spec) in config.indexes {
            schema.add_index(index, spec)?;
        }
        Ok(schema)
    }

    /// Builds a schema from a JSON configuration value.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Config`](crate::SchemaError::Config) if the
    /// value does not have the shape of a table configuration, and
    /// [`SchemaError::InvalidSchema`](crate::SchemaError::InvalidSchema) for
    /// invalid constraints or indexes.
    pub fn from_json(name: impl Into<String>, value: serde_json::Value) -> Result<Self> {
        let config: TableConfig = serde_json::from_value(value)?;
        Self::from_config(name, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnDefinition;
    use crate::error::SchemaError;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let schema = TableSchema::from_json(
            "companies",
            json!({
                "id": {"type": "integer"},
                "company_name": "string",
                "_constraints": {
                    "primary": {"type": "primary", "columns": ["id"]}
                }
            }),
        )
        .unwrap();

        assert_eq!(schema.name(), "companies");
        assert_eq!(schema.columns().collect::<Vec<_>>(), ["id", "company_name"]);
        assert_eq!(
            schema.column("company_name"),
            Some(&ColumnDefinition::new("string"))
        );
        assert_eq!(schema.primary_key(), Some(&["id".to_string()][..]));
    }

    #[test]
    fn test_constraints_may_precede_columns() {
        let schema = TableSchema::from_json(
            "tags",
            json!({
                "_indexes": {"by_label": {"type": "index", "columns": ["label"]}},
                "id": "integer",
                "label": {"type": "string", "length": 40}
            }),
        )
        .unwrap();

        assert_eq!(schema.indexes().collect::<Vec<_>>(), ["by_label"]);
    }

    #[test]
    fn test_invalid_constraint_in_config() {
        let err = TableSchema::from_json(
            "tags",
            json!({
                "id": "integer",
                "_constraints": {"primary": {"type": "primary", "columns": ["uuid"]}}
            }),
        )
        .unwrap_err();

        assert!(matches!(err, SchemaError::InvalidSchema(_)));
    }

    #[test]
    fn test_malformed_config() {
        let err = TableSchema::from_json("tags", json!(["id", "label"])).unwrap_err();
        assert!(matches!(err, SchemaError::Config(_)));
    }
}
