//! Table mappings and table lookup.

use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;
use serde::Deserialize;
use tabula_schema::{TableConfig, TableSchema};
use tracing::debug;

use crate::error::Result;
use crate::naming;

/// Column used as primary key when a schema does not declare one.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// A table as seen by the ORM: the alias used in queries, the underlying
/// table name and its schema.
///
/// # Example
///
/// ```
/// use tabula_orm::Table;
///
/// let companies = Table::new("Companies");
/// assert_eq!(companies.alias(), "Companies");
/// assert_eq!(companies.table(), "companies");
/// assert_eq!(companies.primary_key_column(), "id");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    alias: String,
    table: String,
    schema: TableSchema,
}

impl Table {
    /// Creates a table with the conventional table name for `alias` and an
    /// empty schema.
    #[must_use]
    pub fn new(alias: impl Into<String>) -> Self {
        let alias = alias.into();
        let table = naming::table_name(&alias);
        Self {
            schema: TableSchema::new(table.clone()),
            alias,
            table,
        }
    }

    /// Builds a table from deserialized options.
    ///
    /// # Errors
    ///
    /// Returns [`OrmError::Schema`](crate::OrmError::Schema) if the schema
    /// configuration declares invalid indexes or constraints.
    pub fn from_options(alias: impl Into<String>, options: TableOptions) -> Result<Self> {
        let mut table = Self::new(alias);
        if let Some(name) = options.table {
            table.table = name;
        }
        table.schema = match options.schema {
            Some(config) => TableSchema::from_config(table.table.clone(), config)?,
            None => TableSchema::new(table.table.clone()),
        };
        Ok(table)
    }

    /// Sets the underlying table name.
    ///
    /// A schema that is still empty is renamed along with the table. A
    /// schema already holding columns, indexes or constraints keeps its own
    /// name; use [`Table::with_schema`] to replace it.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        if self.schema.columns().next().is_none()
            && self.schema.indexes().next().is_none()
            && self.schema.constraints().next().is_none()
        {
            self.schema = TableSchema::new(self.table.clone());
        }
        self
    }

    /// Sets the schema.
    #[must_use]
    pub fn with_schema(mut self, schema: TableSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Returns the alias used to qualify this table's columns in queries.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns the underlying table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Returns the schema for modification.
    pub fn schema_mut(&mut self) -> &mut TableSchema {
        &mut self.schema
    }

    /// Returns the column joined on when this table is referenced.
    ///
    /// This is the first primary key column of the schema, or
    /// [`DEFAULT_PRIMARY_KEY`] if the schema declares none.
    #[must_use]
    pub fn primary_key_column(&self) -> &str {
        self.schema
            .primary_key()
            .and_then(<[String]>::first)
            .map_or(DEFAULT_PRIMARY_KEY, String::as_str)
    }
}

/// Table options as they appear in configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Underlying table name; derived from the alias when absent.
    pub table: Option<String>,
    /// Schema configuration.
    pub schema: Option<TableConfig>,
}

/// Resolves tables by alias.
pub trait TableLocator: Send + Sync {
    /// Returns the table registered under `alias`.
    fn locate(&self, alias: &str) -> Option<Arc<Table>>;
}

/// A registry of tables keyed by alias.
///
/// Looking up an alias that was never registered creates, caches and returns
/// a default [`Table`] for it.
#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: Mutex<IndexMap<String, Arc<Table>>>,
}

impl TableRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table under its alias, replacing any previous entry.
    pub fn set(&self, table: Table) -> Arc<Table> {
        let table = Arc::new(table);
        debug!(alias = %table.alias(), table = %table.table(), "Registering table");
        self.lock()
            .insert(table.alias().to_string(), Arc::clone(&table));
        table
    }

    /// Builds a table from options and registers it.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be built from the options.
    pub fn configure(&self, alias: impl Into<String>, options: TableOptions) -> Result<Arc<Table>> {
        Ok(self.set(Table::from_options(alias, options)?))
    }

    /// Returns the table registered under `alias`, creating a default one if
    /// there is none.
    pub fn get(&self, alias: &str) -> Arc<Table> {
        let mut tables = self.lock();
        let table = tables.entry(alias.to_string()).or_insert_with(|| {
            debug!(alias = %alias, "Creating default table");
            Arc::new(Table::new(alias))
        });
        Arc::clone(table)
    }

    /// Returns whether a table is registered under `alias`.
    #[must_use]
    pub fn exists(&self, alias: &str) -> bool {
        self.lock().contains_key(alias)
    }

    /// Removes every registered table.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IndexMap<String, Arc<Table>>> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TableLocator for TableRegistry {
    fn locate(&self, alias: &str) -> Option<Arc<Table>> {
        Some(self.get(alias))
    }
}
