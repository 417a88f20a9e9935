//! Dialect and connection contracts.
//!
//! Schemas never build SQL themselves. Each database engine provides a
//! [`SchemaDialect`] that renders the pieces of a [`TableSchema`] and
//! assembles them into statements; a [`Connection`] hands out the dialect
//! for the engine it talks to.

use crate::error::Result;
use crate::table::TableSchema;

/// Trait for database-specific schema SQL generation.
///
/// Fragment methods are called with the schema and the name of the item to
/// render. [`TableSchema::create_table_sql`] calls them in insertion order,
/// columns first, then constraints, then indexes, and dialects may rely on
/// that order.
pub trait SchemaDialect: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Renders the definition of a column.
    fn column_sql(&self, schema: &TableSchema, name: &str) -> Result<String>;

    /// Renders the definition of a constraint.
    fn constraint_sql(&self, schema: &TableSchema, name: &str) -> Result<String>;

    /// Renders the definition of an index.
    fn index_sql(&self, schema: &TableSchema, name: &str) -> Result<String>;

    /// Assembles rendered fragments into the statements that create the table.
    fn create_table_sql(
        &self,
        schema: &TableSchema,
        columns: &[String],
        constraints: &[String],
        indexes: &[String],
    ) -> Result<Vec<String>>;
}

/// A database connection, as far as schema generation is concerned.
pub trait Connection {
    /// Returns the schema dialect of the connected engine.
    fn schema_dialect(&self) -> &dyn SchemaDialect;
}
