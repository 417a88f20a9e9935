//! In-memory model of a single table.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::column::ColumnDefinition;
use crate::dialect::Connection;
use crate::error::{Result, SchemaError};
use crate::key::{ConstraintDefinition, ConstraintType, IndexDefinition, IndexType, KeyAttributes};

/// Represents a single table in a database schema.
///
/// A schema is either populated from reflected/configured definitions or
/// built incrementally. Columns, indexes and constraints are kept in the
/// order they were first added; adding an existing name again replaces its
/// definition without moving it.
///
/// # Example
///
/// ```
/// use tabula_schema::{ColumnDefinition, KeyAttributes, TableSchema};
///
/// let mut articles = TableSchema::new("articles");
/// articles
///     .add_column("id", "integer")
///     .add_column("title", ColumnDefinition::new("string").length(255));
/// articles.add_constraint("primary", KeyAttributes::new("primary").columns(["id"]))?;
///
/// assert_eq!(articles.primary_key(), Some(&["id".to_string()][..]));
/// # Ok::<(), tabula_schema::SchemaError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSchema {
    name: String,
    columns: IndexMap<String, ColumnDefinition>,
    indexes: IndexMap<String, IndexDefinition>,
    constraints: IndexMap<String, ConstraintDefinition>,
}

impl TableSchema {
    /// Creates an empty table schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: IndexMap::new(),
            indexes: IndexMap::new(),
            constraints: IndexMap::new(),
        }
    }

    /// Creates a table schema with initial columns.
    #[must_use]
    pub fn with_columns<I, N, C>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<ColumnDefinition>,
    {
        let mut schema = Self::new(name);
        for (column, definition) in columns {
            schema.add_column(column, definition);
        }
        schema
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a column, replacing any previous definition with the same name.
    ///
    /// A bare type name is accepted in place of a full definition.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        definition: impl Into<ColumnDefinition>,
    ) -> &mut Self {
        let name = name.into();
        let definition = definition.into();
        debug!(
            table = %self.name,
            column = %name,
            column_type = ?definition.column_type,
            "Adding column"
        );
        self.columns.insert(name, definition);
        self
    }

    /// Returns the column names.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.columns.keys().map(String::as_str)
    }

    /// Gets a column definition by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.get(name)
    }

    /// Returns whether the table has a column with this name.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Adds an index.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidSchema`] if the type is not a valid
    /// index type or if any indexed column has not been added yet. The
    /// schema is unchanged in that case.
    pub fn add_index(
        &mut self,
        name: impl Into<String>,
        attrs: impl Into<KeyAttributes>,
    ) -> Result<&mut Self> {
        let name = name.into();
        let attrs = attrs.into();
        let index_type: IndexType = attrs.type_name().parse()?;
        self.ensure_columns_exist(&attrs.columns, "indexes")?;

        debug!(
            table = %self.name,
            index = %name,
            index_type = %index_type,
            columns = ?attrs.columns,
            "Adding index"
        );
        self.indexes.insert(
            name,
            IndexDefinition {
                index_type,
                columns: attrs.columns,
                length: attrs.length,
            },
        );
        Ok(self)
    }

    /// Returns the index names.
    pub fn indexes(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.indexes.keys().map(String::as_str)
    }

    /// Gets an index definition by name.
    #[must_use]
    pub fn index(&self, name: &str) -> Option<&IndexDefinition> {
        self.indexes.get(name)
    }

    /// Returns the primary key columns.
    ///
    /// This is the column list of the first primary constraint that was
    /// added, or `None` if the table has no primary key.
    #[must_use]
    pub fn primary_key(&self) -> Option<&[String]> {
        self.constraints
            .values()
            .find(|c| c.constraint_type == ConstraintType::Primary)
            .map(|c| c.columns.as_slice())
    }

    /// Adds a constraint.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidSchema`] if the type is not a valid
    /// constraint type or if any constrained column has not been added yet.
    /// The schema is unchanged in that case.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        attrs: impl Into<KeyAttributes>,
    ) -> Result<&mut Self> {
        let name = name.into();
        let attrs = attrs.into();
        let constraint_type: ConstraintType = attrs.type_name().parse()?;
        self.ensure_columns_exist(&attrs.columns, "constraints")?;

        if constraint_type == ConstraintType::Primary {
            let existing = self.constraints.iter().find(|(other, c)| {
                c.constraint_type == ConstraintType::Primary && **other != name
            });
            if let Some((existing, _)) = existing {
                warn!(
                    table = %self.name,
                    constraint = %name,
                    primary = %existing,
                    "Table already has a primary key; the first one stays in effect"
                );
            }
        }

        debug!(
            table = %self.name,
            constraint = %name,
            constraint_type = %constraint_type,
            columns = ?attrs.columns,
            "Adding constraint"
        );
        self.constraints.insert(
            name,
            ConstraintDefinition {
                constraint_type,
                columns: attrs.columns,
                length: attrs.length,
            },
        );
        Ok(self)
    }

    /// Returns the constraint names.
    pub fn constraints(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.constraints.keys().map(String::as_str)
    }

    /// Gets a constraint definition by name.
    #[must_use]
    pub fn constraint(&self, name: &str) -> Option<&ConstraintDefinition> {
        self.constraints.get(name)
    }

    /// Generates the SQL to create this table.
    ///
    /// Uses the connection's schema dialect to render every column,
    /// constraint and index, then lets the dialect assemble the final
    /// statements.
    ///
    /// # Errors
    ///
    /// Any error raised by the dialect is returned unchanged.
    pub fn create_table_sql<C>(&self, connection: &C) -> Result<Vec<String>>
    where
        C: Connection + ?Sized,
    {
        let dialect = connection.schema_dialect();
        debug!(table = %self.name, dialect = dialect.name(), "Generating CREATE TABLE SQL");

        let columns = self
            .columns
            .keys()
            .map(|name| dialect.column_sql(self, name))
            .collect::<Result<Vec<_>>>()?;
        let constraints = self
            .constraints
            .keys()
            .map(|name| dialect.constraint_sql(self, name))
            .collect::<Result<Vec<_>>>()?;
        let indexes = self
            .indexes
            .keys()
            .map(|name| dialect.index_sql(self, name))
            .collect::<Result<Vec<_>>>()?;

        dialect.create_table_sql(self, &columns, &constraints, &indexes)
    }

    fn ensure_columns_exist(&self, columns: &[String], used_in: &str) -> Result<()> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => {
                debug!(table = %self.name, column = %missing, "Unknown column referenced");
                Err(SchemaError::InvalidSchema(format!(
                    "Columns used in {used_in} must already exist."
                )))
            }
            None => Ok(()),
        }
    }
}
