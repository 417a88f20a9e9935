//! # tabula-schema
//!
//! A dialect-agnostic, in-memory model of a relational table.
//!
//! This crate provides:
//! - [`TableSchema`] holding columns, indexes and constraints in declaration order
//! - Validation of indexes and constraints at the moment they are declared
//! - DDL generation delegated to a [`SchemaDialect`] obtained from a [`Connection`]
//! - Loading table definitions from JSON configuration
//!
//! ## Building a Table
//!
//! ```
//! use tabula_schema::{ColumnDefinition, KeyAttributes, TableSchema};
//!
//! let mut clients = TableSchema::new("clients");
//! clients
//!     .add_column("id", "integer")
//!     .add_column("client_name", ColumnDefinition::new("string").length(100))
//!     .add_column("company_id", "integer");
//!
//! clients
//!     .add_constraint("primary", KeyAttributes::new("primary").columns(["id"]))?
//!     .add_index("by_company", KeyAttributes::new("index").columns(["company_id"]))?;
//!
//! // Columns must exist before they can be indexed.
//! assert!(clients
//!     .add_index("by_email", KeyAttributes::new("index").columns(["email"]))
//!     .is_err());
//! # Ok::<(), tabula_schema::SchemaError>(())
//! ```
//!
//! ## Generating SQL
//!
//! Schemas do not render SQL on their own. [`TableSchema::create_table_sql`]
//! asks the connection's dialect for one fragment per column, constraint and
//! index and returns the statements the dialect assembles from them.

mod column;
mod config;
mod dialect;
mod error;
mod key;
mod table;

pub use column::{ColumnDefinition, ColumnSpec, DefaultValue};
pub use config::TableConfig;
pub use dialect::{Connection, SchemaDialect};
pub use error::{Result, SchemaError};
pub use key::{
    ConstraintDefinition, ConstraintType, IndexDefinition, IndexType, KeyAttributes, KeySpec,
};
pub use table::TableSchema;
