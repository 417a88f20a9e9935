//! # tabula-orm
//!
//! Table mappings and associations on top of `tabula-schema`.
//!
//! This crate provides:
//! - [`Table`] pairing a query alias and table name with a [`TableSchema`](tabula_schema::TableSchema)
//! - [`TableRegistry`] for resolving tables by alias
//! - [`BelongsTo`](association::BelongsTo) associations that join their target
//!   table into a [`Query`] and select its columns
//! - Join conditions that keep column references apart from bound values
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use tabula_orm::association::{Association, AssociationOptions, BelongsTo};
//! use tabula_orm::{Condition, SelectQuery, Table, TableRegistry};
//! use tabula_schema::{KeyAttributes, TableSchema};
//!
//! let registry = Arc::new(TableRegistry::new());
//!
//! let mut companies = TableSchema::with_columns(
//!     "companies",
//!     [("id", "integer"), ("company_name", "string")],
//! );
//! companies.add_constraint("primary", KeyAttributes::new("primary").columns(["id"]))?;
//! registry.set(Table::new("Companies").with_schema(companies));
//! let clients = registry.get("Clients");
//!
//! // The target is looked up in the registry under the association name.
//! let company = BelongsTo::new(
//!     "Companies",
//!     AssociationOptions::new()
//!         .source_table(clients)
//!         .condition(Condition::eq("Companies.is_active", true)),
//! )
//! .with_locator(registry.clone());
//!
//! let mut query = SelectQuery::new();
//! company.attach_to(&mut query, &AssociationOptions::new())?;
//!
//! let join = query.join_for("Companies").unwrap();
//! assert_eq!(join.table, "companies");
//! assert_eq!(join.conditions.len(), 2);
//! assert_eq!(
//!     query.fields().keys().collect::<Vec<_>>(),
//!     ["Companies__id", "Companies__company_name"]
//! );
//! # Ok::<(), tabula_orm::OrmError>(())
//! ```

pub mod association;
mod entity;
mod error;
mod expression;
pub mod naming;
mod query;
mod table;

pub use entity::Entity;
pub use error::{OrmError, Result};
pub use expression::{Condition, ConditionValue, IdentifierExpression, SqlValue, ToSqlValue};
pub use query::{JoinClause, JoinType, Query, SelectQuery};
pub use table::{DEFAULT_PRIMARY_KEY, Table, TableLocator, TableOptions, TableRegistry};
