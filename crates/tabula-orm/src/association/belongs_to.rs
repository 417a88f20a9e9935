//! The belongs-to association.

use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use tracing::debug;

use super::{Association, AssociationOptions, ForeignKey};
use crate::entity::Entity;
use crate::error::{OrmError, Result};
use crate::expression::{Condition, IdentifierExpression};
use crate::naming;
use crate::query::{JoinClause, Query};
use crate::table::{Table, TableLocator};

/// A belongs-to association: each source record references at most one
/// target record through a foreign key column on the source table.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use tabula_orm::association::{Association, AssociationOptions, BelongsTo};
/// use tabula_orm::{SelectQuery, Table};
/// use tabula_schema::TableSchema;
///
/// let companies = Arc::new(Table::new("Companies").with_schema(
///     TableSchema::with_columns("companies", [("id", "integer"), ("name", "string")]),
/// ));
/// let clients = Arc::new(Table::new("Clients"));
///
/// let company = BelongsTo::new(
///     "Companies",
///     AssociationOptions::new()
///         .source_table(clients)
///         .target_table(companies),
/// );
///
/// let mut query = SelectQuery::new();
/// company.attach_to(&mut query, &AssociationOptions::new())?;
///
/// assert_eq!(query.join_for("Companies").unwrap().table, "companies");
/// assert_eq!(query.fields()["Companies__name"], "Companies.name");
/// # Ok::<(), tabula_orm::OrmError>(())
/// ```
pub struct BelongsTo {
    name: String,
    options: AssociationOptions,
    locator: Option<Arc<dyn TableLocator>>,
    resolved_target: OnceLock<Arc<Table>>,
}

impl BelongsTo {
    /// Creates a belongs-to association.
    #[must_use]
    pub fn new(name: impl Into<String>, options: AssociationOptions) -> Self {
        Self {
            name: name.into(),
            options,
            locator: None,
            resolved_target: OnceLock::new(),
        }
    }

    /// Sets the locator used to find the target table when none is
    /// configured. The table is looked up under the association name.
    #[must_use]
    pub fn with_locator(mut self, locator: Arc<dyn TableLocator>) -> Self {
        self.locator = Some(locator);
        self
    }

    /// Returns the configured options.
    #[must_use]
    pub fn options(&self) -> &AssociationOptions {
        &self.options
    }

    /// Returns the foreign key column joined on by default, or `None` when
    /// the foreign key condition is disabled.
    #[must_use]
    pub fn foreign_key(&self) -> Option<String> {
        self.effective_foreign_key(&self.options)
    }

    fn effective_foreign_key(&self, options: &AssociationOptions) -> Option<String> {
        match &options.foreign_key {
            Some(ForeignKey::Column(column)) if !column.is_empty() => Some(column.clone()),
            Some(ForeignKey::Column(_) | ForeignKey::Disabled) => None,
            None => Some(naming::foreign_key(&self.name)),
        }
    }

    fn resolve_target(&self, options: &AssociationOptions) -> Result<Arc<Table>> {
        if let Some(table) = &options.target_table {
            return Ok(Arc::clone(table));
        }
        if let Some(table) = self.resolved_target.get() {
            return Ok(Arc::clone(table));
        }

        let table = self
            .locator
            .as_ref()
            .and_then(|locator| locator.locate(&self.name))
            .ok_or_else(|| OrmError::MissingTable(self.name.clone()))?;
        debug!(
            association = %self.name,
            table = %table.table(),
            "Resolved association target"
        );
        Ok(Arc::clone(self.resolved_target.get_or_init(|| table)))
    }

    fn join_conditions(
        &self,
        options: &AssociationOptions,
        target: &Table,
    ) -> Result<Vec<Condition>> {
        let mut conditions = options.conditions.clone().unwrap_or_default();
        if let Some(foreign_key) = self.effective_foreign_key(options) {
            let source = options.source_table.as_ref().ok_or_else(|| {
                OrmError::MissingTable(format!("source table of association {}", self.name))
            })?;
            conditions.push(Condition::identifier(
                format!("{}.{}", target.alias(), target.primary_key_column()),
                IdentifierExpression::new(format!("{}.{}", source.alias(), foreign_key)),
            ));
        }
        Ok(conditions)
    }

    fn projection(&self, options: &AssociationOptions, target: &Table) -> IndexMap<String, String> {
        let columns: Vec<&str> = match options.fields.as_deref() {
            Some(fields) if !fields.is_empty() => fields.iter().map(String::as_str).collect(),
            _ => target.schema().columns().collect(),
        };
        columns
            .into_iter()
            .map(|column| {
                (
                    format!("{}__{}", self.name, column),
                    format!("{}.{}", self.name, column),
                )
            })
            .collect()
    }
}

impl Association for BelongsTo {
    fn name(&self) -> &str {
        &self.name
    }

    fn can_be_joined(&self) -> bool {
        true
    }

    fn source(&self) -> Option<&Arc<Table>> {
        self.options.source_table.as_ref()
    }

    fn target(&self) -> Result<Arc<Table>> {
        self.resolve_target(&self.options)
    }

    fn attach_to(&self, query: &mut dyn Query, overrides: &AssociationOptions) -> Result<()> {
        let options = self.options.merge(overrides);
        let target = self.resolve_target(&options)?;
        let conditions = self.join_conditions(&options, &target)?;
        let join_type = options.join_type.unwrap_or_default();

        debug!(
            association = %self.name,
            table = %target.table(),
            join_type = %join_type,
            conditions = conditions.len(),
            "Attaching association"
        );
        let join = JoinClause::new(target.table(), join_type).conditions(conditions);
        query.join(IndexMap::from([(self.name.clone(), join)]))?;

        if options.include_fields.unwrap_or(true) {
            let fields = self.projection(&options, &target);
            if !fields.is_empty() {
                query.select(fields)?;
            }
        }
        Ok(())
    }

    /// The source record holds the foreign key, so deleting it never
    /// requires changes to the target table.
    fn cascade_delete(&self, _entity: &Entity) -> Result<bool> {
        Ok(true)
    }
}

impl fmt::Debug for BelongsTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BelongsTo")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("resolved_target", &self.resolved_target.get())
            .finish_non_exhaustive()
    }
}
