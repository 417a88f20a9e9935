//! Associations between tables.
//!
//! An association describes how records of a source table relate to records
//! of a target table. It knows how to join the target into a query on the
//! source and what deleting a source record means for the target.

mod belongs_to;
mod options;

pub use belongs_to::BelongsTo;
pub use options::{AssociationOptions, ForeignKey};

use std::sync::Arc;

use crate::entity::Entity;
use crate::error::Result;
use crate::query::Query;
use crate::table::Table;

/// Common behavior of all association types.
pub trait Association: Send + Sync {
    /// Returns the association name, conventionally the target alias.
    fn name(&self) -> &str;

    /// Returns whether the association can be expressed as a join. Others
    /// need a separate query to load the related records.
    fn can_be_joined(&self) -> bool;

    /// Returns the table owning the association.
    fn source(&self) -> Option<&Arc<Table>>;

    /// Returns the associated table.
    ///
    /// # Errors
    ///
    /// Returns [`OrmError::MissingTable`](crate::OrmError::MissingTable) if
    /// the table is neither configured nor resolvable.
    fn target(&self) -> Result<Arc<Table>>;

    /// Alters `query` to include the associated table, with `overrides`
    /// taking precedence over the association's own options.
    ///
    /// # Errors
    ///
    /// Returns errors from resolving tables and any error raised by the query.
    fn attach_to(&self, query: &mut dyn Query, overrides: &AssociationOptions) -> Result<()>;

    /// Handles deletion of a source record. Returns whether the delete may
    /// proceed.
    ///
    /// # Errors
    ///
    /// Returns errors raised while removing dependent records.
    fn cascade_delete(&self, entity: &Entity) -> Result<bool>;
}
