//! Association configuration.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::expression::{Condition, SqlValue};
use crate::query::JoinType;
use crate::table::Table;

/// How the foreign key of an association is determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForeignKey {
    /// Join on this column.
    Column(String),
    /// Add no foreign key condition; the join relies on `conditions` alone.
    Disabled,
}

/// Association options.
///
/// Every option is optional so that a set of overrides can be merged over a
/// base configuration key by key; see [`AssociationOptions::merge`].
///
/// Options can also be read from JSON. Table references are not part of the
/// serialized form:
///
/// ```
/// use tabula_orm::association::{AssociationOptions, ForeignKey};
///
/// let options: AssociationOptions = serde_json::from_str(r#"{
///     "foreignKey": false,
///     "conditions": {"Companies.is_active": true},
///     "fields": ["company_name"]
/// }"#)?;
///
/// assert_eq!(options.foreign_key, Some(ForeignKey::Disabled));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssociationOptions {
    /// Foreign key; derived from the association name when unset.
    #[serde(deserialize_with = "deserialize_foreign_key")]
    pub foreign_key: Option<ForeignKey>,
    /// The table owning the association.
    #[serde(skip)]
    pub source_table: Option<Arc<Table>>,
    /// The associated table; looked up by association name when unset.
    #[serde(skip)]
    pub target_table: Option<Arc<Table>>,
    /// Extra join conditions.
    #[serde(deserialize_with = "deserialize_conditions")]
    pub conditions: Option<Vec<Condition>>,
    /// Target columns to select; all target columns when unset or empty.
    pub fields: Option<Vec<String>>,
    /// Whether target columns are selected at all. Defaults to true.
    pub include_fields: Option<bool>,
    /// Join type. Defaults to `LEFT`.
    pub join_type: Option<JoinType>,
}

impl AssociationOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the foreign key column.
    #[must_use]
    pub fn foreign_key(mut self, column: impl Into<String>) -> Self {
        self.foreign_key = Some(ForeignKey::Column(column.into()));
        self
    }

    /// Disables the foreign key join condition.
    #[must_use]
    pub fn without_foreign_key(mut self) -> Self {
        self.foreign_key = Some(ForeignKey::Disabled);
        self
    }

    /// Sets the source table.
    #[must_use]
    pub fn source_table(mut self, table: Arc<Table>) -> Self {
        self.source_table = Some(table);
        self
    }

    /// Sets the target table.
    #[must_use]
    pub fn target_table(mut self, table: Arc<Table>) -> Self {
        self.target_table = Some(table);
        self
    }

    /// Sets the join conditions.
    #[must_use]
    pub fn conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Appends a join condition.
    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.get_or_insert_with(Vec::new).push(condition);
        self
    }

    /// Sets the selected target columns.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Sets whether target columns are selected.
    #[must_use]
    pub fn include_fields(mut self, include: bool) -> Self {
        self.include_fields = Some(include);
        self
    }

    /// Sets the join type.
    #[must_use]
    pub fn join_type(mut self, join_type: JoinType) -> Self {
        self.join_type = Some(join_type);
        self
    }

    /// Returns these options with every option set in `overrides` replacing
    /// the corresponding option here.
    #[must_use]
    pub fn merge(&self, overrides: &Self) -> Self {
        Self {
            foreign_key: pick(&overrides.foreign_key, &self.foreign_key),
            source_table: pick(&overrides.source_table, &self.source_table),
            target_table: pick(&overrides.target_table, &self.target_table),
            conditions: pick(&overrides.conditions, &self.conditions),
            fields: pick(&overrides.fields, &self.fields),
            include_fields: overrides.include_fields.or(self.include_fields),
            join_type: overrides.join_type.or(self.join_type),
        }
    }
}

fn pick<T: Clone>(preferred: &Option<T>, fallback: &Option<T>) -> Option<T> {
    preferred.as_ref().or(fallback.as_ref()).cloned()
}

/// Accepts a column name, `false` to disable the condition, or `true` to
/// keep the conventional column.
fn deserialize_foreign_key<'de, D>(deserializer: D) -> Result<Option<ForeignKey>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Column(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None | Some(Raw::Flag(true)) => None,
        Some(Raw::Flag(false)) => Some(ForeignKey::Disabled),
        Some(Raw::Column(column)) if column.is_empty() => Some(ForeignKey::Disabled),
        Some(Raw::Column(column)) => Some(ForeignKey::Column(column)),
    })
}

/// Accepts an object of `field: value` equality conditions, or an array
/// whose items are such objects or raw SQL strings.
fn deserialize_conditions<'de, D>(deserializer: D) -> Result<Option<Vec<Condition>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Item {
        Raw(String),
        Fields(IndexMap<String, serde_json::Value>),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Fields(IndexMap<String, serde_json::Value>),
        List(Vec<Item>),
    }

    fn push_fields<E: serde::de::Error>(
        conditions: &mut Vec<Condition>,
        fields: IndexMap<String, serde_json::Value>,
    ) -> Result<(), E> {
        for (field, value) in fields {
            let value = SqlValue::try_from(value)
                .map_err(|e| E::custom(format!("condition on {field}: {e}")))?;
            conditions.push(Condition::eq(field, value));
        }
        Ok(())
    }

    let Some(raw) = Option::<Raw>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let mut conditions = Vec::new();
    match raw {
        Raw::Fields(fields) => push_fields::<D::Error>(&mut conditions, fields)?,
        Raw::List(items) => {
            for item in items {
                match item {
                    Item::Raw(sql) => conditions.push(Condition::raw(sql)),
                    Item::Fields(fields) => push_fields::<D::Error>(&mut conditions, fields)?,
                }
            }
        }
    }
    Ok(Some(conditions))
}
