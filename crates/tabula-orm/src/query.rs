//! The query contract associations attach to.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{OrmError, Result};
use crate::expression::Condition;

/// Join types.
///
/// Parsed case-insensitively, both from strings and from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum JoinType {
    /// `LEFT JOIN`
    #[default]
    Left,
    /// `INNER JOIN`
    Inner,
    /// `RIGHT JOIN`
    Right,
}

impl JoinType {
    /// Returns the SQL keyword for this join type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Inner => "INNER",
            Self::Right => "RIGHT",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinType {
    type Err = OrmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "LEFT" => Ok(Self::Left),
            "INNER" => Ok(Self::Inner),
            "RIGHT" => Ok(Self::Right),
            _ => Err(OrmError::Query(format!("invalid join type: {s}"))),
        }
    }
}

impl TryFrom<String> for JoinType {
    type Error = OrmError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// A table joined into a query.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// Underlying table name.
    pub table: String,
    /// Join type.
    pub join_type: JoinType,
    /// Join conditions, combined with AND.
    pub conditions: Vec<Condition>,
}

impl JoinClause {
    /// Creates a join without conditions.
    #[must_use]
    pub fn new(table: impl Into<String>, join_type: JoinType) -> Self {
        Self {
            table: table.into(),
            join_type,
            conditions: Vec::new(),
        }
    }

    /// Sets the join conditions.
    #[must_use]
    pub fn conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }
}

/// Operations an association needs from a query.
///
/// Implementations mutate the query in place. Errors are returned to the
/// caller of the association unchanged.
pub trait Query {
    /// Registers joins, keyed by the alias the joined table is known under.
    fn join(&mut self, joins: IndexMap<String, JoinClause>) -> Result<()>;

    /// Registers selected fields, keyed by result alias, e.g.
    /// `Companies__id => Companies.id`.
    fn select(&mut self, fields: IndexMap<String, String>) -> Result<()>;
}

/// A query that collects joins and selected fields in registration order.
///
/// Registering a join or field under an alias that is already present
/// replaces it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectQuery {
    joins: IndexMap<String, JoinClause>,
    fields: IndexMap<String, String>,
}

impl SelectQuery {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the registered joins.
    #[must_use]
    pub fn joins(&self) -> &IndexMap<String, JoinClause> {
        &self.joins
    }

    /// Returns the join registered under `alias`.
    #[must_use]
    pub fn join_for(&self, alias: &str) -> Option<&JoinClause> {
        self.joins.get(alias)
    }

    /// Returns the selected fields.
    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }
}

impl Query for SelectQuery {
    fn join(&mut self, joins: IndexMap<String, JoinClause>) -> Result<()> {
        self.joins.extend(joins);
        Ok(())
    }

    fn select(&mut self, fields: IndexMap<String, String>) -> Result<()> {
        self.fields.extend(fields);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_type_parse() {
        assert_eq!("left".parse::<JoinType>().unwrap(), JoinType::Left);
        assert_eq!("INNER".parse::<JoinType>().unwrap(), JoinType::Inner);
        assert!("OUTER".parse::<JoinType>().is_err());
    }

    #[test]
    fn test_join_type_deserialize_ignores_case() {
        let parse = |s: &str| serde_json::from_value::<JoinType>(serde_json::Value::from(s));
        assert_eq!(parse("left").unwrap(), JoinType::Left);
        assert_eq!(parse("Inner").unwrap(), JoinType::Inner);
        assert_eq!(parse("RIGHT").unwrap(), JoinType::Right);
        assert!(parse("outer").is_err());
        assert_eq!(JoinType::default().to_string(), "LEFT");
    }

    #[test]
    fn test_select_query_replaces_in_place() {
        let mut query = SelectQuery::new();
        query
            .join(IndexMap::from([
                ("Authors".to_string(), JoinClause::new("authors", JoinType::Left)),
                ("Tags".to_string(), JoinClause::new("tags", JoinType::Left)),
            ]))
            .unwrap();
        query
            .join(IndexMap::from([(
                "Authors".to_string(),
                JoinClause::new("people", JoinType::Inner),
            )]))
            .unwrap();

        assert_eq!(query.joins().keys().collect::<Vec<_>>(), ["Authors", "Tags"]);
        assert_eq!(query.join_for("Authors").unwrap().table, "people");
        assert!(query.join_for("Comments").is_none());
    }
}
