//! Join condition expressions.
//!
//! A condition compares a field with either a literal value, which a query
//! binds as a parameter, or an [`IdentifierExpression`], which refers to
//! another column and must never be bound.

use std::fmt;

/// A literal value in a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl TryFrom<serde_json::Value> for SqlValue {
    type Error = String;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .ok_or_else(|| format!("unsupported number {n}")),
            Value::String(s) => Ok(Self::Text(s)),
            other => Err(format!("expected a scalar value, found {other}")),
        }
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

impl ToSqlValue for i32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        self.map_or(SqlValue::Null, ToSqlValue::to_sql_value)
    }
}

/// A reference to a column, e.g. `Clients.company_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentifierExpression {
    identifier: String,
}

impl IdentifierExpression {
    /// Creates an identifier expression.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    /// Returns the referenced identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for IdentifierExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    /// A literal, bound as a parameter.
    Value(SqlValue),
    /// A column reference.
    Identifier(IdentifierExpression),
}

/// A single join condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `field = value`.
    Eq {
        /// Qualified field name, e.g. `Companies.id`.
        field: String,
        /// Compared value.
        value: ConditionValue,
    },
    /// A raw SQL snippet, used verbatim.
    Raw(String),
}

impl Condition {
    /// Compares a field with a literal value.
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl ToSqlValue) -> Self {
        Self::Eq {
            field: field.into(),
            value: ConditionValue::Value(value.to_sql_value()),
        }
    }

    /// Compares a field with another column.
    #[must_use]
    pub fn identifier(field: impl Into<String>, identifier: IdentifierExpression) -> Self {
        Self::Eq {
            field: field.into(),
            value: ConditionValue::Identifier(identifier),
        }
    }

    /// Creates a raw SQL condition.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identifier_is_not_a_value() {
        let by_value = Condition::eq("Companies.id", "Clients.company_id");
        let by_identifier = Condition::identifier(
            "Companies.id",
            IdentifierExpression::new("Clients.company_id"),
        );
        assert_ne!(by_value, by_identifier);
    }

    #[test]
    fn test_sql_value_from_json() {
        assert_eq!(SqlValue::try_from(json!(true)), Ok(SqlValue::Bool(true)));
        assert_eq!(SqlValue::try_from(json!(3)), Ok(SqlValue::Int(3)));
        assert_eq!(SqlValue::try_from(json!(1.5)), Ok(SqlValue::Float(1.5)));
        assert_eq!(SqlValue::try_from(json!(null)), Ok(SqlValue::Null));
        assert!(SqlValue::try_from(json!([1, 2])).is_err());
    }

    #[test]
    fn test_option_to_sql_value() {
        assert_eq!(None::<i64>.to_sql_value(), SqlValue::Null);
        assert_eq!(Some("x").to_sql_value(), SqlValue::Text("x".into()));
    }
}
