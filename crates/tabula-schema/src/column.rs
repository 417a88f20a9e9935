//! Column definitions.

use serde::{Deserialize, Serialize};

/// Default value for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Boolean default.
    Bool(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// String default.
    String(String),
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Definition of a single column.
///
/// Every definition carries the same set of attributes. Attributes that were
/// not supplied are `None`, and anything outside this set is dropped when a
/// definition is read from configuration.
///
/// # Example
///
/// ```
/// use tabula_schema::ColumnDefinition;
///
/// let title = ColumnDefinition::new("string").length(255).null(false);
/// assert_eq!(title.column_type.as_deref(), Some("string"));
/// assert_eq!(title.precision, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Abstract column type (`integer`, `string`, `decimal`, ...).
    #[serde(rename = "type")]
    pub column_type: Option<String>,
    /// Column length.
    pub length: Option<u32>,
    /// Decimal places for float and decimal types.
    pub precision: Option<u32>,
    /// Whether the column can hold NULL.
    pub null: Option<bool>,
    /// Default value.
    pub default: Option<DefaultValue>,
    /// Whether the column is fixed length.
    pub fixed: Option<bool>,
    /// Column comment. Not every dialect supports these.
    pub comment: Option<String>,
}

impl ColumnDefinition {
    /// Creates a definition with only the type set.
    #[must_use]
    pub fn new(column_type: impl Into<String>) -> Self {
        Self {
            column_type: Some(column_type.into()),
            ..Self::default()
        }
    }

    /// Sets the length.
    #[must_use]
    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the precision.
    #[must_use]
    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Sets whether the column is nullable.
    #[must_use]
    pub fn null(mut self, null: bool) -> Self {
        self.null = Some(null);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the column as fixed length.
    #[must_use]
    pub fn fixed(mut self, fixed: bool) -> Self {
        self.fixed = Some(fixed);
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl From<&str> for ColumnDefinition {
    fn from(column_type: &str) -> Self {
        Self::new(column_type)
    }
}

impl From<String> for ColumnDefinition {
    fn from(column_type: String) -> Self {
        Self::new(column_type)
    }
}

/// Column input as it appears in configuration: either a bare type name or a
/// full attribute object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    /// Bare type name, e.g. `"integer"`.
    Type(String),
    /// Attribute object.
    Definition(ColumnDefinition),
}

impl From<ColumnSpec> for ColumnDefinition {
    fn from(spec: ColumnSpec) -> Self {
        match spec {
            ColumnSpec::Type(column_type) => Self::new(column_type),
            ColumnSpec::Definition(definition) => definition,
        }
    }
}
