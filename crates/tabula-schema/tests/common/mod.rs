#![allow(dead_code)]

use std::sync::Mutex;

use tabula_schema::{Connection, Result, SchemaDialect, SchemaError, TableSchema};

/// A dialect that renders placeholder fragments and records every call.
#[derive(Debug, Default)]
pub struct RecordingDialect {
    calls: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl RecordingDialect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails when asked to render the item with this name.
    pub fn failing_on(name: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(name.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, kind: &str, schema: &TableSchema, name: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{kind}:{}.{name}", schema.name()));
        if self.fail_on.as_deref() == Some(name) {
            return Err(SchemaError::dialect(self.name(), format!("cannot render {name}")));
        }
        Ok(format!("{kind}({name})"))
    }
}

impl SchemaDialect for RecordingDialect {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn column_sql(&self, schema: &TableSchema, name: &str) -> Result<String> {
        let column = schema.column(name).expect("dialect asked for unknown column");
        self.record("column", schema, name)
            .map(|sql| format!("{sql} {}", column.column_type.as_deref().unwrap_or("?")))
    }

    fn constraint_sql(&self, schema: &TableSchema, name: &str) -> Result<String> {
        self.record("constraint", schema, name)
    }

    fn index_sql(&self, schema: &TableSchema, name: &str) -> Result<String> {
        self.record("index", schema, name)
    }

    fn create_table_sql(
        &self,
        schema: &TableSchema,
        columns: &[String],
        constraints: &[String],
        indexes: &[String],
    ) -> Result<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create_table:{}", schema.name()));
        let body: Vec<&str> = columns
            .iter()
            .chain(constraints)
            .map(String::as_str)
            .collect();
        let mut statements = vec![format!("CREATE TABLE {} ({})", schema.name(), body.join(", "))];
        statements.extend(indexes.iter().cloned());
        Ok(statements)
    }
}

/// A connection that only knows its dialect.
pub struct TestConnection<D> {
    pub dialect: D,
}

impl<D: SchemaDialect> Connection for TestConnection<D> {
    fn schema_dialect(&self) -> &dyn SchemaDialect {
        &self.dialect
    }
}

/// Routes library logs to the test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .with_test_writer()
        .try_init();
}
