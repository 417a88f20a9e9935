#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::json;
use tabula_orm::{JoinClause, OrmError, Query, Result, Table, TableLocator, TableOptions, TableRegistry};

/// Builds a table from a JSON table configuration.
pub fn table(alias: &str, options: serde_json::Value) -> Arc<Table> {
    let options: TableOptions = serde_json::from_value(options).unwrap();
    Arc::new(Table::from_options(alias, options).unwrap())
}

pub fn companies() -> Arc<Table> {
    table(
        "Companies",
        json!({
            "schema": {
                "id": {"type": "integer"},
                "company_name": {"type": "string"},
                "_constraints": {
                    "primary": {"type": "primary", "columns": ["id"]}
                }
            }
        }),
    )
}

pub fn clients() -> Arc<Table> {
    table(
        "Clients",
        json!({
            "schema": {
                "id": {"type": "integer"},
                "client_name": {"type": "string"},
                "company_id": {"type": "integer"},
                "_constraints": {
                    "primary": {"type": "primary", "columns": ["id"]}
                }
            }
        }),
    )
}

/// A query that records the calls made to it.
#[derive(Debug, Default)]
pub struct RecordingQuery {
    pub joins: Vec<IndexMap<String, JoinClause>>,
    pub selects: Vec<IndexMap<String, String>>,
    pub fail_join: bool,
    pub fail_select: bool,
}

impl Query for RecordingQuery {
    fn join(&mut self, joins: IndexMap<String, JoinClause>) -> Result<()> {
        if self.fail_join {
            return Err(OrmError::Query("join rejected".into()));
        }
        self.joins.push(joins);
        Ok(())
    }

    fn select(&mut self, fields: IndexMap<String, String>) -> Result<()> {
        if self.fail_select {
            return Err(OrmError::Query("select rejected".into()));
        }
        self.selects.push(fields);
        Ok(())
    }
}

/// A locator that counts lookups before delegating to a registry.
#[derive(Debug, Default)]
pub struct CountingLocator {
    pub registry: TableRegistry,
    lookups: AtomicUsize,
}

impl CountingLocator {
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl TableLocator for CountingLocator {
    fn locate(&self, alias: &str) -> Option<Arc<Table>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.registry.locate(alias)
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
