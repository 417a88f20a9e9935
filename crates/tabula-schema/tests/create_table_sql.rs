//! Integration tests for dialect-delegated CREATE TABLE generation.

mod common;

use common::{init_tracing, RecordingDialect, TestConnection};
use tabula_schema::{ColumnDefinition, KeyAttributes, SchemaError, TableSchema};

fn articles() -> TableSchema {
    let mut table = TableSchema::new("articles");
    table
        .add_column("id", "integer")
        .add_column("title", ColumnDefinition::new("string").length(255))
        .add_column("body", "text");
    table
        .add_index("search", KeyAttributes::new("fulltext").columns(["title", "body"]))
        .unwrap()
        .add_constraint("primary", KeyAttributes::new("primary").columns(["id"]))
        .unwrap()
        .add_index("by_title", KeyAttributes::new("index").columns(["title"]))
        .unwrap();
    table
}

#[test]
fn test_create_table_sql_delegates_in_order() {
    init_tracing();
    let connection = TestConnection {
        dialect: RecordingDialect::new(),
    };

    let statements = articles().create_table_sql(&connection).unwrap();

    assert_eq!(
        connection.dialect.calls(),
        [
            "column:articles.id",
            "column:articles.title",
            "column:articles.body",
            "constraint:articles.primary",
            "index:articles.search",
            "index:articles.by_title",
            "create_table:articles",
        ]
    );
    assert_eq!(
        statements,
        [
            "CREATE TABLE articles (column(id) integer, column(title) string, column(body) text, constraint(primary))",
            "index(search)",
            "index(by_title)",
        ]
    );
}

#[test]
fn test_create_table_sql_empty_table() {
    let connection = TestConnection {
        dialect: RecordingDialect::new(),
    };

    let statements = TableSchema::new("empty").create_table_sql(&connection).unwrap();

    assert_eq!(connection.dialect.calls(), ["create_table:empty"]);
    assert_eq!(statements, ["CREATE TABLE empty ()"]);
}

#[test]
fn test_create_table_sql_propagates_dialect_errors() {
    init_tracing();
    let connection = TestConnection {
        dialect: RecordingDialect::failing_on("primary"),
    };

    let err = articles().create_table_sql(&connection).unwrap_err();

    match err {
        SchemaError::Dialect { dialect, message } => {
            assert_eq!(dialect, "recording");
            assert_eq!(message, "cannot render primary");
        }
        other => panic!("Expected dialect error, got {other:?}"),
    }
    // Rendering stops at the failing item.
    assert_eq!(
        connection.dialect.calls().last().map(String::as_str),
        Some("constraint:articles.primary")
    );
}

#[test]
fn test_create_table_sql_through_trait_object() {
    let connection = TestConnection {
        dialect: RecordingDialect::new(),
    };
    let connection: &dyn tabula_schema::Connection = &connection;

    let statements = articles().create_table_sql(connection).unwrap();
    assert_eq!(statements.len(), 3);
}
