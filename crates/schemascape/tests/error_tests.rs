//! Tests for error reporting across the pipeline

use schemascape::core::{line_column, SchemaError};
use schemascape::plugins::Orchestrator;
use schemascape::{try_parse_schema, SchemaFormat};

#[test]
fn test_error_messages() {
    let error = SchemaError::parse_error("Unexpected token".to_string(), 3, 7);
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Parse error"));
    assert!(error_msg.contains("Unexpected token"));
    assert!(error_msg.contains("line 3"));
    assert!(error_msg.contains("column 7"));

    assert_eq!(
        SchemaError::UnknownFormat.to_string(),
        "Unknown schema format: input is neither SQL DDL nor a Mermaid erDiagram"
    );
    assert_eq!(
        SchemaError::no_tables(SchemaFormat::Sql).to_string(),
        "No tables found in sql input"
    );
}

#[test]
fn test_error_is_std_error() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&SchemaError::UnknownFormat);
    let wrapped: anyhow::Error = SchemaError::database_error("boom").into();
    assert!(wrapped.downcast_ref::<SchemaError>().is_some());
}

#[test]
fn test_unknown_format() {
    for input in ["", "   \n", "just some notes", "{\"tables\": []}"] {
        assert!(
            matches!(try_parse_schema(input, None), Err(SchemaError::UnknownFormat)),
            "{input:?}"
        );
    }
}

#[test]
fn test_no_tables_keeps_hinted_format() {
    match try_parse_schema("DROP TABLE users;", Some(SchemaFormat::Sql)) {
        Err(SchemaError::NoTables { format }) => assert_eq!(format, SchemaFormat::Sql),
        other => panic!("expected NoTables, got {:?}", other),
    }
    match try_parse_schema("", Some(SchemaFormat::Mermaid)) {
        Err(SchemaError::NoTables { format }) => assert_eq!(format, SchemaFormat::Mermaid),
        other => panic!("expected NoTables, got {:?}", other),
    }
}

#[test]
fn test_orchestrator_without_detectors_cannot_detect() {
    let orchestrator = Orchestrator::new();
    let error = orchestrator
        .process("CREATE TABLE a (id INT);", None)
        .unwrap_err();
    assert!(matches!(
        error.downcast_ref::<SchemaError>(),
        Some(SchemaError::UnknownFormat)
    ));
    // A hint bypasses detection entirely
    assert!(orchestrator
        .process("CREATE TABLE a (id INT);", Some(SchemaFormat::Sql))
        .is_ok());
}

#[test]
fn test_bad_statements_do_not_fail_the_parse() {
    let schema = try_parse_schema(
        "CREATE TABLE ok (id INT PRIMARY KEY);
         CREATE TABLE (;
         CREATE VIEW nothing AS VALUES (1);
         CREATE TABLE also_ok (ok_id INT REFERENCES ok);",
        None,
    )
    .unwrap();
    let names: Vec<_> = schema.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["ok", "also_ok"]);
}

#[test]
fn test_line_column_counts_characters() {
    let input = "erDiagram\n  ÄPFEL {";
    assert_eq!(line_column(input, input.len()), (2, 10));
}
