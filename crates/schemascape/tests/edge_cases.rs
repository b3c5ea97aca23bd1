//! Edge case tests for schema parsing and layout
//!
//! Boundary conditions, unusual inputs, and degenerate schemas.

// =============================================================================
// Degenerate Schemas
// =============================================================================

mod degenerate_schemas {
    use schemascape::{
        apply_layout_to_schema, parse_schema, relationships, LayoutKind, Position, ViewMode,
    };

    #[test]
    fn test_single_table_sits_at_origin() {
        let schema = parse_schema("CREATE TABLE solo (id INT);", None).unwrap();
        for kind in [LayoutKind::ForceDirected, LayoutKind::Circular] {
            let placed = apply_layout_to_schema(&schema, kind, ViewMode::ThreeD);
            assert_eq!(placed.tables[0].position, Position::ORIGIN, "{kind}");
        }
    }

    #[test]
    fn test_table_without_columns() {
        let schema = parse_schema("erDiagram\n    LONELY\n", None).unwrap();
        assert_eq!(schema.table_count(), 1);
        assert!(schema.tables[0].columns.is_empty());
        assert!(relationships(&schema).is_empty());
    }

    #[test]
    fn test_self_referencing_table() {
        let schema = parse_schema(
            "CREATE TABLE employees (id INT PRIMARY KEY, manager_id INT REFERENCES employees(id));",
            None,
        )
        .unwrap();
        let edges = relationships(&schema);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].from_table, edges[0].to_table);

        let placed = apply_layout_to_schema(&schema, LayoutKind::Hierarchical, ViewMode::ThreeD);
        assert!(placed.tables[0].position.is_finite());
    }

    #[test]
    fn test_disconnected_tables_spread_out() {
        let schema = parse_schema(
            "CREATE TABLE a (id INT); CREATE TABLE b (id INT); CREATE TABLE c (id INT);",
            None,
        )
        .unwrap();
        let placed = apply_layout_to_schema(&schema, LayoutKind::ForceDirected, ViewMode::TwoD);
        let positions = placed.positions();
        assert!(positions[0].distance_to(&positions[1]) > 1.0);
        assert!(positions[1].distance_to(&positions[2]) > 1.0);
    }
}

// =============================================================================
// Unusual Input
// =============================================================================

mod unusual_input {
    use schemascape::{parse_schema, SchemaFormat};

    #[test]
    fn test_windows_line_endings() {
        let schema = parse_schema(
            "erDiagram\r\n    A {\r\n        int id PK\r\n    }\r\n    A ||--o{ B : has\r\n",
            None,
        )
        .unwrap();
        assert_eq!(schema.table_count(), 2);
        assert!(schema.table("A").unwrap().column("id").unwrap().is_primary_key);
    }

    #[test]
    fn test_unicode_names() {
        let schema = parse_schema(
            "CREATE TABLE \"Bestellungen\" (\"Größe\" INT, kunde_id INT REFERENCES \"Kunden\");
             CREATE TABLE \"Kunden\" (id INT PRIMARY KEY);",
            None,
        )
        .unwrap();
        let table = schema.table("bestellungen").unwrap();
        assert!(table.column("größe").is_some());
        assert_eq!(table.column("kunde_id").unwrap().references.as_ref().unwrap().table, "Kunden");
    }

    #[test]
    fn test_lowercase_header_and_indentation() {
        let schema = parse_schema("  erdiagram\n\tA ||--|| B : one", None).unwrap();
        assert_eq!(schema.format, SchemaFormat::Mermaid);
        assert_eq!(schema.table_count(), 2);
    }

    #[test]
    fn test_unclosed_entity_block() {
        let schema = parse_schema("erDiagram\n    A {\n        int id PK\n", None).unwrap();
        assert!(schema.table("A").unwrap().column("id").is_some());
    }

    #[test]
    fn test_unterminated_block_comment() {
        let schema = parse_schema("CREATE TABLE a (id INT); /* never closed", None).unwrap();
        assert_eq!(schema.table_count(), 1);
    }

    #[test]
    fn test_many_tables() {
        let sql: String = (0..200)
            .map(|i| format!("CREATE TABLE t{i} (id INT PRIMARY KEY, prev_id INT REFERENCES t{}(id));\n", i.max(1) - 1))
            .collect();
        let schema = parse_schema(&sql, None).unwrap();
        assert_eq!(schema.table_count(), 200);
    }
}

// =============================================================================
// Naming
// =============================================================================

mod naming {
    use schemascape::schema::{classify, naming::singular};

    #[test]
    fn test_singular_forms() {
        assert_eq!(singular("categories"), "category");
        assert_eq!(singular("addresses"), "address");
        assert_eq!(singular("boxes"), "box");
        assert_eq!(singular("status"), "status");
        assert_eq!(singular("users"), "user");
    }

    #[test]
    fn test_classify_ignores_substrings() {
        // "user" inside "superuser" is not a word of its own
        assert_eq!(classify("superusers"), "General");
        assert_eq!(classify("tbl_UserAccounts"), "Auth");
    }
}
