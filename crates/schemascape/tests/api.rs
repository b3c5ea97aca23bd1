//! Public API tests: parse, layout, compare and cardinality entry points

use schemascape::{
    apply_layout_to_schema, are_schemas_equal, calculate_cardinality, parse_cardinality,
    parse_schema, relationships, set_table_category, try_parse_schema, ColumnFacts, LayoutKind,
    SchemaError, SchemaFormat, ViewMode, DEFAULT_SCHEMA_NAME,
};

const SHOP_SQL: &str = r#"
CREATE TABLE users (
    id SERIAL PRIMARY KEY,
    email VARCHAR(255) NOT NULL UNIQUE
);

CREATE TABLE orders (
    id SERIAL PRIMARY KEY,
    user_id INT NOT NULL REFERENCES users(id),
    coupon_id INT
);

CREATE TABLE coupons (
    id SERIAL PRIMARY KEY,
    code TEXT UNIQUE
);

ALTER TABLE orders ADD CONSTRAINT fk_coupon FOREIGN KEY (coupon_id) REFERENCES coupons(id);
"#;

const SHOP_MERMAID: &str = r#"erDiagram
    USERS ||--o{ ORDERS : places
    USERS {
        int id PK
        string email UK
    }
    ORDERS {
        int id PK
        int user_id FK
    }
"#;

#[test]
fn test_parse_schema_detects_sql() {
    let schema = parse_schema(SHOP_SQL, None).unwrap();
    assert_eq!(schema.format, SchemaFormat::Sql);
    assert_eq!(schema.name, DEFAULT_SCHEMA_NAME);
    let names: Vec<_> = schema.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["users", "orders", "coupons"]);
}

#[test]
fn test_parse_schema_detects_mermaid() {
    let schema = parse_schema(SHOP_MERMAID, None).unwrap();
    assert_eq!(schema.format, SchemaFormat::Mermaid);
    assert_eq!(schema.table_count(), 2);
    let orders = schema.table("orders").unwrap();
    let user_id = orders.column("user_id").unwrap();
    assert!(user_id.is_foreign_key);
    assert_eq!(user_id.references.as_ref().unwrap().table, "USERS");
}

#[test]
fn test_format_hint_skips_detection() {
    // Forcing the SQL grammar onto Mermaid text finds nothing
    assert!(parse_schema(SHOP_MERMAID, Some(SchemaFormat::Sql)).is_none());
    assert!(parse_schema(SHOP_MERMAID, Some(SchemaFormat::Mermaid)).is_some());
}

#[test]
fn test_parse_schema_none_for_garbage() {
    assert!(parse_schema("", None).is_none());
    assert!(parse_schema("hello world", None).is_none());
}

#[test]
fn test_try_parse_schema_reports_reason() {
    match try_parse_schema("hello world", None) {
        Err(SchemaError::UnknownFormat) => {}
        other => panic!("expected UnknownFormat, got {:?}", other),
    }
    match try_parse_schema("erDiagram\n", None) {
        Err(SchemaError::NoTables { format }) => assert_eq!(format, SchemaFormat::Mermaid),
        other => panic!("expected NoTables, got {:?}", other),
    }
}

#[test]
fn test_every_foreign_key_is_a_relationship() {
    let schema = parse_schema(SHOP_SQL, None).unwrap();
    let edges = relationships(&schema);
    assert_eq!(edges.len(), 2);

    let to_users = edges.iter().find(|r| r.to_table == "users").unwrap();
    assert_eq!(to_users.from_table, "orders");
    assert_eq!(to_users.fk_column, "user_id");
    assert_eq!(to_users.cardinality, "1:1..N");

    let to_coupons = edges.iter().find(|r| r.to_table == "coupons").unwrap();
    assert_eq!(to_coupons.fk_column, "coupon_id");
    assert_eq!(to_coupons.cardinality, "0..1:0..N");
}

#[test]
fn test_apply_layout_does_not_mutate_input() {
    let schema = parse_schema(SHOP_SQL, None).unwrap();
    let before = schema.clone();
    let placed = apply_layout_to_schema(&schema, LayoutKind::ForceDirected, ViewMode::ThreeD);

    assert_eq!(schema, before);
    assert_eq!(placed.table_count(), schema.table_count());
    for (original, moved) in schema.tables.iter().zip(&placed.tables) {
        assert_eq!(original.name, moved.name);
        assert_eq!(original.columns, moved.columns);
        assert!(moved.position.is_finite());
    }
}

#[test]
fn test_layout_kinds_all_position_every_table() {
    let schema = parse_schema(SHOP_SQL, None).unwrap();
    for kind in [LayoutKind::ForceDirected, LayoutKind::Hierarchical, LayoutKind::Circular] {
        for mode in [ViewMode::TwoD, ViewMode::ThreeD] {
            let placed = apply_layout_to_schema(&schema, kind, mode);
            let positions = placed.positions();
            assert_eq!(positions.len(), 3, "{kind} {mode}");
            for (i, a) in positions.iter().enumerate() {
                for b in &positions[i + 1..] {
                    assert_ne!(a, b, "{kind} {mode} placed two tables together");
                }
            }
            if mode == ViewMode::TwoD {
                assert!(positions.iter().all(|p| p.y == 0.0));
            }
        }
    }
}

#[test]
fn test_sql_and_mermaid_agree() {
    let sql = parse_schema(
        "CREATE TABLE users (id int PRIMARY KEY, email string UNIQUE);
         CREATE TABLE orders (id int PRIMARY KEY, user_id int REFERENCES users(id));",
        None,
    )
    .unwrap();
    let mermaid = parse_schema(SHOP_MERMAID, None).unwrap();
    assert!(are_schemas_equal(&sql, &mermaid));
}

#[test]
fn test_category_edit_keeps_structure() {
    let schema = parse_schema(SHOP_SQL, None).unwrap();
    let edited = set_table_category(&schema, "coupons", "Billing");

    assert_eq!(edited.table("coupons").unwrap().category, "Billing");
    assert_ne!(
        edited.table("coupons").unwrap().color,
        edited.table("orders").unwrap().color
    );
    assert!(are_schemas_equal(&schema, &edited));
}

#[test]
fn test_cardinality_exports() {
    let pk = ColumnFacts::new().primary_key();
    let fk = ColumnFacts::new().nullable(false);
    assert_eq!(calculate_cardinality(Some(&pk), &fk), "1:1..N");

    let parsed = parse_cardinality("1:1..N");
    assert!(!parsed.left_is_many);
    assert!(parsed.right_is_many);
}
