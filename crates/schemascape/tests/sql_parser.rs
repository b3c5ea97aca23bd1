//! SQL DDL through the full pipeline: parse, resolve, classify

use schemascape::{parse_schema, relationships, try_parse_schema, SchemaFormat, UNKNOWN_TYPE};

fn sql(text: &str) -> schemascape::DatabaseSchema {
    try_parse_schema(text, Some(SchemaFormat::Sql)).unwrap()
}

#[test]
fn test_postgres_dump_style() {
    let schema = sql(r#"
        -- Dumped from database version 15.2
        SET statement_timeout = 0;
        CREATE SCHEMA IF NOT EXISTS shop;

        CREATE TABLE shop.customers (
            id uuid DEFAULT gen_random_uuid() NOT NULL,
            email character varying(255) NOT NULL,
            CONSTRAINT customers_pkey PRIMARY KEY (id),
            CONSTRAINT customers_email_key UNIQUE (email)
        );

        CREATE TABLE shop.purchases (
            id bigint NOT NULL,
            customer_id uuid,
            total numeric(12, 2) DEFAULT 0 NOT NULL
        );

        ALTER TABLE ONLY shop.purchases
            ADD CONSTRAINT purchases_pkey PRIMARY KEY (id);
        ALTER TABLE ONLY shop.purchases
            ADD CONSTRAINT purchases_customer_fk FOREIGN KEY (customer_id) REFERENCES shop.customers(id);
        INSERT INTO shop.customers VALUES ('x', 'y');
    "#);

    assert_eq!(schema.name, "shop");
    assert_eq!(schema.table_count(), 2);

    let customers = schema.table("customers").unwrap();
    assert!(customers.column("id").unwrap().is_primary_key);
    assert!(customers.column("email").unwrap().is_unique);
    assert_eq!(customers.column("email").unwrap().data_type, "character varying(255)");

    let purchases = schema.table("purchases").unwrap();
    assert!(purchases.column("id").unwrap().is_primary_key);
    let customer_id = purchases.column("customer_id").unwrap();
    assert!(customer_id.is_foreign_key);
    assert!(customer_id.is_nullable);
    assert_eq!(customer_id.references.as_ref().unwrap().table, "customers");

    assert_eq!(relationships(&schema)[0].cardinality, "0..1:0..N");
}

#[test]
fn test_mysql_dump_style() {
    let schema = sql(
        "USE `blog`;
         CREATE TABLE `authors` (
             `id` int NOT NULL AUTO_INCREMENT,
             `name` varchar(100) NOT NULL,
             PRIMARY KEY (`id`)
         ) ENGINE=InnoDB;
         CREATE TABLE `posts` (
             `id` int NOT NULL AUTO_INCREMENT,
             `author_id` int NOT NULL,
             PRIMARY KEY (`id`),
             KEY `author_idx` (`author_id`),
             CONSTRAINT `posts_author` FOREIGN KEY (`author_id`) REFERENCES `authors` (`id`)
         ) ENGINE=InnoDB;",
    );
    assert_eq!(schema.name, "blog");
    let edge = &relationships(&schema)[0];
    assert_eq!(edge.from_table, "posts");
    assert_eq!(edge.to_table, "authors");
    assert_eq!(edge.cardinality, "1:1..N");
}

#[test]
fn test_forward_references_resolve() {
    let schema = sql(
        "CREATE TABLE comments (id INT PRIMARY KEY, post_id INT REFERENCES posts);
         CREATE TABLE posts (id INT PRIMARY KEY);",
    );
    let reference = schema.tables[0].columns[1].references.as_ref().unwrap();
    assert_eq!(reference.table, "posts");
    assert_eq!(reference.column, "id");
}

#[test]
fn test_dangling_reference_is_dropped() {
    let schema = sql("CREATE TABLE comments (id INT PRIMARY KEY, post_id INT REFERENCES posts(id));");
    let post_id = schema.tables[0].column("post_id").unwrap();
    assert!(!post_id.is_foreign_key);
    assert!(post_id.references.is_none());
    assert!(relationships(&schema).is_empty());
}

#[test]
fn test_views_carry_lineage() {
    let schema = sql(
        "CREATE TABLE users (id INT PRIMARY KEY, email TEXT NOT NULL);
         CREATE TABLE orders (id INT PRIMARY KEY, user_id INT REFERENCES users(id), amount NUMERIC);
         CREATE VIEW user_totals AS
             SELECT u.email, SUM(o.amount) AS total
             FROM users u JOIN orders o ON o.user_id = u.id
             GROUP BY u.email;
         CREATE OR REPLACE VIEW order_view AS SELECT * FROM orders;",
    );
    let totals = schema.table("user_totals").unwrap();
    assert!(totals.is_view);
    assert_eq!(totals.columns[0].name, "email");
    assert_eq!(totals.columns[0].data_type, "TEXT");
    assert_eq!(totals.columns[0].source_table.as_deref(), Some("users"));
    assert_eq!(totals.columns[1].data_type, UNKNOWN_TYPE);

    let order_view = schema.table("order_view").unwrap();
    let names: Vec<_> = order_view.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "user_id", "amount"]);
    // Views never own keys or references
    assert!(order_view
        .columns
        .iter()
        .all(|c| !c.is_primary_key && !c.is_foreign_key && c.references.is_none()));
}

#[test]
fn test_view_classified_by_name() {
    let schema = sql(
        "CREATE TABLE events (id INT);
         CREATE VIEW user_logins AS SELECT id FROM events;",
    );
    assert_eq!(schema.table("events").unwrap().category, "Analytics");
    assert_eq!(schema.table("user_logins").unwrap().category, "Auth");
}

#[test]
fn test_quoted_identifiers_and_comments() {
    let schema = sql(
        "/* header */
         CREATE TABLE \"Order Items\" ( -- trailing comment
             \"Item ID\" INT PRIMARY KEY,
             qty INT /* inline */ NOT NULL
         );",
    );
    let table = schema.table("order items").unwrap();
    assert_eq!(table.name, "Order Items");
    assert!(table.column("item id").unwrap().is_primary_key);
    assert!(!table.column("qty").unwrap().is_nullable);
}

#[test]
fn test_duplicate_table_keeps_last() {
    let schema = sql(
        "CREATE TABLE a (x INT);
         CREATE TABLE b (y INT);
         CREATE TABLE A (z INT);",
    );
    assert_eq!(schema.table_count(), 2);
    let a = schema.table("a").unwrap();
    assert!(a.column("z").is_some());
    assert!(a.column("x").is_none());
}

#[test]
fn test_no_create_statements() {
    assert!(parse_schema("SELECT 1; INSERT INTO t VALUES (1);", Some(SchemaFormat::Sql)).is_none());
}
