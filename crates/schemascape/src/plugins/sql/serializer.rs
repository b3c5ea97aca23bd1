//! SQL DDL serializer
//!
//! Writes a schema back out as `CREATE TABLE` / `CREATE VIEW` statements that
//! [`SqlParser`](super::SqlParser) reads back into an equal schema. Views
//! are emitted after every base table. A view column with lineage becomes
//! `table.column AS name`; any other view column becomes `NULL AS name`.

use std::fmt::Write;

use crate::core::{names_match, Column, DatabaseSchema, Table, DEFAULT_SCHEMA_NAME};

const RESERVED: &[&str] = &[
    "all", "and", "as", "by", "check", "column", "constraint", "create", "default", "delete",
    "from", "group", "index", "insert", "key", "not", "null", "on", "or", "order", "primary",
    "references", "select", "table", "to", "union", "unique", "update", "user", "view", "where",
];

/// Quote an identifier when it is not a plain lowercase-safe word
pub fn quote_identifier(name: &str) -> String {
    let plain = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_')
        && !RESERVED.contains(&name.to_lowercase().as_str());
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', ""))
    }
}

fn column_line(column: &Column, inline_primary_key: bool) -> String {
    let mut line = quote_identifier(&column.name);
    if !column.data_type.trim().is_empty() {
        line.push(' ');
        line.push_str(column.data_type.trim());
    }
    if column.is_primary_key && inline_primary_key {
        line.push_str(" PRIMARY KEY");
    } else if !column.is_nullable {
        line.push_str(" NOT NULL");
    }
    if column.is_unique {
        line.push_str(" UNIQUE");
    }
    if let Some(reference) = &column.references {
        let _ = write!(
            line,
            " REFERENCES {}({})",
            quote_identifier(&reference.table),
            quote_identifier(&reference.column)
        );
    }
    line
}

fn write_table(out: &mut String, table: &Table) {
    let primary_keys: Vec<&Column> = table.primary_key_columns().collect();
    let inline_primary_key = primary_keys.len() == 1;

    let mut lines: Vec<String> = table
        .columns
        .iter()
        .map(|column| column_line(column, inline_primary_key))
        .collect();
    if primary_keys.len() > 1 {
        let names: Vec<String> = primary_keys
            .iter()
            .map(|c| quote_identifier(&c.name))
            .collect();
        lines.push(format!("PRIMARY KEY ({})", names.join(", ")));
    }

    let _ = writeln!(out, "CREATE TABLE {} (", quote_identifier(&table.name));
    let _ = writeln!(out, "    {}", lines.join(",\n    "));
    let _ = writeln!(out, ");");
}

fn write_view(out: &mut String, view: &Table) {
    let mut sources: Vec<&str> = Vec::new();
    let items: Vec<String> = view
        .columns
        .iter()
        .map(|column| match (&column.source_table, &column.source_column) {
            (Some(table), Some(source)) => {
                if !sources.iter().any(|s| names_match(s, table)) {
                    sources.push(table);
                }
                format!(
                    "{}.{} AS {}",
                    quote_identifier(table),
                    quote_identifier(source),
                    quote_identifier(&column.name)
                )
            }
            _ => format!("NULL AS {}", quote_identifier(&column.name)),
        })
        .collect();

    let _ = write!(out, "CREATE VIEW {} AS\nSELECT ", quote_identifier(&view.name));
    if items.is_empty() {
        out.push_str("NULL");
    } else {
        out.push_str(&items.join(",\n       "));
    }
    if !sources.is_empty() {
        let from: Vec<String> = sources.iter().map(|s| quote_identifier(s)).collect();
        let _ = write!(out, "\nFROM {}", from.join(", "));
    }
    out.push_str(";\n");
}

/// Serialize a schema to SQL DDL
pub fn to_sql(schema: &DatabaseSchema) -> String {
    let mut out = String::new();
    if schema.name != DEFAULT_SCHEMA_NAME {
        let _ = writeln!(out, "-- {}\n", schema.name);
    }

    let (views, tables): (Vec<&Table>, Vec<&Table>) =
        schema.tables.iter().partition(|t| t.is_view);
    for table in tables {
        write_table(&mut out, table);
        out.push('\n');
    }
    for view in views {
        write_view(&mut out, view);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SchemaFormat;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("users"), "users");
        assert_eq!(quote_identifier("order"), "\"order\"");
        assert_eq!(quote_identifier("Line Items"), "\"Line Items\"");
        assert_eq!(quote_identifier("2fa"), "\"2fa\"");
    }

    #[test]
    fn test_table_output() {
        let schema = DatabaseSchema::new(SchemaFormat::Sql, DEFAULT_SCHEMA_NAME).with_table(
            Table::new("orders")
                .with_column(Column::new("id", "INT").primary_key())
                .with_column(Column::new("user_id", "INT").not_null().foreign_key("users", "id"))
                .with_column(Column::new("code", "TEXT").unique()),
        );
        let sql = to_sql(&schema);
        assert!(sql.contains("CREATE TABLE orders ("));
        assert!(sql.contains("id INT PRIMARY KEY"));
        assert!(sql.contains("user_id INT NOT NULL REFERENCES users(id)"));
        assert!(sql.contains("code TEXT UNIQUE"));
        assert!(!sql.starts_with("--"));
    }

    #[test]
    fn test_composite_key_output() {
        let schema = DatabaseSchema::new(SchemaFormat::Sql, "shop").with_table(
            Table::new("memberships")
                .with_column(Column::new("user_id", "INT").primary_key())
                .with_column(Column::new("group_id", "INT").primary_key()),
        );
        let sql = to_sql(&schema);
        assert!(sql.starts_with("-- shop"));
        assert!(sql.contains("PRIMARY KEY (user_id, group_id)"));
        assert!(sql.contains("user_id INT NOT NULL"));
    }

    #[test]
    fn test_view_output() {
        let schema = DatabaseSchema::new(SchemaFormat::Sql, "shop")
            .with_table(Table::new("users").with_column(Column::new("email", "TEXT")))
            .with_table(
                Table::view("contacts")
                    .with_column(Column::new("email", "TEXT").with_lineage("users", "email"))
                    .with_column(Column::new("total", "unknown")),
            );
        let sql = to_sql(&schema);
        assert!(sql.contains("CREATE VIEW contacts AS"));
        assert!(sql.contains("users.email AS email"));
        assert!(sql.contains("NULL AS total"));
        assert!(sql.contains("FROM users;"));
    }
}
