//! Mermaid ER diagram serializer
//!
//! Emits entity blocks followed by one relationship line per foreign key,
//! written parent first. The relationship label is the foreign-key column so
//! [`MermaidParser`](super::MermaidParser) binds it back to the same column.

use std::fmt::Write;

use crate::core::{DatabaseSchema, Table, DEFAULT_SCHEMA_NAME, UNKNOWN_TYPE};
use crate::schema::{parse_cardinality, relationships};

/// Join the pieces of a type or column name that attribute syntax cannot hold
fn underscored(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || matches!(c, ',' | '"' | '{' | '}'))
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

fn entity_name(name: &str) -> String {
    if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', ""))
    }
}

fn left_token(notation: &str) -> &'static str {
    match notation {
        "1" => "||",
        "0..1" => "|o",
        "1..N" => "}|",
        _ => "}o",
    }
}

fn right_token(notation: &str) -> &'static str {
    match notation {
        "1" => "||",
        "0..1" => "o|",
        "1..N" => "|{",
        _ => "o{",
    }
}

fn write_entity(out: &mut String, table: &Table) {
    if table.columns.is_empty() {
        let _ = writeln!(out, "    {}", entity_name(&table.name));
        return;
    }
    let _ = writeln!(out, "    {} {{", entity_name(&table.name));
    for column in &table.columns {
        let data_type = match underscored(&column.data_type) {
            t if t.is_empty() => UNKNOWN_TYPE.to_string(),
            t => t,
        };
        let mut keys = Vec::new();
        if column.is_primary_key {
            keys.push("PK");
        }
        if column.is_foreign_key {
            keys.push("FK");
        }
        if column.is_unique {
            keys.push("UK");
        }
        let _ = write!(out, "        {} {}", data_type, underscored(&column.name));
        if !keys.is_empty() {
            let _ = write!(out, " {}", keys.join(", "));
        }
        out.push('\n');
    }
    let _ = writeln!(out, "    }}");
}

/// Serialize a schema to a Mermaid `erDiagram`
pub fn to_mermaid(schema: &DatabaseSchema) -> String {
    let mut out = String::new();
    if schema.name != DEFAULT_SCHEMA_NAME {
        let _ = writeln!(out, "---\ntitle: {}\n---", schema.name);
    }
    out.push_str("erDiagram\n");

    for table in &schema.tables {
        write_entity(&mut out, table);
    }
    for relationship in relationships(schema) {
        let parsed = parse_cardinality(&relationship.cardinality);
        let _ = writeln!(
            out,
            "    {} {}--{} {} : {}",
            entity_name(&relationship.to_table),
            left_token(&parsed.left),
            right_token(&parsed.right),
            entity_name(&relationship.from_table),
            underscored(&relationship.fk_column)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, SchemaFormat};

    fn shop() -> DatabaseSchema {
        DatabaseSchema::new(SchemaFormat::Mermaid, "Shop")
            .with_table(Table::new("CUSTOMER").with_column(Column::new("id", "int").primary_key()))
            .with_table(
                Table::new("ORDER").with_column(
                    Column::new("customer_id", "int")
                        .not_null()
                        .foreign_key("CUSTOMER", "id"),
                ),
            )
    }

    #[test]
    fn test_entities_and_title() {
        let text = to_mermaid(&shop());
        assert!(text.starts_with("---\ntitle: Shop\n---\nerDiagram\n"));
        assert!(text.contains("    CUSTOMER {\n        int id PK\n    }"));
        assert!(text.contains("int customer_id FK"));
    }

    #[test]
    fn test_relationship_line_is_parent_first() {
        let text = to_mermaid(&shop());
        assert!(text.contains("    CUSTOMER ||--|{ ORDER : customer_id"));
    }

    #[test]
    fn test_names_and_types_are_sanitized() {
        let schema = DatabaseSchema::new(SchemaFormat::Sql, DEFAULT_SCHEMA_NAME).with_table(
            Table::new("Line Items")
                .with_column(Column::new("unit price", "DECIMAL(10, 2)"))
                .with_column(Column::new("note", "")),
        );
        let text = to_mermaid(&schema);
        assert!(text.starts_with("erDiagram\n"));
        assert!(text.contains("\"Line Items\" {"));
        assert!(text.contains("DECIMAL(10_2) unit_price"));
        assert!(text.contains("unknown note"));
    }

    #[test]
    fn test_cardinality_tokens() {
        assert_eq!(left_token("0..1"), "|o");
        assert_eq!(left_token("N"), "}o");
        assert_eq!(right_token("0..N"), "o{");
        assert_eq!(right_token("1"), "||");
    }
}
