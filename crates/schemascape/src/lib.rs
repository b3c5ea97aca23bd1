//! Schemascape - database schema parsing and spatial layout
//!
//! Reads SQL DDL or Mermaid `erDiagram` text into one schema model, derives
//! relationship cardinalities, and positions every table in 2D or 3D for a
//! rendering layer to draw.
//!
//! # Quick Start
//!
//! ```rust
//! use schemascape::{apply_layout_to_schema, parse_schema, LayoutKind, ViewMode};
//!
//! let sql = "CREATE TABLE users (id INT PRIMARY KEY);
//!            CREATE TABLE posts (id INT PRIMARY KEY, user_id INT NOT NULL REFERENCES users(id));";
//! let schema = parse_schema(sql, None).unwrap();
//! let placed = apply_layout_to_schema(&schema, LayoutKind::Hierarchical, ViewMode::TwoD);
//! assert!(placed.tables.iter().all(|t| t.position.y == 0.0));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use schemascape::prelude::*;
//!
//! let parser = MermaidParser::new();
//! let mut database = SchemaDatabase::new(SchemaFormat::Mermaid);
//! parser.parse("erDiagram\n    CUSTOMER ||--o{ ORDER : places", &mut database).unwrap();
//! assert_eq!(database.table_count(), 2);
//!
//! let schema = normalize(database).unwrap();
//! let edges = relationships(&schema);
//! assert_eq!(edges[0].cardinality, "1:0..N");
//! ```

pub mod core;
pub mod layout;
pub mod plugins;
pub mod schema;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;
pub use layout::LayoutConfig;
pub use plugins::{to_mermaid, to_sql};
pub use schema::{
    are_schemas_equal, calculate_cardinality, parse_cardinality, relationships,
    set_table_category, ColumnFacts, ParsedCardinality, Relationship,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Column, ColumnReference, Database, DatabaseSchema, Detector, LayoutAlgorithm, LayoutKind,
        Parser, Position, SchemaDatabase, SchemaError, SchemaFormat, Table, ViewMode,
    };
    pub use crate::layout::{
        CircularLayout, ForceDirectedLayout, HierarchicalLayout, LayoutConfig,
    };
    pub use crate::plugins::{
        MermaidDetector, MermaidParser, Orchestrator, SqlDetector, SqlParser,
    };
    pub use crate::schema::{normalize, relationships};
}

/// Parse schema text, detecting the format unless a hint is given
///
/// Returns `None` when the text yields no tables; the reason is logged.
/// Use [`try_parse_schema`] to get it as a value.
///
/// # Example
/// ```rust
/// use schemascape::{parse_schema, SchemaFormat};
///
/// let schema = parse_schema("erDiagram\n    CAR ||--o{ DRIVER : allows", None).unwrap();
/// assert_eq!(schema.format, SchemaFormat::Mermaid);
/// assert!(parse_schema("not a schema", None).is_none());
/// ```
pub fn parse_schema(text: &str, format_hint: Option<SchemaFormat>) -> Option<DatabaseSchema> {
    match try_parse_schema(text, format_hint) {
        Ok(schema) => Some(schema),
        Err(error) => {
            tracing::warn!(%error, "Schema parse failed");
            None
        }
    }
}

/// Parse schema text, reporting why nothing was produced
pub fn try_parse_schema(
    text: &str,
    format_hint: Option<SchemaFormat>,
) -> Result<DatabaseSchema, SchemaError> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::with_default_detectors()
        .process(text, format_hint)
        .map_err(|error| match error.downcast::<SchemaError>() {
            Ok(schema_error) => schema_error,
            Err(other) => SchemaError::parse_error(other.to_string(), 0, 0),
        })
}

/// Return a copy of the schema with every table positioned
pub fn apply_layout_to_schema(
    schema: &DatabaseSchema,
    layout: LayoutKind,
    view_mode: ViewMode,
) -> DatabaseSchema {
    layout::apply_layout(schema, layout, view_mode)
}

/// [`apply_layout_to_schema`] with explicit tuning
pub fn apply_layout_to_schema_with_config(
    schema: &DatabaseSchema,
    layout: LayoutKind,
    view_mode: ViewMode,
    config: &LayoutConfig,
) -> DatabaseSchema {
    layout::apply_layout_with_config(schema, layout, view_mode, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQL: &str = "CREATE TABLE users (id INT PRIMARY KEY, email TEXT UNIQUE);
        CREATE TABLE orders (id INT PRIMARY KEY, user_id INT NOT NULL REFERENCES users(id));";

    #[test]
    fn test_parse_schema_sql() {
        let schema = parse_schema(SQL, None).unwrap();
        assert_eq!(schema.format, SchemaFormat::Sql);
        assert_eq!(schema.table_count(), 2);
    }

    #[test]
    fn test_hint_overrides_detection() {
        assert!(parse_schema(SQL, Some(SchemaFormat::Mermaid)).is_none());
    }

    #[test]
    fn test_try_parse_schema_errors() {
        assert!(matches!(
            try_parse_schema("hello", None),
            Err(SchemaError::UnknownFormat)
        ));
        assert!(matches!(
            try_parse_schema("", Some(SchemaFormat::Sql)),
            Err(SchemaError::NoTables { .. })
        ));
    }

    #[test]
    fn test_layout_all_kinds() {
        let schema = parse_schema(SQL, None).unwrap();
        for kind in [LayoutKind::ForceDirected, LayoutKind::Hierarchical, LayoutKind::Circular] {
            let placed = apply_layout_to_schema(&schema, kind, ViewMode::ThreeD);
            assert_eq!(placed.table_count(), 2);
            assert_ne!(placed.tables[0].position, placed.tables[1].position);
        }
    }

    #[test]
    fn test_relationships_from_sql() {
        let schema = parse_schema(SQL, None).unwrap();
        let rels = relationships(&schema);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].cardinality, "1:1..N");
    }
}
