//! Core type definitions for schema processing
//!
//! This module contains the canonical schema model every input format is
//! normalized into: columns, tables, the schema itself, plus the small enums
//! that select input format, layout algorithm and view mode.
//!
//! Foreign-key edges are stored on the referencing [`Column`] only. There is
//! no separate edge list; see [`crate::schema::relationships`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category assigned to tables that match no classifier bucket
pub const DEFAULT_CATEGORY: &str = "General";

/// Name given to schemas whose source text does not name them
pub const DEFAULT_SCHEMA_NAME: &str = "Untitled Schema";

/// Column type recorded for view columns whose origin cannot be traced
pub const UNKNOWN_TYPE: &str = "unknown";

/// Case-insensitive identity key for table and column names
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Case-insensitive name comparison
pub fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || name_key(a) == name_key(b)
}

/// Input grammar a schema was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaFormat {
    /// SQL DDL (`CREATE TABLE` / `CREATE VIEW`)
    #[default]
    Sql,
    /// Mermaid `erDiagram`
    Mermaid,
}

impl SchemaFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["sql", "mermaid"]
    }
}

impl fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaFormat::Sql => write!(f, "sql"),
            SchemaFormat::Mermaid => write!(f, "mermaid"),
        }
    }
}

impl FromStr for SchemaFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sql" | "ddl" => Ok(SchemaFormat::Sql),
            "mermaid" | "mmd" | "erdiagram" => Ok(SchemaFormat::Mermaid),
            _ => Err(format!("Unknown schema format: {}", s)),
        }
    }
}

/// Target of a foreign-key column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReference {
    pub table: String,
    pub column: String,
    /// Cardinality notation carried over from the source syntax (Mermaid only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<String>,
}

impl ColumnReference {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            cardinality: None,
        }
    }

    pub fn with_cardinality(mut self, cardinality: impl Into<String>) -> Self {
        self.cardinality = Some(cardinality.into());
        self
    }

    /// True when both references point at the same table and column,
    /// ignoring case and carried cardinality
    pub fn same_target(&self, other: &ColumnReference) -> bool {
        names_match(&self.table, &other.table) && names_match(&self.column, &other.column)
    }
}

/// A table or view column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    /// Raw type string as written in the source
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_foreign_key: bool,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default = "default_nullable")]
    pub is_nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ColumnReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_column: Option<String>,
}

fn default_nullable() -> bool {
    true
}

impl Column {
    /// Create a nullable column with no key flags
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            is_primary_key: false,
            is_foreign_key: false,
            is_unique: false,
            is_nullable: true,
            references: None,
            source_table: None,
            source_column: None,
        }
    }

    /// Mark as primary key. Primary-key columns are never nullable.
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.is_nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.is_nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn foreign_key(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.is_foreign_key = true;
        self.references = Some(ColumnReference::new(table, column));
        self
    }

    pub fn with_lineage(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.source_table = Some(table.into());
        self.source_column = Some(column.into());
        self
    }

    pub fn has_lineage(&self) -> bool {
        self.source_table.is_some() && self.source_column.is_some()
    }

    pub fn name_matches(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// A point in layout space. `y` is the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// A table or view in the schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub color: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub is_view: bool,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            position: Position::ORIGIN,
            color: String::new(),
            category: default_category(),
            is_view: false,
        }
    }

    pub fn view(name: impl Into<String>) -> Self {
        Self {
            is_view: true,
            ..Self::new(name)
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Look up a column by case-insensitive name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name_matches(name))
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name_matches(name))
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }

    /// True when exactly one column forms the primary key
    pub fn has_single_primary_key(&self) -> bool {
        self.primary_key_columns().count() == 1
    }

    pub fn name_matches(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// The canonical schema model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSchema {
    pub format: SchemaFormat,
    pub name: String,
    pub tables: Vec<Table>,
}

impl DatabaseSchema {
    pub fn new(format: SchemaFormat, name: impl Into<String>) -> Self {
        Self {
            format,
            name: name.into(),
            tables: Vec::new(),
        }
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Look up a table by case-insensitive name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name_matches(name))
    }

    pub fn table_index(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.name_matches(name))
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.tables.iter().map(|t| t.position).collect()
    }
}

/// Whether a layout may spread tables vertically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Every table sits on the ground plane (`y == 0`)
    #[serde(rename = "2D")]
    TwoD,
    #[default]
    #[serde(rename = "3D")]
    ThreeD,
}

impl ViewMode {
    pub fn is_flat(&self) -> bool {
        matches!(self, ViewMode::TwoD)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::TwoD => write!(f, "2D"),
            ViewMode::ThreeD => write!(f, "3D"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "2d" => Ok(ViewMode::TwoD),
            "3d" => Ok(ViewMode::ThreeD),
            _ => Err(format!("Unknown view mode: {}", s)),
        }
    }
}

/// Layout algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutKind {
    #[default]
    #[serde(rename = "force")]
    ForceDirected,
    #[serde(rename = "hierarchical")]
    Hierarchical,
    #[serde(rename = "circular")]
    Circular,
}

impl LayoutKind {
    /// Get all valid layout names
    pub fn variants() -> &'static [&'static str] {
        &["force", "hierarchical", "circular"]
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::ForceDirected => write!(f, "force"),
            LayoutKind::Hierarchical => write!(f, "hierarchical"),
            LayoutKind::Circular => write!(f, "circular"),
        }
    }
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "force" | "force-directed" | "forcedirected" => Ok(LayoutKind::ForceDirected),
            "hierarchical" | "tree" => Ok(LayoutKind::Hierarchical),
            "circular" | "circle" => Ok(LayoutKind::Circular),
            _ => Err(format!("Unknown layout: {}", s)),
        }
    }
}
