//! Structural schema comparison
//!
//! Two schemas are equal when they describe the same tables and columns.
//! Positions, colors, categories, nullability and ordering do not count.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{name_key, Column, DatabaseSchema, Table};

/// The structural facts of one column, normalized for comparison
#[derive(Debug, PartialEq, Eq)]
struct ColumnShape<'a> {
    data_type: &'a str,
    is_primary_key: bool,
    is_foreign_key: bool,
    is_unique: bool,
    references: Option<(String, String)>,
}

impl<'a> From<&'a Column> for ColumnShape<'a> {
    fn from(column: &'a Column) -> Self {
        Self {
            data_type: column.data_type.trim(),
            is_primary_key: column.is_primary_key,
            is_foreign_key: column.is_foreign_key,
            is_unique: column.is_unique,
            references: column
                .references
                .as_ref()
                .map(|r| (name_key(&r.table), name_key(&r.column))),
        }
    }
}

fn shape(table: &Table) -> BTreeMap<String, ColumnShape<'_>> {
    table
        .columns
        .iter()
        .map(|c| (name_key(&c.name), ColumnShape::from(c)))
        .collect()
}

fn tables_by_name(schema: &DatabaseSchema) -> BTreeMap<String, &Table> {
    schema.tables.iter().map(|t| (name_key(&t.name), t)).collect()
}

fn tables_equal(a: &Table, b: &Table) -> bool {
    shape(a) == shape(b)
}

/// True when both schemas have the same tables with the same column structure
pub fn are_schemas_equal(a: &DatabaseSchema, b: &DatabaseSchema) -> bool {
    let (left, right) = (tables_by_name(a), tables_by_name(b));
    if left.len() != right.len() {
        return false;
    }
    left.iter().all(|(name, table)| {
        right
            .get(name)
            .is_some_and(|other| tables_equal(table, other))
    })
}

/// Table-level differences between two schemas, by lowercase name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub changed: Vec<String>,
}

impl SchemaDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// List tables added, removed, or structurally changed going from `old` to `new`
///
/// Names are reported as written in whichever schema has the table.
pub fn diff_schemas(old: &DatabaseSchema, new: &DatabaseSchema) -> SchemaDiff {
    let (before, after) = (tables_by_name(old), tables_by_name(new));
    let mut diff = SchemaDiff::default();

    for (key, table) in &after {
        match before.get(key) {
            None => diff.added.push(table.name.clone()),
            Some(previous) if !tables_equal(previous, table) => {
                diff.changed.push(table.name.clone())
            }
            Some(_) => {}
        }
    }
    for (key, table) in &before {
        if !after.contains_key(key) {
            diff.removed.push(table.name.clone());
        }
    }

    trace!(
        added = diff.added.len(),
        removed = diff.removed.len(),
        changed = diff.changed.len(),
        "Compared schemas"
    );
    diff
}

/// Positions must be recomputed when the set of tables or the edges between
/// them changed; a column edit that leaves references alone only needs the
/// old positions carried over.
pub fn needs_relayout(old: &DatabaseSchema, new: &DatabaseSchema) -> bool {
    let diff = diff_schemas(old, new);
    if !diff.added.is_empty() || !diff.removed.is_empty() {
        return true;
    }
    let edges = |schema: &DatabaseSchema| {
        let mut edges: Vec<(String, String)> = schema
            .tables
            .iter()
            .flat_map(|t| {
                t.columns.iter().filter_map(move |c| {
                    c.references
                        .as_ref()
                        .map(|r| (name_key(&t.name), name_key(&r.table)))
                })
            })
            .collect();
        edges.sort();
        edges.dedup();
        edges
    };
    edges(old) != edges(new)
}
