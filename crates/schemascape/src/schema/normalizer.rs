//! Turns parser declarations into the canonical [`DatabaseSchema`]
//!
//! Resolution happens in a fixed order:
//!
//! 1. declared foreign keys are bound to their targets, case-insensitively,
//!    and unresolvable ones are dropped with a warning
//! 2. columns flagged as foreign keys without a declared target are bound by
//!    naming convention (`customer_id` → `customers.id`) or lose the flag
//! 3. view columns are resolved against base tables, following lineage
//!    through views that select from other views
//! 4. categories are classified and colors assigned

use tracing::{debug, info, span, trace, warn, Level};

use super::category::{assign_colors, classify};
use super::naming::singular;
use crate::core::{
    name_key, names_match, Column, ColumnReference, DatabaseSchema, ForeignKeyDecl,
    SchemaDatabase, SchemaError, SelectItem, Table, ViewSource, DEFAULT_SCHEMA_NAME,
    UNKNOWN_TYPE,
};

/// Resolve a parsed database into a schema
///
/// Fails only when nothing was declared.
pub fn normalize(database: SchemaDatabase) -> Result<DatabaseSchema, SchemaError> {
    let normalize_span = span!(Level::INFO, "normalize", format = %database.format());
    let _enter = normalize_span.enter();

    let (format, name, decls, foreign_keys) = database.into_parts();
    if decls.is_empty() {
        warn!(%format, "No tables declared");
        return Err(SchemaError::no_tables(format));
    }

    let mut views = Vec::with_capacity(decls.len());
    let mut tables = Vec::with_capacity(decls.len());
    for decl in decls {
        let mut table = if decl.is_view() {
            Table::view(decl.name)
        } else {
            Table::new(decl.name)
        };
        table.columns = decl.columns;
        views.push(decl.view);
        tables.push(table);
    }

    bind_foreign_keys(&mut tables, &foreign_keys);
    bind_flagged_columns(&mut tables);
    resolve_views(&mut tables, &views);

    for table in &mut tables {
        table.category = classify(&table.name).to_string();
    }
    assign_colors(&mut tables);

    let schema = DatabaseSchema {
        format,
        name: name.unwrap_or_else(|| DEFAULT_SCHEMA_NAME.to_string()),
        tables,
    };
    info!(
        tables = schema.table_count(),
        views = schema.tables.iter().filter(|t| t.is_view).count(),
        "Normalized schema"
    );
    Ok(schema)
}

/// The target column of a reference: the named column, or the first
/// primary-key column when none is named
fn target_column<'a>(target: &'a Table, column: Option<&str>) -> Option<&'a Column> {
    match column {
        Some(name) => target.column(name),
        None => target.primary_key_columns().next(),
    }
}

fn bind_foreign_keys(tables: &mut [Table], foreign_keys: &[ForeignKeyDecl]) {
    for fk in foreign_keys {
        let reference = tables
            .iter()
            .find(|t| t.name_matches(&fk.ref_table))
            .and_then(|target| {
                target_column(target, fk.ref_column.as_deref())
                    .map(|column| ColumnReference::new(&target.name, &column.name))
            });
        let column = tables
            .iter_mut()
            .find(|t| t.name_matches(&fk.table))
            .and_then(|t| t.column_mut(&fk.column));

        match (column, reference) {
            (Some(column), Some(mut reference)) => {
                reference.cardinality = fk.cardinality.clone();
                trace!(
                    table = %fk.table,
                    column = %column.name,
                    target = %reference.table,
                    target_column = %reference.column,
                    "Bound foreign key"
                );
                column.is_foreign_key = true;
                column.references = Some(reference);
            }
            _ => {
                let error = SchemaError::unresolved_reference(
                    &fk.table,
                    &fk.column,
                    &fk.ref_table,
                    fk.ref_column.as_deref().unwrap_or("<primary key>"),
                );
                warn!(%error, "Dropping foreign key");
            }
        }
    }
}

/// `customer_id` / `customerId` → `customer`
fn reference_stem(column: &str) -> Option<String> {
    let stem = match column.strip_suffix("Id").or_else(|| column.strip_suffix("ID")) {
        Some(stem) => stem.trim_end_matches('_').to_string(),
        None => {
            let lower = name_key(column);
            lower.strip_suffix("id")?.trim_end_matches('_').to_string()
        }
    };
    if stem.is_empty() {
        None
    } else {
        Some(singular(&name_key(&stem)))
    }
}

fn bind_flagged_columns(tables: &mut [Table]) {
    let mut bindings = Vec::new();
    for (t, table) in tables.iter().enumerate() {
        for (c, column) in table.columns.iter().enumerate() {
            if !column.is_foreign_key || column.references.is_some() {
                continue;
            }
            let reference = reference_stem(&column.name).and_then(|stem| {
                tables
                    .iter()
                    .filter(|candidate| singular(&name_key(&candidate.name)) == stem)
                    .find_map(|candidate| {
                        target_column(candidate, None)
                            .map(|pk| ColumnReference::new(&candidate.name, &pk.name))
                    })
            });
            bindings.push((t, c, reference));
        }
    }

    for (t, c, reference) in bindings {
        let table_name = tables[t].name.clone();
        let column = &mut tables[t].columns[c];
        match reference {
            Some(reference) => {
                debug!(
                    table = %table_name,
                    column = %column.name,
                    target = %reference.table,
                    "Inferred foreign key target from column name"
                );
                column.references = Some(reference);
            }
            None => {
                warn!(
                    table = %table_name,
                    column = %column.name,
                    "Foreign key has no resolvable target, clearing flag"
                );
                column.is_foreign_key = false;
            }
        }
    }
}

/// Copy of a source column as it appears in a view
fn passthrough(source_table: &Table, source: &Column, name: &str) -> Column {
    let mut column = Column::new(name, &source.data_type);
    match (&source.source_table, &source.source_column) {
        (Some(table), Some(origin)) if source_table.is_view => {
            column = column.with_lineage(table, origin);
        }
        _ if source_table.is_view => {}
        _ => column = column.with_lineage(&source_table.name, &source.name),
    }
    column
}

fn view_columns(tables: &[Table], view: &Table, source: &ViewSource) -> Vec<Column> {
    let from: Vec<&Table> = source
        .from
        .iter()
        .filter_map(|name| tables.iter().find(|t| t.name_matches(name)))
        .collect();
    let lookup = |qualifier: &str| tables.iter().find(|t| t.name_matches(qualifier));

    let mut columns = Vec::new();
    for item in &source.items {
        match item {
            SelectItem::Column {
                name,
                table,
                column,
            } => {
                let found = match table {
                    Some(qualifier) => lookup(qualifier)
                        .and_then(|t| t.column(column).map(|c| (t, c))),
                    None => from
                        .iter()
                        .find_map(|t| t.column(column).map(|c| (*t, c))),
                };
                match found {
                    Some((source_table, source_column)) => {
                        columns.push(passthrough(source_table, source_column, name))
                    }
                    None => {
                        debug!(view = %view.name, column = %column, "View column has no known source");
                        columns.push(Column::new(name, UNKNOWN_TYPE));
                    }
                }
            }
            SelectItem::Wildcard { table } => {
                let sources: Vec<&Table> = match table {
                    Some(qualifier) => lookup(qualifier).into_iter().collect(),
                    None => from.clone(),
                };
                if sources.is_empty() {
                    warn!(view = %view.name, "Wildcard over unknown table");
                }
                for source_table in sources {
                    for source_column in &source_table.columns {
                        columns.push(passthrough(source_table, source_column, &source_column.name));
                    }
                }
            }
            SelectItem::Expression { name } => columns.push(Column::new(name, UNKNOWN_TYPE)),
        }
    }

    for (column, name) in columns.iter_mut().zip(&source.column_names) {
        column.name = name.clone();
    }

    let mut unique: Vec<Column> = Vec::with_capacity(columns.len());
    for column in columns {
        if unique.iter().any(|c| names_match(&c.name, &column.name)) {
            warn!(view = %view.name, column = %column.name, "Duplicate view column, keeping first");
            continue;
        }
        unique.push(column);
    }
    unique
}

/// Resolve views whose sources are ready first, so lineage flows through
/// view-on-view definitions regardless of declaration order
fn resolve_views(tables: &mut [Table], views: &[Option<ViewSource>]) {
    let mut pending: Vec<usize> = views
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.as_ref().map(|_| i))
        .collect();

    while !pending.is_empty() {
        let ready = pending.iter().position(|&i| {
            views[i].as_ref().is_some_and(|source| {
                source.from.iter().all(|name| {
                    !pending
                        .iter()
                        .any(|&p| p != i && tables[p].name_matches(name))
                })
            })
        });
        // A cycle between views: resolve the earliest one with what is known
        let index = pending.remove(ready.unwrap_or(0));
        if let Some(source) = &views[index] {
            let columns = view_columns(tables, &tables[index], source);
            debug!(view = %tables[index].name, columns = columns.len(), "Resolved view");
            tables[index].columns = columns;
        }
    }
}
