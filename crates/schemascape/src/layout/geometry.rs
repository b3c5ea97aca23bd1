//! Shared geometry helpers for the layout algorithms

use std::f64::consts::TAU;

use tracing::{trace, warn};
use unicode_width::UnicodeWidthStr;

use crate::core::{DatabaseSchema, Position, Table, ViewMode};

/// Smallest footprint a table is given, in layout units
const MIN_FOOTPRINT: f64 = 4.0;

/// Layout units per terminal column of label text
const UNITS_PER_CHAR: f64 = 0.4;

/// Foreign-key edges as `(child, parent)` table indices
///
/// Self references are skipped and repeated edges appear once, in column
/// declaration order.
pub fn edge_indices(schema: &DatabaseSchema) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for (child, table) in schema.tables.iter().enumerate() {
        for reference in table.columns.iter().filter_map(|c| c.references.as_ref()) {
            let Some(parent) = schema.table_index(&reference.table) else {
                continue;
            };
            if parent != child && !edges.contains(&(child, parent)) {
                edges.push((child, parent));
            }
        }
    }
    edges
}

/// Approximate rendered width of a table card
pub fn footprint(table: &Table) -> f64 {
    let widest = table
        .columns
        .iter()
        .map(|c| UnicodeWidthStr::width(c.name.as_str()) + 1 + UnicodeWidthStr::width(c.data_type.as_str()))
        .chain(std::iter::once(UnicodeWidthStr::width(table.name.as_str())))
        .max()
        .unwrap_or(0);
    (widest as f64 * UNITS_PER_CHAR).max(MIN_FOOTPRINT)
}

/// Point `index` of `count` evenly spaced on a flat circle
pub fn circle_point(index: usize, count: usize, radius: f64) -> Position {
    let angle = TAU * index as f64 / count.max(1) as f64;
    Position::new(radius * angle.cos(), 0.0, radius * angle.sin())
}

/// Shift positions so their centroid sits at the origin
pub fn center(positions: &mut [Position]) {
    if positions.is_empty() {
        return;
    }
    let n = positions.len() as f64;
    let (sx, sy, sz) = positions
        .iter()
        .fold((0.0, 0.0, 0.0), |(x, y, z), p| (x + p.x, y + p.y, z + p.z));
    for p in positions.iter_mut() {
        p.x -= sx / n;
        p.y -= sy / n;
        p.z -= sz / n;
    }
}

/// Enforce the guarantees every algorithm shares
///
/// Missing or non-finite positions are replaced by points on a fallback
/// circle, 2D pins `y` to exactly zero, and coincident positions are pushed
/// apart along `x`.
pub fn finalize(
    mut positions: Vec<Position>,
    count: usize,
    mode: ViewMode,
    spacing: f64,
) -> Vec<Position> {
    let radius = (spacing * count as f64 / TAU).max(spacing);
    positions.resize(count, Position::new(f64::NAN, f64::NAN, f64::NAN));

    for (i, position) in positions.iter_mut().enumerate() {
        if !position.is_finite() {
            warn!(table_index = i, "Non-finite layout position, using fallback");
            *position = circle_point(i, count, radius);
        }
        if mode.is_flat() {
            position.y = 0.0;
        }
    }

    let step = spacing / 2.0;
    for i in 1..positions.len() {
        let mut attempt = 1.0;
        while positions[..i].contains(&positions[i]) && attempt <= count as f64 + 1.0 {
            trace!(table_index = i, "Separating coincident tables");
            positions[i].x += step * attempt;
            attempt += 1.0;
        }
    }
    positions
}
