//! Layered layout along foreign-key depth
//!
//! Tables that reference nothing sit in layer 0; every other table sits one
//! layer below the deepest table it references. Layers run along `z`, tables
//! within a layer spread along `x` in declaration order.

use tracing::{debug, span, trace, Level};

use super::geometry::{edge_indices, footprint};
use super::LayoutConfig;
use crate::core::{DatabaseSchema, LayoutAlgorithm, LayoutKind, Position, ViewMode};

pub struct HierarchicalLayout {
    config: LayoutConfig,
}

impl HierarchicalLayout {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }
}

impl Default for HierarchicalLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth of each table; edges back into the current path are ignored so
/// cycles terminate, and no depth exceeds `n - 1`
pub fn assign_layers(count: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut parents: Vec<Vec<usize>> = vec![Vec::new(); count];
    for &(child, parent) in edges {
        parents[child].push(parent);
    }

    fn depth(
        node: usize,
        parents: &[Vec<usize>],
        layers: &mut [Option<usize>],
        visiting: &mut [bool],
    ) -> usize {
        if let Some(layer) = layers[node] {
            return layer;
        }
        visiting[node] = true;
        let mut layer = 0;
        for &parent in &parents[node] {
            if visiting[parent] {
                trace!(node, parent, "Breaking reference cycle");
                continue;
            }
            layer = layer.max(depth(parent, parents, layers, visiting) + 1);
        }
        visiting[node] = false;
        let layer = layer.min(parents.len().saturating_sub(1));
        layers[node] = Some(layer);
        layer
    }

    let mut layers = vec![None; count];
    let mut visiting = vec![false; count];
    (0..count)
        .map(|node| depth(node, &parents, &mut layers, &mut visiting))
        .collect()
}

impl LayoutAlgorithm for HierarchicalLayout {
    fn layout(&self, schema: &DatabaseSchema, view_mode: ViewMode) -> Vec<Position> {
        let n = schema.table_count();
        let layout_span = span!(Level::DEBUG, "hierarchical", tables = n);
        let _enter = layout_span.enter();

        let layers = assign_layers(n, &edge_indices(schema));
        let max_layer = layers.iter().copied().max().unwrap_or(0);
        let mut grouped: Vec<Vec<usize>> = vec![Vec::new(); max_layer + 1];
        for (table, &layer) in layers.iter().enumerate() {
            grouped[layer].push(table);
        }
        debug!(layer_count = grouped.len(), "Assigned tables to layers");

        let gap = self.config.unit() / 2.0;
        let mut positions = vec![Position::ORIGIN; n];
        for (layer, members) in grouped.iter().enumerate() {
            let widths: Vec<f64> = members
                .iter()
                .map(|&t| footprint(&schema.tables[t]))
                .collect();
            let total: f64 = widths.iter().sum::<f64>() + gap * widths.len().saturating_sub(1) as f64;

            let z = (layer as f64 - max_layer as f64 / 2.0) * self.config.layer_spacing;
            let y = if view_mode.is_flat() {
                0.0
            } else {
                -(layer as f64) * self.config.vertical_spread / 2.0
            };

            let mut cursor = -total / 2.0;
            for (&table, width) in members.iter().zip(&widths) {
                positions[table] = Position::new(cursor + width / 2.0, y, z);
                cursor += width + gap;
            }
        }
        positions
    }

    fn name(&self) -> &'static str {
        "hierarchical"
    }

    fn kind(&self) -> LayoutKind {
        LayoutKind::Hierarchical
    }
}
