//! Circular layout
//!
//! Tables sit on a ring in declaration order. In 3D the ring becomes a
//! gentle helix centred on `y = 0`.

use std::f64::consts::TAU;

use tracing::{debug, span, Level};

use super::geometry::{circle_point, footprint};
use super::LayoutConfig;
use crate::core::{DatabaseSchema, LayoutAlgorithm, LayoutKind, Position, ViewMode};

pub struct CircularLayout {
    config: LayoutConfig,
}

impl CircularLayout {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Ring radius: grows with table count and never lets wide cards overlap
    pub fn radius(&self, schema: &DatabaseSchema) -> f64 {
        let spacing = self.config.unit();
        let n = schema.table_count() as f64;
        let perimeter: f64 = schema.tables.iter().map(footprint).sum::<f64>() + spacing * n / 2.0;
        (spacing * n / TAU).max(spacing).max(perimeter / TAU)
    }
}

impl Default for CircularLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAlgorithm for CircularLayout {
    fn layout(&self, schema: &DatabaseSchema, view_mode: ViewMode) -> Vec<Position> {
        let n = schema.table_count();
        let layout_span = span!(Level::DEBUG, "circular", tables = n);
        let _enter = layout_span.enter();

        if n <= 1 {
            return vec![Position::ORIGIN; n];
        }

        let radius = self.radius(schema);
        debug!(radius, "Circular radius");
        let middle = (n as f64 - 1.0) / 2.0;
        (0..n)
            .map(|i| {
                let mut position = circle_point(i, n, radius);
                if !view_mode.is_flat() {
                    position.y = (i as f64 - middle) * self.config.helix_step;
                }
                position
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "circular"
    }

    fn kind(&self) -> LayoutKind {
        LayoutKind::Circular
    }
}
