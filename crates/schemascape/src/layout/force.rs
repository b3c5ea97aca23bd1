//! Force-directed layout (Fruchterman–Reingold)
//!
//! Tables repel each other, foreign keys pull their ends together, and a
//! weak gravity keeps disconnected components near the origin. The start is
//! a sunflower spiral rather than random noise, so the result depends only
//! on the schema and the configuration.

use tracing::{debug, span, trace, Level};

use super::geometry::{center, edge_indices};
use super::LayoutConfig;
use crate::core::{DatabaseSchema, LayoutAlgorithm, LayoutKind, Position, ViewMode};

/// Golden angle in radians
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Fractional part of the golden ratio
const GOLDEN_FRACTION: f64 = 0.618_033_988_749_895;

/// Below this distance two tables are treated as touching
const MIN_DISTANCE: f64 = 0.01;

pub struct ForceDirectedLayout {
    config: LayoutConfig,
}

impl ForceDirectedLayout {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    fn initial_positions(&self, count: usize, mode: ViewMode) -> Vec<[f64; 3]> {
        let k = self.config.unit();
        (0..count)
            .map(|i| {
                let radius = k * (i as f64 + 0.5).sqrt();
                let angle = i as f64 * GOLDEN_ANGLE;
                let y = if mode.is_flat() {
                    0.0
                } else {
                    ((i as f64 * GOLDEN_FRACTION).fract() - 0.5) * 2.0 * self.config.vertical_spread
                };
                [radius * angle.cos(), y, radius * angle.sin()]
            })
            .collect()
    }
}

impl Default for ForceDirectedLayout {
    fn default() -> Self {
        Self::new()
    }
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn length(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn add_scaled(target: &mut [f64; 3], v: [f64; 3], scale: f64) {
    for axis in 0..3 {
        target[axis] += v[axis] * scale;
    }
}

impl LayoutAlgorithm for ForceDirectedLayout {
    fn layout(&self, schema: &DatabaseSchema, view_mode: ViewMode) -> Vec<Position> {
        let n = schema.table_count();
        let layout_span = span!(Level::DEBUG, "force_directed", tables = n);
        let _enter = layout_span.enter();

        if n <= 1 {
            return vec![Position::ORIGIN; n];
        }

        let k = self.config.unit();
        let edges = edge_indices(schema);
        let mut positions = self.initial_positions(n, view_mode);
        let initial_temperature = k * (n as f64).sqrt();
        let iterations = self.config.max_iterations;

        for iteration in 0..iterations {
            let mut displacement = vec![[0.0_f64; 3]; n];

            for i in 0..n {
                for j in (i + 1)..n {
                    let delta = sub(positions[i], positions[j]);
                    let distance = length(delta).max(MIN_DISTANCE);
                    let force = self.config.repulsion * k * k / distance;
                    add_scaled(&mut displacement[i], delta, force / distance);
                    add_scaled(&mut displacement[j], delta, -force / distance);
                }
            }

            for &(child, parent) in &edges {
                let delta = sub(positions[child], positions[parent]);
                let distance = length(delta).max(MIN_DISTANCE);
                let force = self.config.attraction * distance * distance / k;
                add_scaled(&mut displacement[child], delta, -force / distance);
                add_scaled(&mut displacement[parent], delta, force / distance);
            }

            for (d, p) in displacement.iter_mut().zip(&positions) {
                add_scaled(d, *p, -self.config.gravity);
                if view_mode.is_flat() {
                    d[1] = 0.0;
                }
            }

            let temperature =
                initial_temperature * (1.0 - iteration as f64 / iterations as f64);
            let mut largest_move: f64 = 0.0;
            for (p, d) in positions.iter_mut().zip(&displacement) {
                let magnitude = length(*d);
                if magnitude > 0.0 && magnitude.is_finite() {
                    let step = magnitude.min(temperature);
                    add_scaled(p, *d, step / magnitude);
                    largest_move = largest_move.max(step);
                }
            }

            trace!(iteration, largest_move, temperature, "Force iteration");
            if largest_move < self.config.convergence_threshold {
                debug!(iteration, "Force layout converged");
                break;
            }
        }

        let mut result: Vec<Position> = positions
            .into_iter()
            .map(|[x, y, z]| Position::new(x, y, z))
            .collect();
        center(&mut result);
        result
    }

    fn name(&self) -> &'static str {
        "force-directed"
    }

    fn kind(&self) -> LayoutKind {
        LayoutKind::ForceDirected
    }
}
