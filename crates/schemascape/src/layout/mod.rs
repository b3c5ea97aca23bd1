//! Table placement
//!
//! Three algorithms share one contract: every table gets a finite position,
//! no two tables share one, `2D` pins the vertical axis to zero, and the
//! same schema always produces the same positions.

mod circular;
mod force;
mod geometry;
mod hierarchical;

use tracing::{debug, info, span, Level};

use crate::core::{DatabaseSchema, LayoutAlgorithm, LayoutKind, ViewMode};

pub use circular::CircularLayout;
pub use force::ForceDirectedLayout;
pub use geometry::{edge_indices, footprint};
pub use hierarchical::HierarchicalLayout;

/// Layout configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Ideal distance between neighbouring tables
    pub spacing: f64,
    /// Upper bound on force-directed iterations
    pub max_iterations: usize,
    /// Force-directed stops once no table moves further than this
    pub convergence_threshold: f64,
    pub repulsion: f64,
    pub attraction: f64,
    /// Pull toward the origin, keeps disconnected groups from drifting apart
    pub gravity: f64,
    /// Vertical range used in 3D
    pub vertical_spread: f64,
    /// Vertical step between consecutive tables on the circular helix
    pub helix_step: f64,
    /// Depth between hierarchical layers
    pub layer_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 14.0,
            max_iterations: 300,
            convergence_threshold: 0.01,
            repulsion: 1.0,
            attraction: 1.0,
            gravity: 0.05,
            vertical_spread: 6.0,
            helix_step: 2.0,
            layer_spacing: 18.0,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    pub fn with_vertical_spread(mut self, spread: f64) -> Self {
        self.vertical_spread = spread;
        self
    }

    pub fn with_layer_spacing(mut self, layer_spacing: f64) -> Self {
        self.layer_spacing = layer_spacing;
        self
    }

    /// Spacing usable as a divisor; bad values fall back to the default
    pub(crate) fn unit(&self) -> f64 {
        if self.spacing.is_finite() && self.spacing > 0.0 {
            self.spacing
        } else {
            Self::default().spacing
        }
    }
}

/// Build the algorithm for a layout kind
pub fn algorithm_for(kind: LayoutKind, config: LayoutConfig) -> Box<dyn LayoutAlgorithm> {
    match kind {
        LayoutKind::ForceDirected => Box::new(ForceDirectedLayout::with_config(config)),
        LayoutKind::Hierarchical => Box::new(HierarchicalLayout::with_config(config)),
        LayoutKind::Circular => Box::new(CircularLayout::with_config(config)),
    }
}

/// Lay out a schema with the default configuration
pub fn apply_layout(schema: &DatabaseSchema, kind: LayoutKind, mode: ViewMode) -> DatabaseSchema {
    apply_layout_with_config(schema, kind, mode, &LayoutConfig::default())
}

/// Return a copy of `schema` with every table positioned
pub fn apply_layout_with_config(
    schema: &DatabaseSchema,
    kind: LayoutKind,
    mode: ViewMode,
    config: &LayoutConfig,
) -> DatabaseSchema {
    let layout_span = span!(
        Level::INFO,
        "apply_layout",
        algorithm = %kind,
        view_mode = %mode,
        tables = schema.table_count()
    );
    let _enter = layout_span.enter();

    let mut laid_out = schema.clone();
    if schema.is_empty() {
        debug!("Empty schema, nothing to place");
        return laid_out;
    }

    let algorithm = algorithm_for(kind, config.clone());
    let raw = algorithm.layout(schema, mode);
    let positions = geometry::finalize(raw, schema.table_count(), mode, config.unit());

    for (table, position) in laid_out.tables.iter_mut().zip(positions) {
        table.position = position;
    }
    info!(algorithm = algorithm.name(), "Layout complete");
    laid_out
}
