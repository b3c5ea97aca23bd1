//! Core layout trait
//!
//! Layout algorithms assign one position per table. They never fail: every
//! schema, including one with cyclic references or no references at all,
//! gets a complete set of positions.

use super::{DatabaseSchema, LayoutKind, Position, ViewMode};

/// Positions the tables of a schema
pub trait LayoutAlgorithm: Send + Sync {
    /// Compute one position per table, in table order
    fn layout(&self, schema: &DatabaseSchema, view_mode: ViewMode) -> Vec<Position>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    fn kind(&self) -> LayoutKind;
}
