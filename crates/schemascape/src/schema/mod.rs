//! Schema semantics on top of the parsed model
//!
//! Normalization, relationship derivation, cardinality, categories and
//! structural comparison. Everything here is a pure function over schema
//! values; nothing mutates a schema it was handed.

pub mod cardinality;
pub mod category;
pub mod compare;
pub mod naming;
pub mod normalizer;
pub mod relationships;

pub use cardinality::{
    calculate_cardinality, parse_cardinality, ColumnFacts, ParsedCardinality, Participation,
};
pub use category::{assign_colors, classify, set_table_category, PALETTE};
pub use compare::{are_schemas_equal, diff_schemas, needs_relayout, SchemaDiff};
pub use normalizer::normalize;
pub use relationships::{relationships, Relationship};
