//! Input format plugins
//!
//! Each format implements the core [`Detector`](crate::core::Detector) and
//! [`Parser`](crate::core::Parser) traits and ships a serializer back to its
//! own syntax.

pub mod mermaid;
pub mod orchestrator;
pub mod sql;

pub use mermaid::{to_mermaid, MermaidDetector, MermaidParser};
pub use orchestrator::*;
pub use sql::{to_sql, SqlDetector, SqlParser};
