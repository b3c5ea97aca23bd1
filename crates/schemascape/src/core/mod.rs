//! Core abstractions for schema processing
//!
//! The traits every input format plugs into, the canonical schema model, and
//! the ambient pieces (errors, logging, caching) shared by the pipeline.

mod cache;
pub mod chumsky_utils;
mod database;
mod detector;
mod error;
mod layout;
pub mod logging;
mod parser;
mod types;

pub use cache::*;
pub use database::*;
pub use detector::*;
pub use error::*;
pub use layout::*;
pub use logging::*;
pub use parser::*;
pub use types::*;
