//! Core error types for schema processing
//!
//! Parsers and the normalizer work with `anyhow::Result` internally and wrap
//! these variants when a failure has a meaningful category. The public façade
//! (`try_parse_schema`) surfaces them unwrapped.

use crate::core::SchemaFormat;
use thiserror::Error;

/// Core error types for schema processing
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("No tables found in {format} input")]
    NoTables { format: SchemaFormat },

    #[error("Unknown schema format: input is neither SQL DDL nor a Mermaid erDiagram")]
    UnknownFormat,

    #[error("Unresolved reference: {table}.{column} -> {target_table}.{target_column}")]
    UnresolvedReference {
        table: String,
        column: String,
        target_table: String,
        target_column: String,
    },

    #[error("Database error: {message}")]
    DatabaseError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl SchemaError {
    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::ParseError {
            message: message.into(),
            line,
            column,
        }
    }

    pub fn no_tables(format: SchemaFormat) -> Self {
        Self::NoTables { format }
    }

    pub fn unresolved_reference(
        table: impl Into<String>,
        column: impl Into<String>,
        target_table: impl Into<String>,
        target_column: impl Into<String>,
    ) -> Self {
        Self::UnresolvedReference {
            table: table.into(),
            column: column.into(),
            target_table: target_table.into(),
            target_column: target_column.into(),
        }
    }

    /// Create a new database error
    pub fn database_error(message: impl Into<String>) -> Self {
        Self::DatabaseError {
            message: message.into(),
        }
    }
}

/// Convert a byte offset into a 1-based (line, column) pair
pub fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(input.len());
    let prefix = input.get(..offset).unwrap_or(input);
    let line = prefix.matches('\n').count() + 1;
    let column = match prefix.rfind('\n') {
        Some(newline) => prefix[newline + 1..].chars().count() + 1,
        None => prefix.chars().count() + 1,
    };
    (line, column)
}
