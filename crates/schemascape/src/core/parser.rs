//! Core parser trait for schema source text

use anyhow::Result;

use super::{Database, SchemaFormat};

/// Converts source text into raw declarations
///
/// Parsers are tolerant: a statement they cannot understand is logged and
/// skipped, and `parse` only fails when the text as a whole is unusable.
///
/// # Example
/// ```
/// use schemascape::core::{Database, Parser, SchemaDatabase, SchemaFormat};
/// use schemascape::plugins::sql::SqlParser;
///
/// let parser = SqlParser::new();
/// let mut db = SchemaDatabase::new(SchemaFormat::Sql);
/// parser.parse("CREATE TABLE users (id INT PRIMARY KEY);", &mut db).unwrap();
/// assert_eq!(db.table_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse source text into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// The format this parser reads
    fn format(&self) -> SchemaFormat;

    /// Check if the input can be parsed by this parser
    fn can_parse(&self, input: &str) -> bool;
}
