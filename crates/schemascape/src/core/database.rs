//! Raw declaration store shared by every input parser
//!
//! Parsers do not build the canonical [`DatabaseSchema`](crate::core::DatabaseSchema)
//! directly. They record what the source text *declares*: tables with their
//! columns, views with their select lists, and foreign-key statements that may
//! point at tables declared later. The normalizer resolves all of that in one
//! place, so SQL and Mermaid input end up with identical semantics.

use anyhow::{bail, Result};
use tracing::{trace, warn};

use super::{names_match, Column, SchemaFormat};

/// Storage layer for parsed schema declarations
///
/// Implementors keep tables in declaration order and look them up by
/// case-insensitive name.
pub trait Database: Send + Sync {
    /// Declared table or view
    type Table: Clone + Send + Sync;

    /// Declared foreign-key edge
    type ForeignKey: Clone + Send + Sync;

    /// Add a table; an existing table with the same case-insensitive name is replaced
    fn add_table(&mut self, table: Self::Table) -> Result<()>;

    /// Record a foreign key for later resolution
    fn add_foreign_key(&mut self, foreign_key: Self::ForeignKey) -> Result<()>;

    /// Get a table by case-insensitive name
    fn get_table(&self, name: &str) -> Option<&Self::Table>;

    /// Iterate over tables in declaration order
    fn tables(&self) -> impl Iterator<Item = &Self::Table>;

    /// Iterate over recorded foreign keys
    fn foreign_keys(&self) -> impl Iterator<Item = &Self::ForeignKey>;

    fn clear(&mut self);

    fn table_count(&self) -> usize;

    fn foreign_key_count(&self) -> usize;
}

/// One entry in a view's select list
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// `[qualifier.]column [AS name]`, with the qualifier already resolved
    /// from an alias to a table name where possible
    Column {
        name: String,
        table: Option<String>,
        column: String,
    },
    /// `*` or `qualifier.*`
    Wildcard { table: Option<String> },
    /// Anything computed; carries only its output name
    Expression { name: String },
}

/// What a view selects from
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewSource {
    /// Tables named in the FROM clause, aliases resolved
    pub from: Vec<String>,
    pub items: Vec<SelectItem>,
    /// Explicit `CREATE VIEW v (a, b) AS ...` column names
    pub column_names: Vec<String>,
}

/// A declared table or view before resolution
#[derive(Debug, Clone, PartialEq)]
pub struct TableDecl {
    pub name: String,
    pub columns: Vec<Column>,
    pub view: Option<ViewSource>,
}

impl TableDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            view: None,
        }
    }

    pub fn view(name: impl Into<String>, source: ViewSource) -> Self {
        Self {
            view: Some(source),
            ..Self::new(name)
        }
    }

    pub fn is_view(&self) -> bool {
        self.view.is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name_matches(name))
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name_matches(name))
    }

    /// Add a column; a later column with the same name replaces the earlier one
    pub fn add_column(&mut self, column: Column) {
        match self.columns.iter_mut().find(|c| c.name_matches(&column.name)) {
            Some(existing) => {
                warn!(table = %self.name, column = %column.name, "Duplicate column, keeping last definition");
                *existing = column;
            }
            None => self.columns.push(column),
        }
    }

    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.is_primary_key)
    }
}

/// A foreign-key declaration awaiting resolution
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyDecl {
    pub table: String,
    pub column: String,
    pub ref_table: String,
    /// `None` means "the target's primary key"
    pub ref_column: Option<String>,
    pub cardinality: Option<String>,
}

impl ForeignKeyDecl {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        ref_table: impl Into<String>,
        ref_column: Option<String>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            ref_table: ref_table.into(),
            ref_column,
            cardinality: None,
        }
    }

    pub fn with_cardinality(mut self, cardinality: impl Into<String>) -> Self {
        self.cardinality = Some(cardinality.into());
        self
    }
}

/// Declarations collected from one input text
#[derive(Debug, Clone, Default)]
pub struct SchemaDatabase {
    format: SchemaFormat,
    name: Option<String>,
    tables: Vec<TableDecl>,
    foreign_keys: Vec<ForeignKeyDecl>,
}

impl SchemaDatabase {
    pub fn new(format: SchemaFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn format(&self) -> SchemaFormat {
        self.format
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.trim().is_empty() {
            self.name = Some(name.trim().to_string());
        }
    }

    pub fn get_table_mut(&mut self, name: &str) -> Option<&mut TableDecl> {
        self.tables.iter_mut().find(|t| names_match(&t.name, name))
    }

    /// Get a table, creating an empty one at the end if it was never declared
    pub fn table_or_insert(&mut self, name: &str) -> &mut TableDecl {
        let index = match self.tables.iter().position(|t| names_match(&t.name, name)) {
            Some(index) => index,
            None => {
                self.tables.push(TableDecl::new(name));
                self.tables.len() - 1
            }
        };
        &mut self.tables[index]
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Split into name, tables and foreign keys for resolution
    pub fn into_parts(self) -> (SchemaFormat, Option<String>, Vec<TableDecl>, Vec<ForeignKeyDecl>) {
        (self.format, self.name, self.tables, self.foreign_keys)
    }
}

impl Database for SchemaDatabase {
    type Table = TableDecl;
    type ForeignKey = ForeignKeyDecl;

    fn add_table(&mut self, table: TableDecl) -> Result<()> {
        if table.name.trim().is_empty() {
            bail!("Table name cannot be empty");
        }

        match self.tables.iter_mut().find(|t| names_match(&t.name, &table.name)) {
            Some(existing) => {
                warn!(
                    table = %table.name,
                    previous = %existing.name,
                    "Table declared twice, keeping last definition"
                );
                *existing = table;
            }
            None => {
                trace!(table = %table.name, view = table.is_view(), "Added table");
                self.tables.push(table);
            }
        }
        Ok(())
    }

    fn add_foreign_key(&mut self, foreign_key: ForeignKeyDecl) -> Result<()> {
        if foreign_key.table.trim().is_empty() || foreign_key.ref_table.trim().is_empty() {
            bail!("Foreign key must name both tables");
        }
        self.foreign_keys.push(foreign_key);
        Ok(())
    }

    fn get_table(&self, name: &str) -> Option<&TableDecl> {
        self.tables.iter().find(|t| names_match(&t.name, name))
    }

    fn tables(&self) -> impl Iterator<Item = &TableDecl> {
        self.tables.iter()
    }

    fn foreign_keys(&self) -> impl Iterator<Item = &ForeignKeyDecl> {
        self.foreign_keys.iter()
    }

    fn clear(&mut self) {
        self.name = None;
        self.tables.clear();
        self.foreign_keys.clear();
    }

    fn table_count(&self) -> usize {
        self.tables.len()
    }

    fn foreign_key_count(&self) -> usize {
        self.foreign_keys.len()
    }
}
