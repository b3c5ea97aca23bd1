//! SQL DDL parser
//!
//! Reads `CREATE TABLE`, `CREATE VIEW`, `ALTER TABLE ... ADD` and
//! `CREATE UNIQUE INDEX` statements into a [`SchemaDatabase`]. Every other
//! statement is ignored. A statement that cannot be understood is logged and
//! skipped; the rest of the input still parses.

use anyhow::{anyhow, bail, Result};
use tracing::{debug, info, span, trace, warn, Level};

use super::cursor::{split_top_level, Cursor};
use super::lexer::{render_tokens, tokenize, Spanned, Token};
use super::view::parse_view;
use super::SqlDetector;
use crate::core::{
    line_column, Column, Database, Detector, ForeignKeyDecl, Parser, SchemaDatabase,
    SchemaError, SchemaFormat, TableDecl,
};

/// Keywords that end a column's type and start its constraints
const COLUMN_CONSTRAINTS: &[&str] = &[
    "PRIMARY",
    "NOT",
    "NULL",
    "UNIQUE",
    "REFERENCES",
    "DEFAULT",
    "CHECK",
    "CONSTRAINT",
    "COLLATE",
    "GENERATED",
    "AUTO_INCREMENT",
    "AUTOINCREMENT",
    "IDENTITY",
    "COMMENT",
    "ON",
    "CHARSET",
];

const CREATE_MODIFIERS: &[&str] = &[
    "TEMP",
    "TEMPORARY",
    "UNLOGGED",
    "GLOBAL",
    "LOCAL",
    "MATERIALIZED",
    "RECURSIVE",
    "VIRTUAL",
];

/// Parser for SQL DDL
pub struct SqlParser;

impl SqlParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Work that must wait until every table is declared
enum Deferred<'t> {
    Alter {
        table: String,
        items: Vec<&'t [Spanned]>,
        offset: usize,
    },
    UniqueIndex {
        table: String,
        columns: Vec<String>,
        offset: usize,
    },
}

struct DdlReader<'t, 'db> {
    input: &'t str,
    database: &'db mut SchemaDatabase,
    deferred: Vec<Deferred<'t>>,
}

impl<'t, 'db> DdlReader<'t, 'db> {
    fn statement(&mut self, tokens: &'t [Spanned]) -> Result<()> {
        let mut cursor = Cursor::new(tokens);

        if cursor.eat_keyword("CREATE") {
            cursor.eat_keywords(&["OR", "REPLACE"]);
            while cursor.eat_any_keyword(CREATE_MODIFIERS) {}

            if cursor.eat_keyword("TABLE") {
                return self.create_table(&mut cursor);
            }
            if cursor.eat_keyword("VIEW") {
                let view = parse_view(&mut cursor)?;
                debug!(view = %view.name, "Parsed view");
                return self.database.add_table(view);
            }
            if cursor.eat_keyword("UNIQUE") {
                cursor.eat_any_keyword(&["CLUSTERED", "NONCLUSTERED"]);
                if cursor.eat_keyword("INDEX") {
                    return self.unique_index(&mut cursor, tokens[0].offset);
                }
            }
            if cursor.eat_any_keyword(&["SCHEMA", "DATABASE"]) {
                cursor.eat_keywords(&["IF", "NOT", "EXISTS"]);
                self.name_schema(&mut cursor);
                return Ok(());
            }
            trace!("Ignoring CREATE statement");
            return Ok(());
        }

        if cursor.eat_keywords(&["ALTER", "TABLE"]) {
            return self.alter_table(&mut cursor, tokens[0].offset);
        }

        if cursor.eat_keyword("USE") {
            self.name_schema(&mut cursor);
            return Ok(());
        }

        trace!(first = ?tokens.first().map(|s| &s.token), "Ignoring statement");
        Ok(())
    }

    fn name_schema(&mut self, cursor: &mut Cursor<'t>) {
        if self.database.name().is_some() {
            return;
        }
        if let Some(name) = cursor.qualified_name() {
            debug!(schema = %name, "Named schema");
            self.database.set_name(name);
        }
    }

    fn create_table(&mut self, cursor: &mut Cursor<'t>) -> Result<()> {
        cursor.eat_keywords(&["IF", "NOT", "EXISTS"]);
        let name = cursor
            .qualified_name()
            .ok_or_else(|| anyhow!("expected table name after CREATE TABLE"))?;
        let body = cursor
            .group()
            .ok_or_else(|| anyhow!("expected column list for table {}", name))?;

        let mut table = TableDecl::new(&name);
        let mut foreign_keys = Vec::new();
        let items: Vec<_> = split_top_level(body, ',')
            .into_iter()
            .filter(|item| !item.is_empty())
            .collect();

        // Columns first so table-level constraints can find them
        let (constraints, columns): (Vec<_>, Vec<_>) =
            items.into_iter().partition(|item| is_table_constraint(item));
        for item in columns {
            if let Err(err) = column_definition(item, &mut table, &mut foreign_keys) {
                self.warn_item(item, &err);
            }
        }
        for item in constraints {
            if let Err(err) = table_constraint(item, &mut table, &mut foreign_keys) {
                self.warn_item(item, &err);
            }
        }

        debug!(
            table = %table.name,
            columns = table.columns.len(),
            foreign_keys = foreign_keys.len(),
            "Parsed table"
        );
        self.database.add_table(table)?;
        for foreign_key in foreign_keys {
            self.database.add_foreign_key(foreign_key)?;
        }
        Ok(())
    }

    fn alter_table(&mut self, cursor: &mut Cursor<'t>, offset: usize) -> Result<()> {
        cursor.eat_keywords(&["IF", "EXISTS"]);
        cursor.eat_keyword("ONLY");
        let table = cursor
            .qualified_name()
            .ok_or_else(|| anyhow!("expected table name after ALTER TABLE"))?;

        let items: Vec<_> = split_top_level(cursor.rest(), ',')
            .into_iter()
            .filter_map(|action| {
                let mut action = Cursor::new(action);
                if !action.eat_keyword("ADD") {
                    return None;
                }
                action.eat_keyword("COLUMN");
                action.eat_keywords(&["IF", "NOT", "EXISTS"]);
                Some(action.rest())
            })
            .filter(|item| !item.is_empty())
            .collect();

        if !items.is_empty() {
            self.deferred.push(Deferred::Alter {
                table,
                items,
                offset,
            });
        }
        Ok(())
    }

    fn unique_index(&mut self, cursor: &mut Cursor<'t>, offset: usize) -> Result<()> {
        cursor.eat_keyword("CONCURRENTLY");
        cursor.eat_keywords(&["IF", "NOT", "EXISTS"]);
        if !cursor.is_keyword("ON") {
            cursor.qualified_name();
        }
        if !cursor.eat_keyword("ON") {
            bail!("expected ON in CREATE UNIQUE INDEX");
        }
        cursor.eat_keyword("ONLY");
        let table = cursor
            .qualified_name()
            .ok_or_else(|| anyhow!("expected table name in CREATE UNIQUE INDEX"))?;
        if cursor.eat_keyword("USING") {
            cursor.advance();
        }
        let columns = cursor
            .column_list()
            .ok_or_else(|| anyhow!("expected column list for index on {}", table))?;

        self.deferred.push(Deferred::UniqueIndex {
            table,
            columns,
            offset,
        });
        Ok(())
    }

    fn finish(mut self) {
        let input = self.input;
        for deferred in std::mem::take(&mut self.deferred) {
            match deferred {
                Deferred::Alter {
                    table,
                    items,
                    offset,
                } => {
                    let Some(decl) = self.database.get_table_mut(&table) else {
                        let (line, column) = line_column(input, offset);
                        warn!(%table, line, column, "ALTER TABLE on undeclared table, skipping");
                        continue;
                    };

                    let mut foreign_keys = Vec::new();
                    for item in items {
                        let result = if is_table_constraint(item) {
                            table_constraint(item, decl, &mut foreign_keys)
                        } else {
                            column_definition(item, decl, &mut foreign_keys)
                        };
                        if let Err(err) = result {
                            let (line, column) = line_column(input, item[0].offset);
                            warn!(line, column, error = %err, "Skipping ALTER TABLE action");
                        }
                    }
                    for foreign_key in foreign_keys {
                        if let Err(err) = self.database.add_foreign_key(foreign_key) {
                            warn!(error = %err, "Dropping foreign key");
                        }
                    }
                }
                Deferred::UniqueIndex {
                    table,
                    columns,
                    offset,
                } => {
                    let Some(decl) = self.database.get_table_mut(&table) else {
                        let (line, column) = line_column(input, offset);
                        warn!(%table, line, column, "Unique index on undeclared table, skipping");
                        continue;
                    };
                    if let [single] = columns.as_slice() {
                        match decl.column_mut(single) {
                            Some(column) => column.is_unique = true,
                            None => warn!(%table, column = %single, "Unique index on unknown column"),
                        }
                    }
                }
            }
        }
    }

    fn warn_item(&self, item: &[Spanned], err: &anyhow::Error) {
        let offset = item.first().map(|s| s.offset).unwrap_or(0);
        let (line, column) = line_column(self.input, offset);
        warn!(line, column, error = %err, "Skipping table element");
    }
}

/// True for table-level clauses such as `PRIMARY KEY (a, b)` or `KEY idx (a)`
fn is_table_constraint(item: &[Spanned]) -> bool {
    let token = |i: usize| item.get(i).map(|s| &s.token);
    let Some(first) = token(0) else {
        return false;
    };

    if first.is_keyword("CONSTRAINT") || first.is_keyword("EXCLUDE") || first.is_keyword("LIKE") {
        return true;
    }
    if first.is_keyword("PRIMARY") || first.is_keyword("FOREIGN") {
        return token(1).is_some_and(|t| t.is_keyword("KEY"));
    }
    if first.is_keyword("CHECK") || first.is_keyword("UNIQUE") {
        return token(1).is_some_and(|t| {
            t.is_symbol('(') || t.is_keyword("KEY") || t.is_keyword("INDEX")
        }) || (token(1).and_then(Token::identifier).is_some()
            && token(2).is_some_and(|t| t.is_symbol('(')));
    }
    if first.is_any_keyword(&["KEY", "INDEX", "FULLTEXT", "SPATIAL"]) {
        // `KEY idx (col)` vs a column named `key` with type `VARCHAR(50)`
        let opens_at = |i: usize| token(i).is_some_and(|t| t.is_symbol('('));
        let names_column = |i: usize| match token(i) {
            Some(Token::Word(w)) => !w.starts_with(|c: char| c.is_ascii_digit()),
            Some(Token::Quoted(_)) => true,
            _ => false,
        };
        return opens_at(1) || (opens_at(2) && names_column(3));
    }
    false
}

/// Parse `name type [constraints...]`
fn column_definition(
    item: &[Spanned],
    table: &mut TableDecl,
    foreign_keys: &mut Vec<ForeignKeyDecl>,
) -> Result<()> {
    let mut cursor = Cursor::new(item);
    let name = cursor
        .identifier()
        .ok_or_else(|| anyhow!("expected column name in table {}", table.name))?;

    let type_start = cursor.position();
    while let Some(token) = cursor.peek() {
        let ends_type = token.is_any_keyword(COLUMN_CONSTRAINTS)
            || (token.is_keyword("CHARACTER")
                && cursor.position() > type_start
                && cursor.peek_at(1).is_some_and(|t| t.is_keyword("SET")));
        if ends_type {
            break;
        }
        cursor.skip_item();
    }
    let data_type = render_tokens(cursor.since(type_start));

    let mut column = Column::new(name, data_type);
    while !cursor.at_end() {
        if cursor.eat_keywords(&["PRIMARY", "KEY"]) {
            column = column.primary_key();
        } else if cursor.eat_keywords(&["NOT", "NULL"]) {
            column.is_nullable = false;
        } else if cursor.eat_keyword("NULL") {
            column.is_nullable = !column.is_primary_key;
        } else if cursor.eat_keyword("UNIQUE") {
            cursor.eat_keyword("KEY");
            column.is_unique = true;
        } else if cursor.eat_keyword("REFERENCES") {
            let (ref_table, ref_columns) = reference(&mut cursor)?;
            foreign_keys.push(ForeignKeyDecl::new(
                &table.name,
                &column.name,
                ref_table,
                ref_columns.into_iter().next(),
            ));
        } else if cursor.eat_keyword("DEFAULT") {
            skip_default(&mut cursor);
        } else if cursor.eat_keyword("CONSTRAINT") {
            cursor.identifier();
        } else if cursor.eat_keyword("COLLATE") {
            cursor.qualified_name();
        } else if cursor.eat_keyword("ON") {
            cursor.eat_any_keyword(&["DELETE", "UPDATE"]);
            skip_referential_action(&mut cursor);
        } else {
            cursor.skip_item();
        }
    }

    trace!(table = %table.name, column = %column.name, data_type = %column.data_type, "Parsed column");
    table.add_column(column);
    Ok(())
}

/// Parse a table-level clause: `[CONSTRAINT n] PRIMARY KEY | FOREIGN KEY | UNIQUE ...`
fn table_constraint(
    item: &[Spanned],
    table: &mut TableDecl,
    foreign_keys: &mut Vec<ForeignKeyDecl>,
) -> Result<()> {
    let mut cursor = Cursor::new(item);
    if cursor.eat_keyword("CONSTRAINT") {
        cursor.identifier();
    }

    if cursor.eat_keywords(&["PRIMARY", "KEY"]) {
        cursor.eat_any_keyword(&["CLUSTERED", "NONCLUSTERED"]);
        let columns = cursor
            .column_list()
            .ok_or_else(|| anyhow!("expected column list after PRIMARY KEY"))?;
        for name in &columns {
            match table.column_mut(name) {
                Some(column) => {
                    column.is_primary_key = true;
                    column.is_nullable = false;
                }
                None => warn!(table = %table.name, column = %name, "Primary key names unknown column"),
            }
        }
    } else if cursor.eat_keywords(&["FOREIGN", "KEY"]) {
        if !cursor.is_symbol('(') {
            cursor.identifier();
        }
        let columns = cursor
            .column_list()
            .ok_or_else(|| anyhow!("expected column list after FOREIGN KEY"))?;
        if !cursor.eat_keyword("REFERENCES") {
            bail!("expected REFERENCES in foreign key on {}", table.name);
        }
        let (ref_table, ref_columns) = reference(&mut cursor)?;
        for (i, name) in columns.iter().enumerate() {
            foreign_keys.push(ForeignKeyDecl::new(
                &table.name,
                name,
                &ref_table,
                ref_columns.get(i).cloned(),
            ));
        }
    } else if cursor.eat_keyword("UNIQUE") {
        cursor.eat_any_keyword(&["KEY", "INDEX"]);
        if !cursor.is_symbol('(') {
            cursor.identifier();
        }
        let columns = cursor
            .column_list()
            .ok_or_else(|| anyhow!("expected column list after UNIQUE"))?;
        // A multi-column UNIQUE does not make any single column unique
        if let [single] = columns.as_slice() {
            if let Some(column) = table.column_mut(single) {
                column.is_unique = true;
            }
        }
    } else {
        trace!(table = %table.name, "Ignoring table constraint");
    }
    Ok(())
}

/// Parse `table [(col, ...)]` after REFERENCES
fn reference(cursor: &mut Cursor<'_>) -> Result<(String, Vec<String>)> {
    let table = cursor
        .qualified_name()
        .ok_or_else(|| anyhow!("expected table name after REFERENCES"))?;
    let columns = if cursor.is_symbol('(') {
        cursor.column_list().unwrap_or_default()
    } else {
        Vec::new()
    };
    Ok((table, columns))
}

/// Skip a DEFAULT expression up to the next column constraint
fn skip_default(cursor: &mut Cursor<'_>) {
    // The first token is always part of the value (`DEFAULT NULL`)
    cursor.skip_item();
    while let Some(token) = cursor.peek() {
        if token.is_any_keyword(COLUMN_CONSTRAINTS) {
            break;
        }
        cursor.skip_item();
    }
}

fn skip_referential_action(cursor: &mut Cursor<'_>) {
    let _ = cursor.eat_keywords(&["SET", "NULL"])
        || cursor.eat_keywords(&["SET", "DEFAULT"])
        || cursor.eat_keywords(&["NO", "ACTION"])
        || cursor.eat_any_keyword(&["CASCADE", "RESTRICT"]);
}

/// Split a token stream into statements.
///
/// Statements end at a top-level `;`. A `CREATE` or `ALTER` at the top level
/// also starts a new statement, so dumps without semicolons still split.
pub fn split_statements(tokens: &[Spanned]) -> Vec<&[Spanned]> {
    let mut statements = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;

    for (i, spanned) in tokens.iter().enumerate() {
        let token = &spanned.token;
        if token.is_symbol('(') {
            depth += 1;
        } else if token.is_symbol(')') {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && token.is_symbol(';') {
            if i > start {
                statements.push(&tokens[start..i]);
            }
            start = i + 1;
        } else if depth == 0 && i > start && token.is_any_keyword(&["CREATE", "ALTER"]) {
            statements.push(&tokens[start..i]);
            start = i;
        }
    }
    if start < tokens.len() {
        statements.push(&tokens[start..]);
    }
    statements
}

impl Parser<SchemaDatabase> for SqlParser {
    fn parse(&self, input: &str, database: &mut SchemaDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_sql", input_len = input.len());
        let _enter = parse_span.enter();

        let tokens = tokenize(input)?;
        trace!(token_count = tokens.len(), "Tokenized input");

        let statements = split_statements(&tokens);
        debug!(statement_count = statements.len(), "Split statements");

        let mut reader = DdlReader {
            input,
            database,
            deferred: Vec::new(),
        };
        for statement in statements {
            if let Err(err) = reader.statement(statement) {
                let (line, column) = line_column(input, statement[0].offset);
                let error = SchemaError::parse_error(err.to_string(), line, column);
                warn!(%error, "Skipping statement");
            }
        }
        reader.finish();

        info!(
            tables = database.table_count(),
            foreign_keys = database.foreign_key_count(),
            "Parsed SQL"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sql"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> SchemaFormat {
        SchemaFormat::Sql
    }

    fn can_parse(&self, input: &str) -> bool {
        SqlDetector::new().detect(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> SchemaDatabase {
        let mut database = SchemaDatabase::new(SchemaFormat::Sql);
        SqlParser::new().parse(input, &mut database).unwrap();
        database
    }

    #[test]
    fn test_parser_metadata() {
        let parser = SqlParser::new();
        assert_eq!(parser.name(), "sql");
        assert_eq!(parser.version(), "0.1.0");
        assert_eq!(parser.format(), SchemaFormat::Sql);
        assert!(parser.can_parse("CREATE TABLE a (id int);"));
    }

    #[test]
    fn test_inline_constraints() {
        let db = parse(
            "CREATE TABLE users (
                id SERIAL PRIMARY KEY,
                email VARCHAR(255) NOT NULL UNIQUE,
                nickname TEXT NULL
            );",
        );
        let users = db.get_table("users").unwrap();
        assert_eq!(users.columns.len(), 3);

        let id = users.column("id").unwrap();
        assert_eq!(id.data_type, "SERIAL");
        assert!(id.is_primary_key);
        assert!(!id.is_nullable);

        let email = users.column("email").unwrap();
        assert_eq!(email.data_type, "VARCHAR(255)");
        assert!(email.is_unique);
        assert!(!email.is_nullable);

        assert!(users.column("nickname").unwrap().is_nullable);
    }

    #[test]
    fn test_composite_primary_key() {
        let db = parse(
            "CREATE TABLE memberships (
                user_id INT,
                group_id INT,
                role TEXT,
                PRIMARY KEY (user_id, group_id)
            );",
        );
        let table = db.get_table("memberships").unwrap();
        assert!(table.column("user_id").unwrap().is_primary_key);
        assert!(table.column("group_id").unwrap().is_primary_key);
        assert!(!table.column("group_id").unwrap().is_nullable);
        assert!(!table.column("role").unwrap().is_primary_key);
    }

    #[test]
    fn test_foreign_keys_inline_and_table_level() {
        let db = parse(
            "CREATE TABLE orders (
                id INT PRIMARY KEY,
                user_id INT NOT NULL REFERENCES users(id) ON DELETE SET NULL,
                coupon_id INT,
                CONSTRAINT fk_coupon FOREIGN KEY (coupon_id) REFERENCES coupons
            );",
        );
        let foreign_keys: Vec<_> = db.foreign_keys().collect();
        assert_eq!(foreign_keys.len(), 2);
        assert_eq!(foreign_keys[0].column, "user_id");
        assert_eq!(foreign_keys[0].ref_table, "users");
        assert_eq!(foreign_keys[0].ref_column.as_deref(), Some("id"));
        assert_eq!(foreign_keys[1].ref_table, "coupons");
        assert_eq!(foreign_keys[1].ref_column, None);

        // SET NULL in an ON DELETE action must not make the column nullable
        let orders = db.get_table("orders").unwrap();
        assert!(!orders.column("user_id").unwrap().is_nullable);
    }

    #[test]
    fn test_defaults_and_checks_are_skipped() {
        let db = parse(
            "CREATE TABLE products (
                id INT PRIMARY KEY,
                price NUMERIC(10, 2) DEFAULT 0 CHECK (price >= 0) NOT NULL,
                created_at TIMESTAMP WITH TIME ZONE DEFAULT now(),
                status VARCHAR(20) DEFAULT 'draft'::character varying
            );",
        );
        let products = db.get_table("products").unwrap();
        let price = products.column("price").unwrap();
        assert_eq!(price.data_type, "NUMERIC(10,2)");
        assert!(!price.is_nullable);
        assert_eq!(
            products.column("created_at").unwrap().data_type,
            "TIMESTAMP WITH TIME ZONE"
        );
        assert_eq!(products.column("status").unwrap().data_type, "VARCHAR(20)");
    }

    #[test]
    fn test_multi_column_unique_does_not_mark_columns() {
        let db = parse(
            "CREATE TABLE t (a INT, b INT, c INT, UNIQUE (a, b), UNIQUE (c));",
        );
        let t = db.get_table("t").unwrap();
        assert!(!t.column("a").unwrap().is_unique);
        assert!(!t.column("b").unwrap().is_unique);
        assert!(t.column("c").unwrap().is_unique);
    }

    #[test]
    fn test_mysql_keys_and_column_named_key() {
        let db = parse(
            "CREATE TABLE `settings` (
                `id` INT NOT NULL AUTO_INCREMENT,
                `key` VARCHAR(50) NOT NULL,
                PRIMARY KEY (`id`),
                KEY `idx_key` (`key`)
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;",
        );
        let settings = db.get_table("settings").unwrap();
        assert_eq!(settings.columns.len(), 2);
        assert_eq!(settings.column("key").unwrap().data_type, "VARCHAR(50)");
        assert!(settings.column("id").unwrap().is_primary_key);
    }

    #[test]
    fn test_alter_table_and_unique_index() {
        let db = parse(
            "ALTER TABLE orders ADD CONSTRAINT fk_user FOREIGN KEY (user_id) REFERENCES users (id);
             CREATE TABLE users (id INT PRIMARY KEY, email TEXT);
             CREATE TABLE orders (id INT PRIMARY KEY, user_id INT);
             ALTER TABLE users ADD COLUMN created_at TIMESTAMP NOT NULL;
             CREATE UNIQUE INDEX users_email_idx ON users (email);",
        );
        assert_eq!(db.foreign_key_count(), 1);
        let users = db.get_table("users").unwrap();
        assert!(users.column("email").unwrap().is_unique);
        assert!(!users.column("created_at").unwrap().is_nullable);
    }

    #[test]
    fn test_schema_name_and_qualified_tables() {
        let db = parse(
            "CREATE SCHEMA IF NOT EXISTS billing;
             CREATE TABLE IF NOT EXISTS billing.\"Invoices\" (id INT);",
        );
        assert_eq!(db.name(), Some("billing"));
        assert!(db.get_table("invoices").is_some());
    }

    #[test]
    fn test_statements_without_semicolons() {
        let db = parse("CREATE TABLE a (id INT)\nCREATE TABLE b (id INT)");
        assert_eq!(db.table_count(), 2);
    }

    #[test]
    fn test_unparseable_statement_is_skipped() {
        let db = parse(
            "CREATE TABLE broken;
             INSERT INTO a VALUES (1);
             CREATE TABLE ok (id INT);",
        );
        assert_eq!(db.table_count(), 1);
        assert!(db.get_table("ok").is_some());
    }

    #[test]
    fn test_split_statements() {
        let tokens = tokenize("CREATE TABLE a (x INT); ; CREATE TABLE b (y INT)").unwrap();
        assert_eq!(split_statements(&tokens).len(), 2);
    }
}
