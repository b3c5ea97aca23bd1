//! Mermaid ER diagram parser
//!
//! Lines are parsed one at a time with the combinators in [`super::syntax`].
//! Relationship lines are bound to foreign-key columns only after every
//! entity block has been read, because a relationship may appear before the
//! blocks that declare its columns.

use anyhow::Result;
use chumsky::Parser as _;
use tracing::{debug, info, span, trace, warn, Level};

use super::syntax::{attribute_line, statement, Attribute, AttributeKey, RelationshipLine, Statement};
use super::MermaidDetector;
use crate::core::{
    name_key, names_match, Column, Database, Detector, ForeignKeyDecl, Parser, SchemaDatabase,
    SchemaFormat,
};
use crate::schema::naming::singular;
use crate::schema::Participation;

/// Parser for Mermaid `erDiagram` syntax
pub struct MermaidParser;

impl MermaidParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MermaidParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode one end of a relationship, as a glyph (`||`, `o{`) or its word
/// alias (`only one`, `zero or more`, `1+`)
pub fn participation(token: &str) -> Option<Participation> {
    match token.trim().to_ascii_lowercase().as_str() {
        "||" | "only one" | "1" => Some(Participation::One),
        "|o" | "o|" | "zero or one" | "one or zero" => Some(Participation::ZeroOrOne),
        "}|" | "|{" | "one or more" | "one or many" | "many(1)" | "1+" => {
            Some(Participation::OneOrMore)
        }
        "}o" | "o{" | "zero or more" | "zero or many" | "many(0)" | "0+" => {
            Some(Participation::ZeroOrMore)
        }
        _ => None,
    }
}

/// Split `||--o{` into its left and right participation.
///
/// `None` on either side means the token was not recognized.
pub fn decode_operator(operator: &str) -> (Option<Participation>, Option<Participation>) {
    let chars: Vec<char> = operator.chars().collect();
    if chars.len() != 6 {
        return (None, None);
    }
    let link: String = chars[2..4].iter().collect();
    if link != "--" && link != ".." {
        return (None, None);
    }
    let left: String = chars[..2].iter().collect();
    let right: String = chars[4..].iter().collect();
    (participation(&left), participation(&right))
}

/// Remove a trailing `%%` comment; `%%` inside a quoted string is kept
fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    let mut previous = None;
    for (index, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '%' if !quoted && previous == Some('%') => return &line[..index - 1],
            _ => {}
        }
        previous = Some(c);
    }
    line
}

fn add_attributes(database: &mut SchemaDatabase, entity: &str, attributes: Vec<Attribute>) {
    let table = database.table_or_insert(entity);
    for attribute in attributes {
        let is_primary = attribute.has_key(AttributeKey::Primary);
        let is_foreign = attribute.has_key(AttributeKey::Foreign);
        let is_unique = attribute.has_key(AttributeKey::Unique);
        let mut column = Column::new(attribute.name, attribute.data_type);
        if is_primary {
            column = column.primary_key();
        }
        column.is_foreign_key = is_foreign;
        column.is_unique = is_unique;
        table.add_column(column);
    }
}

/// Column names a child would conventionally use to reference `parent`
fn conventional_names(parent: &str, primary_key: &str) -> Vec<String> {
    let full = name_key(parent);
    let single = singular(&full);
    let key = name_key(primary_key);
    let mut names = Vec::new();
    for stem in [single.as_str(), full.as_str()] {
        for candidate in [
            format!("{}_{}", stem, key),
            format!("{}{}", stem, key),
            format!("{}_id", stem),
            format!("{}id", stem),
        ] {
            if !names.contains(&candidate) {
                names.push(candidate);
            }
        }
    }
    names
}

/// Turn one relationship line into a foreign-key declaration on the child
fn bind_relationship(
    database: &mut SchemaDatabase,
    relationship: &RelationshipLine,
    bound: &mut Vec<(String, String)>,
) -> Result<()> {
    let (left, right) = decode_operator(&relationship.operator);

    let (parent, child, parent_side) = match (left, right) {
        (Some(l), Some(r)) if l.is_many() && !r.is_many() => {
            (&relationship.right, &relationship.left, Some((r, l)))
        }
        (Some(l), Some(r)) => (&relationship.left, &relationship.right, Some((l, r))),
        _ => {
            warn!(
                operator = %relationship.operator,
                left = %relationship.left,
                right = %relationship.right,
                "Unrecognized relationship tokens, assuming many-to-many"
            );
            (&relationship.left, &relationship.right, None)
        }
    };
    let notation = match parent_side {
        Some((p, c)) => format!("{}:{}", p.notation(), c.notation()),
        None => format!("{}:{}", Participation::Many.notation(), Participation::Many.notation()),
    };

    // Parent key: first PK, then a column named `id`, else synthesize `id`
    let parent_table = database.table_or_insert(parent);
    let existing_key = parent_table
        .primary_key()
        .or_else(|| parent_table.column("id"))
        .map(|column| (column.name.clone(), column.data_type.clone()));
    let (key_name, key_type) = match existing_key {
        Some(key) => key,
        None => {
            debug!(entity = %parent_table.name, "Synthesized primary key");
            parent_table
                .columns
                .insert(0, Column::new("id", "int").primary_key());
            ("id".to_string(), "int".to_string())
        }
    };
    let parent_name = parent_table.name.clone();

    let child_table = database.table_or_insert(child);
    let child_name = child_table.name.clone();
    let is_free = |column: &str| {
        !bound
            .iter()
            .any(|(t, c)| names_match(t, &child_name) && names_match(c, column))
    };

    let by_label = relationship
        .label
        .as_deref()
        .and_then(|label| child_table.column(label.trim()))
        .filter(|c| is_free(&c.name));
    let conventional = conventional_names(&parent_name, &key_name);
    let by_convention = || {
        let matches = |c: &&Column| conventional.contains(&name_key(&c.name)) && is_free(&c.name);
        child_table
            .columns
            .iter()
            .filter(|c| c.is_foreign_key)
            .find(matches)
            .or_else(|| child_table.columns.iter().find(matches))
    };
    let parent_stem = singular(&name_key(&parent_name));
    let by_marker = || {
        child_table.columns.iter().find(|c| {
            c.is_foreign_key && name_key(&c.name).contains(&parent_stem) && is_free(&c.name)
        })
    };

    let existing = by_label
        .or_else(by_convention)
        .or_else(by_marker)
        .map(|c| c.name.clone());

    let column_name = match existing {
        Some(name) => name,
        None => {
            let base = format!("{}_{}", parent_stem, name_key(&key_name));
            let mut name = base.clone();
            let mut suffix = 2;
            while child_table.column(&name).is_some() {
                name = format!("{}_{}", base, suffix);
                suffix += 1;
            }
            let mut column = Column::new(&name, &key_type);
            if parent_side.is_some_and(|(p, _)| p == Participation::One) {
                column = column.not_null();
            }
            debug!(entity = %child_name, column = %name, references = %parent_name, "Synthesized foreign key column");
            child_table.columns.push(column);
            name
        }
    };

    if let Some(column) = child_table.column_mut(&column_name) {
        column.is_foreign_key = true;
    }
    bound.push((child_name.clone(), column_name.clone()));

    trace!(child = %child_name, column = %column_name, parent = %parent_name, %notation, "Bound relationship");
    database.add_foreign_key(
        ForeignKeyDecl::new(child_name, column_name, parent_name, Some(key_name))
            .with_cardinality(notation),
    )
}

/// Read `---` front matter, returning the title and the line index after it
fn front_matter(lines: &[&str]) -> (Option<String>, usize) {
    let Some(start) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return (None, 0);
    };
    if lines[start].trim() != "---" {
        return (None, 0);
    }
    let Some(length) = lines[start + 1..].iter().position(|l| l.trim() == "---") else {
        return (None, 0);
    };
    let title = lines[start + 1..start + 1 + length]
        .iter()
        .find_map(|l| l.trim().strip_prefix("title:"))
        .map(|t| t.trim().trim_matches('"').to_string());
    (title, start + length + 2)
}

fn is_ignored_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    ["direction ", "style ", "classdef ", "class ", "acctitle", "accdescr"]
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

impl Parser<SchemaDatabase> for MermaidParser {
    fn parse(&self, input: &str, database: &mut SchemaDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_mermaid", input_len = input.len());
        let _enter = parse_span.enter();

        let lines: Vec<&str> = input.lines().collect();
        let (title, body_start) = front_matter(&lines);
        if let Some(title) = title {
            database.set_name(title);
        }

        let mut current: Option<String> = None;
        let mut relationships: Vec<(usize, RelationshipLine)> = Vec::new();

        for (index, raw) in lines.iter().enumerate().skip(body_start) {
            let line_number = index + 1;
            let mut line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }

            if let Some(entity) = current.clone() {
                match attribute_line().parse(line).into_result() {
                    Ok((attributes, closed)) => {
                        add_attributes(database, &entity, attributes);
                        if closed {
                            current = None;
                        }
                    }
                    Err(errors) => {
                        warn!(line = line_number, %entity, ?errors, "Skipping unparseable attribute line");
                    }
                }
                continue;
            }

            if line
                .get(..9)
                .is_some_and(|head| head.eq_ignore_ascii_case("erdiagram"))
            {
                line = line[9..].trim();
                if line.is_empty() {
                    continue;
                }
            }
            if is_ignored_line(line) {
                trace!(line = line_number, "Ignoring presentation line");
                continue;
            }

            match statement().parse(line).into_result() {
                Ok(Statement::Relationship(relationship)) => {
                    database.table_or_insert(&relationship.left);
                    database.table_or_insert(&relationship.right);
                    relationships.push((line_number, relationship));
                }
                Ok(Statement::EntityOpen {
                    name,
                    attributes,
                    closed,
                }) => {
                    add_attributes(database, &name, attributes);
                    if !closed {
                        current = Some(name);
                    }
                }
                Ok(Statement::Entity(name)) => {
                    database.table_or_insert(&name);
                }
                Err(errors) => {
                    warn!(line = line_number, ?errors, "Skipping unparseable line");
                }
            }
        }

        if let Some(entity) = current {
            warn!(%entity, "Entity block never closed");
        }

        debug!(
            entities = database.table_count(),
            relationships = relationships.len(),
            "Collected entities"
        );

        let mut bound = Vec::new();
        for (line_number, relationship) in &relationships {
            if let Err(err) = bind_relationship(database, relationship, &mut bound) {
                warn!(line = line_number, error = %err, "Skipping relationship");
            }
        }

        info!(
            tables = database.table_count(),
            foreign_keys = database.foreign_key_count(),
            "Parsed Mermaid ER diagram"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mermaid"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> SchemaFormat {
        SchemaFormat::Mermaid
    }

    fn can_parse(&self, input: &str) -> bool {
        MermaidDetector::new().detect(input)
    }
}
