//! Line-level chumsky parsers for `erDiagram` syntax
//!
//! Each non-comment line of an ER diagram is one of: a relationship, an
//! entity block opening (optionally with attributes and the closing brace on
//! the same line), a bare entity name, or a line of attributes inside a block.

use chumsky::prelude::*;

use crate::core::chumsky_utils::{delimited_text, inline_whitespace, inline_whitespace_required};

/// Attribute key marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKey {
    Primary,
    Foreign,
    Unique,
}

/// `type name [PK, FK, UK] ["comment"]`
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub data_type: String,
    pub name: String,
    pub keys: Vec<AttributeKey>,
    pub comment: Option<String>,
}

impl Attribute {
    pub fn has_key(&self, key: AttributeKey) -> bool {
        self.keys.contains(&key)
    }
}

/// `LEFT <op> RIGHT [: label]`
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipLine {
    pub left: String,
    pub operator: String,
    pub right: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Relationship(RelationshipLine),
    /// `NAME [alias] {` with any attributes on the same line
    EntityOpen {
        name: String,
        attributes: Vec<Attribute>,
        closed: bool,
    },
    Entity(String),
}

/// Entity name: a bare word (letters, digits, `_`, `-`) or a quoted string
pub fn entity_name<'src>(
) -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
    let bare = any()
        .filter(|c: &char| c.is_alphanumeric() || *c == '_' || *c == '-')
        .repeated()
        .at_least(1)
        .collect::<String>();
    delimited_text('"', '"').or(bare)
}

/// `["Display Label"]` after an entity name; the label is discarded
fn entity_alias<'src>() -> impl Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone
{
    just('[')
        .ignore_then(none_of(']').repeated())
        .then_ignore(just(']'))
        .ignored()
}

/// Cardinality operator such as `||--o{` or `}|..|{`
fn operator<'src>() -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone
{
    any()
        .filter(|c: &char| {
            *c == 'o'
                || (!c.is_whitespace() && !c.is_alphanumeric() && !matches!(c, '_' | '"' | ':'))
        })
        .repeated()
        .at_least(2)
        .collect::<String>()
}

/// `: label` after a relationship, quoted or running to the end of the line
fn label<'src>(
) -> impl Parser<'src, &'src str, Option<String>, extra::Err<Rich<'src, char>>> + Clone {
    let text = delimited_text('"', '"').or(any()
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(|s| s.trim().to_string()));

    inline_whitespace()
        .ignore_then(just(':'))
        .ignore_then(inline_whitespace())
        .ignore_then(text)
        .or_not()
        .then_ignore(inline_whitespace())
        .then_ignore(end())
        .map(|label| label.filter(|l| !l.is_empty()))
}

fn relationship<'src>(
) -> impl Parser<'src, &'src str, RelationshipLine, extra::Err<Rich<'src, char>>> + Clone {
    entity_name()
        .then_ignore(inline_whitespace())
        .then(operator())
        .then_ignore(inline_whitespace())
        .then(entity_name())
        .then(label())
        .map(|(((left, operator), right), label)| RelationshipLine {
            left,
            operator,
            right,
            label,
        })
}

/// Word form of one relationship end, as its (left, right) glyphs
fn cardinality_alias<'src>(
) -> impl Parser<'src, &'src str, (&'static str, &'static str), extra::Err<Rich<'src, char>>> + Clone
{
    choice((
        just("only one").to(("||", "||")),
        just("zero or one").to(("|o", "o|")),
        just("one or zero").to(("|o", "o|")),
        just("one or more").to(("}|", "|{")),
        just("one or many").to(("}|", "|{")),
        just("many(1)").to(("}|", "|{")),
        just("1+").to(("}|", "|{")),
        just("zero or more").to(("}o", "o{")),
        just("zero or many").to(("}o", "o{")),
        just("many(0)").to(("}o", "o{")),
        just("0+").to(("}o", "o{")),
        just("1").to(("||", "||")),
    ))
}

/// `CUSTOMER only one to zero or more ORDER : places`
///
/// The words are rewritten to the equivalent glyph operator, so
/// `only one to zero or more` becomes `||--o{` and `optionally to` links
/// with `..`.
fn word_relationship<'src>(
) -> impl Parser<'src, &'src str, RelationshipLine, extra::Err<Rich<'src, char>>> + Clone {
    let link = choice((just("optionally to").to(".."), just("to").to("--")));

    entity_name()
        .then_ignore(inline_whitespace_required())
        .then(cardinality_alias())
        .then_ignore(inline_whitespace_required())
        .then(link)
        .then_ignore(inline_whitespace_required())
        .then(cardinality_alias())
        .then_ignore(inline_whitespace_required())
        .then(entity_name())
        .then(label())
        .map(
            |(((((left, (from, _)), link), (_, to)), right), label)| RelationshipLine {
                left,
                operator: format!("{}{}{}", from, link, to),
                right,
                label,
            },
        )
}

/// `LEFT <anything> RIGHT [: label]` with an operator that is not recognized
///
/// Kept as a relationship so the edge survives with unknown cardinality.
/// The operator must contain punctuation, so three plain words such as a
/// stray `int id PK` are not mistaken for a relationship.
fn loose_relationship<'src>(
) -> impl Parser<'src, &'src str, RelationshipLine, extra::Err<Rich<'src, char>>> + Clone {
    let token = any()
        .filter(|c: &char| !c.is_whitespace() && !matches!(c, ':' | '"' | '{' | '}'))
        .repeated()
        .at_least(1)
        .collect::<String>()
        .filter(|token: &String| token.chars().any(|c| !c.is_alphanumeric() && c != '_'));

    entity_name()
        .then_ignore(inline_whitespace_required())
        .then(token)
        .then_ignore(inline_whitespace_required())
        .then(entity_name())
        .then(label())
        .map(|(((left, operator), right), label)| RelationshipLine {
            left,
            operator,
            right,
            label,
        })
}

pub fn attribute<'src>(
) -> impl Parser<'src, &'src str, Attribute, extra::Err<Rich<'src, char>>> + Clone {
    let word = any()
        .filter(|c: &char| !c.is_whitespace() && !matches!(c, '{' | '}' | '"' | ','))
        .repeated()
        .at_least(1)
        .collect::<String>();

    let key = choice((
        just("PK").to(AttributeKey::Primary),
        just("FK").to(AttributeKey::Foreign),
        just("UK").to(AttributeKey::Unique),
    ))
    .then_ignore(
        any()
            .filter(|c: &char| c.is_alphanumeric() || *c == '_')
            .not(),
    );
    let keys = key
        .separated_by(just(',').padded_by(inline_whitespace()))
        .at_least(1)
        .collect::<Vec<_>>();

    word.clone()
        .then_ignore(inline_whitespace_required())
        .then(word)
        .then(inline_whitespace_required().ignore_then(keys).or_not())
        .then(
            inline_whitespace()
                .ignore_then(delimited_text('"', '"'))
                .or_not(),
        )
        .map(|(((data_type, name), keys), comment)| Attribute {
            data_type,
            name,
            keys: keys.unwrap_or_default(),
            comment,
        })
}

fn attributes<'src>(
) -> impl Parser<'src, &'src str, Vec<Attribute>, extra::Err<Rich<'src, char>>> + Clone {
    attribute()
        .padded_by(inline_whitespace())
        .repeated()
        .collect::<Vec<_>>()
}

/// Parse one line inside an entity block; the flag reports a closing `}`
pub fn attribute_line<'src>(
) -> impl Parser<'src, &'src str, (Vec<Attribute>, bool), extra::Err<Rich<'src, char>>> + Clone {
    attributes()
        .then(just('}').padded_by(inline_whitespace()).or_not())
        .then_ignore(end())
        .map(|(attributes, close)| (attributes, close.is_some()))
}

/// Parse one top-level line
pub fn statement<'src>(
) -> impl Parser<'src, &'src str, Statement, extra::Err<Rich<'src, char>>> + Clone {
    let entity_open = entity_name()
        .then_ignore(inline_whitespace())
        .then_ignore(entity_alias().or_not())
        .then_ignore(inline_whitespace())
        .then_ignore(just('{'))
        .then(attributes())
        .then(just('}').or_not())
        .then_ignore(inline_whitespace())
        .then_ignore(end())
        .map(|((name, attributes), close)| Statement::EntityOpen {
            name,
            attributes,
            closed: close.is_some(),
        });

    let entity = entity_name()
        .then_ignore(inline_whitespace())
        .then_ignore(entity_alias().or_not())
        .then_ignore(inline_whitespace())
        .then_ignore(end())
        .map(Statement::Entity);

    choice((
        relationship().map(Statement::Relationship),
        word_relationship().map(Statement::Relationship),
        entity_open,
        entity,
        loose_relationship().map(Statement::Relationship),
    ))
}
