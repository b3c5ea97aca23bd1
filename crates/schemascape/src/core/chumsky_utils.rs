//! Shared chumsky parser utilities
//!
//! Small combinators used by both the SQL lexer and the Mermaid ER parser.

use chumsky::prelude::*;

/// Parse inline whitespace only (spaces and tabs, no newlines).
pub fn inline_whitespace<'src>(
) -> impl Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse at least one space or tab.
pub fn inline_whitespace_required<'src>(
) -> impl Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

/// Parse a Mermaid-style comment (%% to end of line).
pub fn mermaid_comment<'src>(
) -> impl Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone {
    just("%%").ignore_then(none_of('\n').repeated()).ignored()
}

/// Parse an SQL line comment (`--` to end of line).
pub fn sql_line_comment<'src>(
) -> impl Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone {
    just("--").ignore_then(none_of('\n').repeated()).ignored()
}

/// Parse an SQL block comment. An unterminated comment runs to end of input.
pub fn sql_block_comment<'src>(
) -> impl Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone {
    just("/*")
        .ignore_then(any().and_is(just("*/").not()).repeated())
        .then_ignore(just("*/").or_not())
        .ignored()
}

/// Parse a bare word: letters, digits, `_` and `$`.
pub fn word<'src>() -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone
{
    any()
        .filter(|c: &char| c.is_alphanumeric() || *c == '_' || *c == '$')
        .repeated()
        .at_least(1)
        .collect::<String>()
}

/// Parse text between a pair of delimiters, returning the inner text.
pub fn delimited_text<'src>(
    open: char,
    close: char,
) -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
    just(open)
        .ignore_then(none_of(close).repeated().collect::<String>())
        .then_ignore(just(close))
}
