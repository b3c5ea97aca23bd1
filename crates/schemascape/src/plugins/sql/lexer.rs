//! SQL tokenizer
//!
//! A chumsky lexer that turns DDL text into a flat token stream with byte
//! offsets. Comments and whitespace are dropped. Any character that is not
//! part of a word, quoted identifier or string literal becomes a single
//! `Symbol`, so lexing never fails on unfamiliar dialect syntax; the
//! statement parser decides what to skip.

use anyhow::{anyhow, Result};
use chumsky::prelude::*;

use crate::core::chumsky_utils::{delimited_text, sql_block_comment, sql_line_comment, word};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Keyword, bare identifier or number
    Word(String),
    /// `"name"`, `` `name` `` or `[name]`
    Quoted(String),
    /// `'text'` string literal, with `''` unescaped
    Str(String),
    Symbol(char),
}

impl Token {
    /// Case-insensitive keyword test. Quoted identifiers are never keywords.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Token::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    pub fn is_any_keyword(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.is_keyword(k))
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        matches!(self, Token::Symbol(c) if *c == symbol)
    }

    /// The identifier text, for words and quoted identifiers
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Token::Word(w) | Token::Quoted(w) => Some(w),
            _ => None,
        }
    }

    fn is_word_like(&self) -> bool {
        !matches!(self, Token::Symbol(_))
    }
}

/// A token and the byte offset it starts at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
}

fn lexer<'src>() -> impl Parser<'src, &'src str, Vec<Spanned>, extra::Err<Rich<'src, char>>> {
    let string = just('\'')
        .ignore_then(
            none_of('\'')
                .or(just("''").to('\''))
                .repeated()
                .collect::<String>(),
        )
        .then_ignore(just('\''))
        .map(Token::Str);

    let bracketed = just('[')
        .ignore_then(none_of(']').repeated().at_least(1).collect::<String>())
        .then_ignore(just(']'))
        .map(Token::Quoted);

    let token = choice((
        word().map(Token::Word),
        delimited_text('"', '"').map(Token::Quoted),
        delimited_text('`', '`').map(Token::Quoted),
        bracketed,
        string,
        any().map(Token::Symbol),
    ));

    let skip = one_of(" \t\r\n")
        .ignored()
        .or(sql_line_comment())
        .or(sql_block_comment())
        .repeated();

    let spanned = token.map_with(|token, e| {
        let span: SimpleSpan = e.span();
        Spanned {
            token,
            offset: span.start,
        }
    });

    skip.clone()
        .ignore_then(
            spanned
                .then_ignore(skip)
                .repeated()
                .collect::<Vec<_>>(),
        )
        .then_ignore(end())
}

/// Tokenize SQL text
pub fn tokenize(input: &str) -> Result<Vec<Spanned>> {
    lexer()
        .parse(input)
        .into_result()
        .map_err(|errors| anyhow!("Tokenize error: {:?}", errors))
}

/// Render tokens back to compact source text.
///
/// Adjacent words get a single space; symbols are glued to their neighbours,
/// except that a word after `)` is separated (`NUMERIC(10,2) UNSIGNED`).
pub fn render_tokens(tokens: &[Spanned]) -> String {
    let mut out = String::new();
    let mut previous: Option<&Token> = None;

    for spanned in tokens {
        let token = &spanned.token;
        if let Some(prev) = previous {
            let needs_space =
                token.is_word_like() && (prev.is_word_like() || prev.is_symbol(')'));
            if needs_space {
                out.push(' ');
            }
        }
        match token {
            Token::Word(w) | Token::Quoted(w) => out.push_str(w),
            Token::Str(s) => {
                out.push('\'');
                out.push_str(&s.replace('\'', "''"));
                out.push('\'');
            }
            Token::Symbol(c) => out.push(*c),
        }
        previous = Some(token);
    }

    out
}
