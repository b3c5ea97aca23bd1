//! Token cursor for statement parsing

use super::lexer::{Spanned, Token};

/// Forward-only cursor over one statement's tokens
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Spanned]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn peek(&self) -> Option<&'a Token> {
        self.peek_at(0)
    }

    pub fn peek_at(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n).map(|s| &s.token)
    }

    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Tokens not yet consumed
    pub fn rest(&self) -> &'a [Spanned] {
        &self.tokens[self.pos.min(self.tokens.len())..]
    }

    /// Tokens between an earlier position and the current one
    pub fn since(&self, start: usize) -> &'a [Spanned] {
        let start = start.min(self.pos);
        &self.tokens[start..self.pos.min(self.tokens.len())]
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.peek().is_some_and(|t| t.is_symbol(symbol))
    }

    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.is_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a keyword sequence only if every keyword matches
    pub fn eat_keywords(&mut self, keywords: &[&str]) -> bool {
        let matches = keywords
            .iter()
            .enumerate()
            .all(|(i, k)| self.peek_at(i).is_some_and(|t| t.is_keyword(k)));
        if matches {
            self.pos += keywords.len();
        }
        matches
    }

    pub fn eat_any_keyword(&mut self, keywords: &[&str]) -> bool {
        if self.peek().is_some_and(|t| t.is_any_keyword(keywords)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn eat_symbol(&mut self, symbol: char) -> bool {
        if self.is_symbol(symbol) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a bare or quoted identifier
    pub fn identifier(&mut self) -> Option<String> {
        let name = self.peek()?.identifier()?.to_string();
        self.pos += 1;
        Some(name)
    }

    /// Consume `a.b.c`, returning the last segment
    pub fn qualified_name(&mut self) -> Option<String> {
        let mut name = self.identifier()?;
        while self.is_symbol('.') && self.peek_at(1).and_then(Token::identifier).is_some() {
            self.pos += 1;
            name = self.identifier()?;
        }
        Some(name)
    }

    /// Consume a parenthesized group and return its inner tokens.
    ///
    /// An unbalanced group runs to the end of the statement.
    pub fn group(&mut self) -> Option<&'a [Spanned]> {
        if !self.is_symbol('(') {
            return None;
        }
        let start = self.pos + 1;
        let mut depth = 0usize;
        while let Some(token) = self.advance() {
            if token.is_symbol('(') {
                depth += 1;
            } else if token.is_symbol(')') {
                depth -= 1;
                if depth == 0 {
                    return Some(&self.tokens[start..self.pos - 1]);
                }
            }
        }
        Some(&self.tokens[start.min(self.tokens.len())..])
    }

    /// Skip one token, or a whole group when positioned at `(`
    pub fn skip_item(&mut self) {
        if self.group().is_none() {
            self.advance();
        }
    }

    /// Consume `(a, b DESC, c)` and return the leading identifier of each entry
    pub fn column_list(&mut self) -> Option<Vec<String>> {
        let inner = self.group()?;
        Some(
            split_top_level(inner, ',')
                .into_iter()
                .filter_map(|item| item.first().and_then(|s| s.token.identifier()))
                .map(str::to_string)
                .collect(),
        )
    }
}

/// Split tokens on a separator that sits outside any parentheses
pub fn split_top_level(tokens: &[Spanned], separator: char) -> Vec<&[Spanned]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, spanned) in tokens.iter().enumerate() {
        match spanned.token {
            Token::Symbol('(') => depth += 1,
            Token::Symbol(')') => depth = depth.saturating_sub(1),
            Token::Symbol(c) if c == separator && depth == 0 => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);
    parts
}

/// Index of the first keyword from `keywords` outside any parentheses
pub fn find_top_level_keyword(tokens: &[Spanned], keywords: &[&str]) -> Option<usize> {
    let mut depth = 0usize;
    for (i, spanned) in tokens.iter().enumerate() {
        match spanned.token {
            Token::Symbol('(') => depth += 1,
            Token::Symbol(')') => depth = depth.saturating_sub(1),
            _ if depth == 0 && spanned.token.is_any_keyword(keywords) => return Some(i),
            _ => {}
        }
    }
    None
}
