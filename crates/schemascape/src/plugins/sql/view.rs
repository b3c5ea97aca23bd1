//! `CREATE VIEW` parsing
//!
//! Only the shape of the select list matters here: which output columns are
//! plain passthroughs of a base-table column (so they carry lineage), which
//! are `*` expansions, and which are computed. Type and lineage resolution
//! happen later, once every table is known.

use anyhow::{anyhow, bail, Context, Result};
use tracing::trace;

use super::cursor::{find_top_level_keyword, split_top_level, Cursor};
use super::lexer::{render_tokens, Spanned, Token};
use crate::core::{names_match, SelectItem, TableDecl, ViewSource};

const CLAUSE_END: &[&str] = &[
    "WHERE", "GROUP", "ORDER", "HAVING", "LIMIT", "UNION", "INTERSECT", "EXCEPT", "WINDOW",
    "OFFSET", "FETCH", "FOR", "QUALIFY",
];

const JOIN_WORDS: &[&str] = &[
    "INNER", "LEFT", "RIGHT", "FULL", "OUTER", "CROSS", "NATURAL", "JOIN", "LATERAL", "STRAIGHT_JOIN",
];

/// Words that can end an expression and so are never an implicit alias
const NON_ALIAS_WORDS: &[&str] = &[
    "END", "NULL", "TRUE", "FALSE", "ASC", "DESC", "AND", "OR", "NOT", "IS", "THEN", "ELSE",
    "WHEN", "CASE", "IN", "LIKE", "BETWEEN",
];

/// Keywords that evaluate to a value on their own
const VALUE_WORDS: &[&str] = &[
    "NULL",
    "TRUE",
    "FALSE",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_USER",
    "LOCALTIMESTAMP",
];

/// A table in the FROM clause
#[derive(Debug, Clone, PartialEq)]
struct FromRef {
    table: String,
    alias: Option<String>,
}

/// Parse everything after `CREATE [OR REPLACE] VIEW`
pub fn parse_view(cursor: &mut Cursor<'_>) -> Result<TableDecl> {
    cursor.eat_keywords(&["IF", "NOT", "EXISTS"]);
    let name = cursor
        .qualified_name()
        .ok_or_else(|| anyhow!("expected view name after CREATE VIEW"))?;

    let column_names = if cursor.is_symbol('(') {
        cursor.column_list().unwrap_or_default()
    } else {
        Vec::new()
    };
    if cursor.eat_keyword("WITH") {
        cursor.group();
    }
    if !cursor.eat_keyword("AS") {
        bail!("expected AS in view {}", name);
    }

    let mut query = cursor.rest();
    while let [first, inner @ .., last] = query {
        if first.token.is_symbol('(') && last.token.is_symbol(')') {
            query = inner;
        } else {
            break;
        }
    }

    let source = parse_select(query).with_context(|| format!("in view {}", name))?;
    trace!(view = %name, items = source.items.len(), from = ?source.from, "Parsed view query");
    Ok(TableDecl::view(
        name,
        ViewSource {
            column_names,
            ..source
        },
    ))
}

/// Parse a SELECT query into its select list and FROM tables
pub fn parse_select(tokens: &[Spanned]) -> Result<ViewSource> {
    let mut cursor = Cursor::new(tokens);
    skip_common_table_expressions(&mut cursor);

    if !cursor.eat_keyword("SELECT") {
        bail!("expected SELECT");
    }
    if cursor.eat_keyword("DISTINCT") {
        if cursor.eat_keyword("ON") {
            cursor.group();
        }
    } else {
        cursor.eat_keyword("ALL");
    }
    if cursor.eat_keyword("TOP") {
        cursor.skip_item();
        cursor.eat_keyword("PERCENT");
    }

    let rest = cursor.rest();
    let (select_list, from_clause): (&[Spanned], &[Spanned]) =
        match find_top_level_keyword(rest, &["FROM"]) {
            Some(from) => {
                let after = &rest[from + 1..];
                let end = find_top_level_keyword(after, CLAUSE_END).unwrap_or(after.len());
                (&rest[..from], &after[..end])
            }
            None => {
                let end = find_top_level_keyword(rest, CLAUSE_END).unwrap_or(rest.len());
                (&rest[..end], &[])
            }
        };

    let refs = parse_from(from_clause);
    let mut from: Vec<String> = Vec::new();
    for r in &refs {
        if !from.iter().any(|t| names_match(t, &r.table)) {
            from.push(r.table.clone());
        }
    }

    let items = split_top_level(select_list, ',')
        .into_iter()
        .filter(|item| !item.is_empty())
        .map(|item| select_item(item, &refs))
        .collect();

    Ok(ViewSource {
        from,
        items,
        column_names: Vec::new(),
    })
}

fn skip_common_table_expressions(cursor: &mut Cursor<'_>) {
    if !cursor.eat_keyword("WITH") {
        return;
    }
    cursor.eat_keyword("RECURSIVE");
    loop {
        cursor.identifier();
        if cursor.is_symbol('(') {
            cursor.group();
        }
        cursor.eat_keyword("AS");
        cursor.eat_keywords(&["NOT", "MATERIALIZED"]);
        cursor.eat_keyword("MATERIALIZED");
        cursor.group();
        if !cursor.eat_symbol(',') {
            break;
        }
    }
}

fn parse_from(tokens: &[Spanned]) -> Vec<FromRef> {
    let mut cursor = Cursor::new(tokens);
    let mut refs = Vec::new();

    while let Some(token) = cursor.peek() {
        if token.is_symbol('(') {
            // Derived table; its columns cannot be traced
            cursor.group();
            table_alias(&mut cursor);
        } else if token.is_symbol(',') || token.is_any_keyword(JOIN_WORDS) {
            cursor.advance();
        } else if token.is_keyword("ON") {
            cursor.advance();
            while let Some(next) = cursor.peek() {
                if next.is_symbol(',') || next.is_any_keyword(JOIN_WORDS) {
                    break;
                }
                cursor.skip_item();
            }
        } else if token.is_keyword("USING") {
            cursor.advance();
            cursor.group();
        } else if token.identifier().is_some() {
            match cursor.qualified_name() {
                Some(table) => {
                    let alias = table_alias(&mut cursor);
                    refs.push(FromRef { table, alias });
                }
                None => {
                    cursor.advance();
                }
            }
        } else {
            cursor.advance();
        }
    }
    refs
}

fn table_alias(cursor: &mut Cursor<'_>) -> Option<String> {
    if cursor.eat_keyword("AS") {
        return cursor.identifier();
    }
    let token = cursor.peek()?;
    let is_alias = match token {
        Token::Quoted(_) => true,
        Token::Word(_) => !token.is_any_keyword(JOIN_WORDS) && !token.is_any_keyword(&["ON", "USING"]),
        _ => false,
    };
    if is_alias {
        cursor.identifier()
    } else {
        None
    }
}

/// Map an alias or table name used as a qualifier back to its table
fn resolve_qualifier(qualifier: &str, refs: &[FromRef]) -> String {
    refs.iter()
        .find(|r| r.alias.as_deref().is_some_and(|a| names_match(a, qualifier)))
        .or_else(|| refs.iter().find(|r| names_match(&r.table, qualifier)))
        .map(|r| r.table.clone())
        .unwrap_or_else(|| qualifier.to_string())
}

/// Split a trailing `AS alias` or implicit alias off a select item
fn split_alias(tokens: &[Spanned]) -> (&[Spanned], Option<String>) {
    let n = tokens.len();
    if n >= 3 && tokens[n - 2].token.is_keyword("AS") {
        if let Some(alias) = tokens[n - 1].token.identifier() {
            return (&tokens[..n - 2], Some(alias.to_string()));
        }
    }
    if n >= 2 {
        let last = &tokens[n - 1].token;
        let previous = &tokens[n - 2].token;
        let last_is_alias = match last {
            Token::Quoted(_) => true,
            Token::Word(w) => {
                !w.starts_with(|c: char| c.is_ascii_digit()) && !last.is_any_keyword(NON_ALIAS_WORDS)
            }
            _ => false,
        };
        let previous_ends_expression =
            matches!(previous, Token::Word(_) | Token::Quoted(_) | Token::Str(_))
                || previous.is_symbol(')');
        if last_is_alias && previous_ends_expression {
            if let Some(alias) = last.identifier() {
                return (&tokens[..n - 1], Some(alias.to_string()));
            }
        }
    }
    (tokens, None)
}

fn is_column_name(token: &Token) -> bool {
    match token {
        Token::Quoted(_) => true,
        Token::Word(w) => {
            !w.starts_with(|c: char| c.is_ascii_digit()) && !token.is_any_keyword(VALUE_WORDS)
        }
        _ => false,
    }
}

fn select_item(tokens: &[Spanned], refs: &[FromRef]) -> SelectItem {
    let shape: Vec<&Token> = tokens.iter().map(|s| &s.token).collect();

    match shape.as_slice() {
        [star] if star.is_symbol('*') => return SelectItem::Wildcard { table: None },
        [.., qualifier, dot, star] if dot.is_symbol('.') && star.is_symbol('*') => {
            if let Some(q) = qualifier.identifier() {
                return SelectItem::Wildcard {
                    table: Some(resolve_qualifier(q, refs)),
                };
            }
        }
        _ => {}
    }

    let (expression, alias) = split_alias(tokens);
    let shape: Vec<&Token> = expression.iter().map(|s| &s.token).collect();

    let passthrough = match shape.as_slice() {
        [column] if is_column_name(column) => Some((None, *column)),
        [qualifier, dot, column] | [_, _, qualifier, dot, column]
            if dot.is_symbol('.') && qualifier.identifier().is_some() && is_column_name(column) =>
        {
            qualifier.identifier().map(|q| (Some(resolve_qualifier(q, refs)), *column))
        }
        _ => None,
    };

    match passthrough.and_then(|(table, column)| column.identifier().map(|c| (table, c))) {
        Some((table, column)) => SelectItem::Column {
            name: alias.unwrap_or_else(|| column.to_string()),
            table,
            column: column.to_string(),
        },
        None => SelectItem::Expression {
            name: alias.unwrap_or_else(|| render_tokens(expression)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::sql::lexer::tokenize;

    fn select(sql: &str) -> ViewSource {
        let tokens = tokenize(sql).unwrap();
        parse_select(&tokens).unwrap()
    }

    #[test]
    fn test_plain_and_aliased_columns() {
        let source = select("SELECT u.id, u.email AS contact, name FROM users u");
        assert_eq!(source.from, vec!["users".to_string()]);
        assert_eq!(
            source.items,
            vec![
                SelectItem::Column {
                    name: "id".into(),
                    table: Some("users".into()),
                    column: "id".into(),
                },
                SelectItem::Column {
                    name: "contact".into(),
                    table: Some("users".into()),
                    column: "email".into(),
                },
                SelectItem::Column {
                    name: "name".into(),
                    table: None,
                    column: "name".into(),
                },
            ]
        );
    }

    #[test]
    fn test_expressions_carry_only_names() {
        let source = select(
            "SELECT COUNT(*) AS total, o.amount * 2 doubled, NULL AS nothing, 'x' FROM orders o GROUP BY o.id",
        );
        let names: Vec<_> = source
            .items
            .iter()
            .map(|item| match item {
                SelectItem::Expression { name } => name.clone(),
                other => panic!("expected expression, got {:?}", other),
            })
            .collect();
        assert_eq!(names, vec!["total", "doubled", "nothing", "'x'"]);
    }

    #[test]
    fn test_wildcards() {
        let source = select("SELECT *, o.* FROM users JOIN orders o ON o.user_id = users.id");
        assert_eq!(source.from, vec!["users".to_string(), "orders".to_string()]);
        assert_eq!(source.items[0], SelectItem::Wildcard { table: None });
        assert_eq!(
            source.items[1],
            SelectItem::Wildcard {
                table: Some("orders".into())
            }
        );
    }

    #[test]
    fn test_joins_with_aliases() {
        let source = select(
            "SELECT c.name, p.title FROM public.customers AS c \
             LEFT OUTER JOIN purchases p USING (customer_id) \
             INNER JOIN products pr ON pr.id = p.product_id WHERE c.active",
        );
        assert_eq!(source.from, vec!["customers", "purchases", "products"]);
        assert_eq!(
            source.items[1],
            SelectItem::Column {
                name: "title".into(),
                table: Some("purchases".into()),
                column: "title".into(),
            }
        );
    }

    #[test]
    fn test_parse_view_with_column_list() {
        let tokens = tokenize("v_names (a, b) AS (SELECT id, name FROM t)").unwrap();
        let mut cursor = Cursor::new(&tokens);
        let view = parse_view(&mut cursor).unwrap();
        assert!(view.is_view());
        let source = view.view.unwrap();
        assert_eq!(source.column_names, vec!["a", "b"]);
        assert_eq!(source.items.len(), 2);
    }

    #[test]
    fn test_view_without_select_fails() {
        let tokens = tokenize("v AS VALUES (1)").unwrap();
        let mut cursor = Cursor::new(&tokens);
        assert!(parse_view(&mut cursor).is_err());
    }
}
