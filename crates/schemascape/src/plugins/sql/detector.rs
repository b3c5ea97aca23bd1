//! SQL DDL detector

use crate::core::{Detector, SchemaFormat};

/// Detector for SQL DDL input
pub struct SqlDetector;

impl SqlDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SqlDetector {
    fn default() -> Self {
        Self::new()
    }
}

const CREATE_MODIFIERS: &[&str] = &[
    "or",
    "replace",
    "temp",
    "temporary",
    "unlogged",
    "materialized",
    "if",
];

const STATEMENT_WORDS: &[&str] = &["create", "alter", "drop", "use", "set", "begin", "pragma"];

/// Lowercased words with `--` comments removed
fn words(input: &str) -> Vec<String> {
    input
        .lines()
        .map(|line| match line.find("--") {
            Some(index) => &line[..index],
            None => line,
        })
        .flat_map(|line| line.split(|c: char| c.is_whitespace() || c == '(' || c == ';'))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// True when some `CREATE [modifiers] TABLE|VIEW` appears
fn declares_relation(words: &[String]) -> bool {
    words.iter().enumerate().any(|(i, word)| {
        word == "create"
            && words[i + 1..]
                .iter()
                .find(|w| !CREATE_MODIFIERS.contains(&w.as_str()))
                .is_some_and(|w| w == "table" || w == "view")
    })
}

impl Detector for SqlDetector {
    fn detect(&self, input: &str) -> bool {
        self.confidence(input) >= 0.5
    }

    fn confidence(&self, input: &str) -> f64 {
        let words = words(input);
        let starts_with_statement = words
            .first()
            .is_some_and(|w| STATEMENT_WORDS.contains(&w.as_str()));

        if declares_relation(&words) {
            return if starts_with_statement { 1.0 } else { 0.8 };
        }
        if words.windows(2).any(|pair| pair[0] == "alter" && pair[1] == "table") {
            return 0.6;
        }
        0.0
    }

    fn format(&self) -> SchemaFormat {
        SchemaFormat::Sql
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["CREATE TABLE", "CREATE VIEW", "ALTER TABLE"]
    }
}
