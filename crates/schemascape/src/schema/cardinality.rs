//! Relationship cardinality
//!
//! A notation is a `"left:right"` string. The left side describes how many
//! parent rows a child row points at, the right side how many child rows a
//! parent row has. Sides are drawn from `1`, `0..1`, `1..N`, `0..N` and `N`.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Column;

/// Participation of one end of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participation {
    One,
    ZeroOrOne,
    OneOrMore,
    ZeroOrMore,
    /// Many rows, participation unknown
    Many,
}

impl Participation {
    pub fn notation(&self) -> &'static str {
        match self {
            Participation::One => "1",
            Participation::ZeroOrOne => "0..1",
            Participation::OneOrMore => "1..N",
            Participation::ZeroOrMore => "0..N",
            Participation::Many => "N",
        }
    }

    pub fn from_notation(notation: &str) -> Option<Self> {
        match notation.trim() {
            "1" => Some(Participation::One),
            "0..1" => Some(Participation::ZeroOrOne),
            "1..N" => Some(Participation::OneOrMore),
            "0..N" => Some(Participation::ZeroOrMore),
            "N" => Some(Participation::Many),
            _ => None,
        }
    }

    pub fn is_many(&self) -> bool {
        matches!(
            self,
            Participation::OneOrMore | Participation::ZeroOrMore | Participation::Many
        )
    }
}

/// The column-level facts cardinality is derived from
///
/// `is_nullable: None` means the source never said.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnFacts {
    pub is_primary_key: bool,
    pub is_unique: bool,
    pub is_nullable: Option<bool>,
}

impl ColumnFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.is_nullable = Some(nullable);
        self
    }

    /// Facts for a schema column; a sole primary-key column is unique
    pub fn from_column(column: &Column, sole_primary_key: bool) -> Self {
        Self {
            is_primary_key: column.is_primary_key,
            is_unique: column.is_unique || (column.is_primary_key && sole_primary_key),
            is_nullable: Some(column.is_nullable),
        }
    }
}

/// Derive the notation for one foreign-key column
///
/// # Examples
///
/// ```
/// use schemascape::schema::{calculate_cardinality, ColumnFacts};
///
/// let pk = ColumnFacts::new().primary_key();
/// let fk = ColumnFacts::new().nullable(false);
/// assert_eq!(calculate_cardinality(Some(&pk), &fk), "1:1..N");
/// assert_eq!(calculate_cardinality(None, &fk.nullable(true)), "0..1:0..N");
/// ```
pub fn calculate_cardinality(pk: Option<&ColumnFacts>, fk: &ColumnFacts) -> String {
    let required = fk.is_nullable == Some(false);

    let left = match pk {
        Some(pk) if (pk.is_primary_key || pk.is_unique) && required => Participation::One,
        _ => Participation::ZeroOrOne,
    };
    let right = match (fk.is_unique, fk.is_nullable) {
        (true, Some(false)) => Participation::One,
        (true, _) => Participation::ZeroOrOne,
        (false, Some(false)) => Participation::OneOrMore,
        (false, Some(true)) => Participation::ZeroOrMore,
        (false, None) => Participation::Many,
    };

    let notation = format!("{}:{}", left.notation(), right.notation());
    trace!(?pk, ?fk, %notation, "Calculated cardinality");
    notation
}

/// A notation split into sides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCardinality {
    pub left: String,
    pub right: String,
    pub left_is_many: bool,
    pub right_is_many: bool,
}

/// Split a notation on its first `:`; a side is many when it contains `N`
pub fn parse_cardinality(notation: &str) -> ParsedCardinality {
    let (left, right) = notation.split_once(':').unwrap_or((notation, ""));
    let (left, right) = (left.trim().to_string(), right.trim().to_string());
    ParsedCardinality {
        left_is_many: left.contains('N'),
        right_is_many: right.contains('N'),
        left,
        right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_fk() {
        let pk = ColumnFacts::new().primary_key().unique();
        assert_eq!(
            calculate_cardinality(Some(&pk), &ColumnFacts::new().unique().nullable(false)),
            "1:1"
        );
        assert_eq!(
            calculate_cardinality(Some(&pk), &ColumnFacts::new().unique().nullable(true)),
            "0..1:0..1"
        );
        assert_eq!(
            calculate_cardinality(Some(&pk), &ColumnFacts::new().unique()),
            "0..1:0..1"
        );
    }

    #[test]
    fn test_non_unique_fk() {
        let pk = ColumnFacts::new().primary_key();
        assert_eq!(
            calculate_cardinality(Some(&pk), &ColumnFacts::new().nullable(false)),
            "1:1..N"
        );
        assert_eq!(
            calculate_cardinality(Some(&pk), &ColumnFacts::new().nullable(true)),
            "0..1:0..N"
        );
        assert_eq!(calculate_cardinality(Some(&pk), &ColumnFacts::new()), "0..1:N");
    }

    #[test]
    fn test_missing_pk_facts() {
        assert_eq!(
            calculate_cardinality(None, &ColumnFacts::new().nullable(true)),
            "0..1:0..N"
        );
        assert_eq!(
            calculate_cardinality(None, &ColumnFacts::new().nullable(false)),
            "0..1:1..N"
        );
    }

    #[test]
    fn test_plain_column_target_is_not_one() {
        let target = ColumnFacts::new().nullable(false);
        assert_eq!(
            calculate_cardinality(Some(&target), &ColumnFacts::new().nullable(false)),
            "0..1:1..N"
        );
    }

    #[test]
    fn test_parse_cardinality() {
        let parsed = parse_cardinality("0..N:0..N");
        assert_eq!(parsed.left, "0..N");
        assert_eq!(parsed.right, "0..N");
        assert!(parsed.left_is_many && parsed.right_is_many);

        let parsed = parse_cardinality("1:0..1");
        assert!(!parsed.left_is_many && !parsed.right_is_many);

        let parsed = parse_cardinality("1..N");
        assert_eq!(parsed.left, "1..N");
        assert_eq!(parsed.right, "");
        assert!(parsed.left_is_many && !parsed.right_is_many);
    }

    #[test]
    fn test_participation_notation() {
        for p in [
            Participation::One,
            Participation::ZeroOrOne,
            Participation::OneOrMore,
            Participation::ZeroOrMore,
            Participation::Many,
        ] {
            assert_eq!(Participation::from_notation(p.notation()), Some(p));
        }
        assert_eq!(Participation::from_notation("2"), None);
    }

    #[test]
    fn test_facts_from_column() {
        let id = Column::new("id", "int").primary_key();
        let facts = ColumnFacts::from_column(&id, true);
        assert!(facts.is_unique);
        assert_eq!(facts.is_nullable, Some(false));
        assert!(!ColumnFacts::from_column(&id, false).is_unique);
    }

    #[test]
    fn test_facts_json_defaults() {
        let facts: ColumnFacts = serde_json::from_str(r#"{"isPrimaryKey":true}"#).unwrap();
        assert!(facts.is_primary_key);
        assert_eq!(facts.is_nullable, None);
    }
}
