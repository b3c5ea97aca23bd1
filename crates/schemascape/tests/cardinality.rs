//! Cardinality engine cases

use proptest::prelude::*;
use schemascape::schema::Participation;
use schemascape::{calculate_cardinality, parse_cardinality, parse_schema, relationships, ColumnFacts};

#[test]
fn test_unique_required_fk_is_one_to_one() {
    let pk = ColumnFacts::new().primary_key().unique();
    let fk = ColumnFacts::new().unique().nullable(false);
    assert_eq!(calculate_cardinality(Some(&pk), &fk), "1:1");
}

#[test]
fn test_required_fk_is_one_to_one_or_more() {
    let pk = ColumnFacts::new().primary_key();
    let fk = ColumnFacts::new().nullable(false);
    assert_eq!(calculate_cardinality(Some(&pk), &fk), "1:1..N");
}

#[test]
fn test_nullable_fk_is_optional_on_both_sides() {
    let pk = ColumnFacts::new().primary_key();
    let fk = ColumnFacts::new().nullable(true);
    assert_eq!(calculate_cardinality(Some(&pk), &fk), "0..1:0..N");
}

#[test]
fn test_missing_pk_facts() {
    let fk = ColumnFacts::new().nullable(true);
    assert_eq!(calculate_cardinality(None, &fk), "0..1:0..N");
}

#[test]
fn test_unspecified_nullability_is_generic_many() {
    let pk = ColumnFacts::new().primary_key();
    assert_eq!(calculate_cardinality(Some(&pk), &ColumnFacts::new()), "0..1:N");
}

#[test]
fn test_unique_nullable_fk_is_optional_one() {
    let pk = ColumnFacts::new().primary_key();
    let fk = ColumnFacts::new().unique().nullable(true);
    assert_eq!(calculate_cardinality(Some(&pk), &fk), "0..1:0..1");
}

#[test]
fn test_parse_many_to_many() {
    let parsed = parse_cardinality("0..N:0..N");
    assert_eq!(parsed.left, "0..N");
    assert_eq!(parsed.right, "0..N");
    assert!(parsed.left_is_many);
    assert!(parsed.right_is_many);
}

#[test]
fn test_parse_one_side_many() {
    for (notation, left_many, right_many) in [
        ("1:1", false, false),
        ("1:N", false, true),
        ("0..1:1..N", false, true),
        ("N:1", true, false),
    ] {
        let parsed = parse_cardinality(notation);
        assert_eq!(parsed.left_is_many, left_many, "{notation}");
        assert_eq!(parsed.right_is_many, right_many, "{notation}");
    }
}

#[test]
fn test_parse_without_separator() {
    let parsed = parse_cardinality("N");
    assert_eq!(parsed.left, "N");
    assert_eq!(parsed.right, "");
    assert!(parsed.left_is_many);
    assert!(!parsed.right_is_many);
}

#[test]
fn test_notations_round_trip_through_participation() {
    for participation in [
        Participation::One,
        Participation::ZeroOrOne,
        Participation::OneOrMore,
        Participation::ZeroOrMore,
        Participation::Many,
    ] {
        assert_eq!(
            Participation::from_notation(participation.notation()),
            Some(participation)
        );
    }
}

#[test]
fn test_one_relationship_per_foreign_key() {
    let schema = parse_schema(
        "CREATE TABLE people (id INT PRIMARY KEY);
         CREATE TABLE marriages (
             id INT PRIMARY KEY,
             spouse_a INT NOT NULL REFERENCES people(id),
             spouse_b INT UNIQUE REFERENCES people(id)
         );",
        None,
    )
    .unwrap();
    let edges = relationships(&schema);
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0].fk_column, "spouse_a");
    assert_eq!(edges[0].cardinality, "1:1..N");
    assert_eq!(edges[1].fk_column, "spouse_b");
    assert_eq!(edges[1].cardinality, "0..1:0..1");
}

#[test]
fn test_mermaid_tokens_match_sql_inference() {
    let mermaid = parse_schema(
        "erDiagram\n    PEOPLE ||--|{ MARRIAGES : spouse_a\n    MARRIAGES {\n        int spouse_a FK\n    }",
        None,
    )
    .unwrap();
    let edge = &relationships(&mermaid)[0];
    assert_eq!(edge.cardinality, "1:1..N");
    assert!(parse_cardinality(&edge.cardinality).right_is_many);
}

fn facts() -> impl Strategy<Value = ColumnFacts> {
    (any::<bool>(), any::<bool>(), prop::option::of(any::<bool>())).prop_map(
        |(is_primary_key, is_unique, is_nullable)| ColumnFacts {
            is_primary_key,
            is_unique,
            is_nullable,
        },
    )
}

proptest! {
    #[test]
    fn calculated_notation_uses_known_tokens(pk in prop::option::of(facts()), fk in facts()) {
        let notation = calculate_cardinality(pk.as_ref(), &fk);
        let parsed = parse_cardinality(&notation);
        let left = Participation::from_notation(&parsed.left);
        let right = Participation::from_notation(&parsed.right);
        prop_assert!(left.is_some() && right.is_some(), "{}", notation);
        // The parent side is never many; the child side is many iff the FK is not unique
        prop_assert!(!parsed.left_is_many);
        prop_assert_eq!(parsed.right_is_many, !fk.is_unique);
    }

    #[test]
    fn many_means_contains_n(left in "[01N.]{1,4}", right in "[01N.]{1,4}") {
        let parsed = parse_cardinality(&format!("{left}:{right}"));
        prop_assert_eq!(parsed.left_is_many, left.contains('N'));
        prop_assert_eq!(parsed.right_is_many, right.contains('N'));
        prop_assert_eq!(parsed.left, left);
        prop_assert_eq!(parsed.right, right);
    }
}
