//! Foreign-key edges derived from column references
//!
//! The schema stores no edge list. Every call rescans the columns, so a
//! relationship can never disagree with the column it came from.

use serde::{Deserialize, Serialize};

use super::cardinality::{calculate_cardinality, ColumnFacts};
use crate::core::{Column, DatabaseSchema, Table};

/// One foreign-key edge, child to parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub from_table: String,
    pub fk_column: String,
    pub to_table: String,
    pub pk_column: String,
    pub cardinality: String,
}

fn derive(schema: &DatabaseSchema, table: &Table, column: &Column) -> Option<Relationship> {
    let reference = column.references.as_ref()?;
    let cardinality = match &reference.cardinality {
        Some(carried) => carried.clone(),
        None => {
            let target = schema.table(&reference.table);
            let pk = target.and_then(|t| {
                t.column(&reference.column)
                    .map(|c| ColumnFacts::from_column(c, t.has_single_primary_key()))
            });
            let fk = ColumnFacts::from_column(column, table.has_single_primary_key());
            calculate_cardinality(pk.as_ref(), &fk)
        }
    };
    Some(Relationship {
        from_table: table.name.clone(),
        fk_column: column.name.clone(),
        to_table: reference.table.clone(),
        pk_column: reference.column.clone(),
        cardinality,
    })
}

/// All relationships in table then column order
pub fn relationships(schema: &DatabaseSchema) -> Vec<Relationship> {
    schema
        .tables
        .iter()
        .flat_map(|table| {
            table
                .columns
                .iter()
                .filter_map(move |column| derive(schema, table, column))
        })
        .collect()
}
