//! Category classification and color assignment

use tracing::debug;

use super::naming::{singular, split_words};
use crate::core::{names_match, DatabaseSchema, Table, DEFAULT_CATEGORY};

/// Category colors, handed out in first-seen order and then reused cyclically
pub const PALETTE: [&str; 10] = [
    "#4F86F7", "#F28C28", "#34A853", "#EA4335", "#A142F4", "#00ACC1", "#F6BF26", "#E91E63",
    "#7CB342", "#8D6E63",
];

/// Keyword buckets, checked in order
const BUCKETS: &[(&str, &[&str])] = &[
    (
        "Auth",
        &[
            "user", "account", "auth", "login", "session", "token", "role", "permission",
            "credential", "password", "oauth", "member", "profile",
        ],
    ),
    (
        "Order",
        &[
            "order", "cart", "checkout", "payment", "invoice", "transaction", "shipment",
            "shipping", "refund", "purchase", "billing", "subscription",
        ],
    ),
    (
        "Product",
        &[
            "product", "item", "inventory", "stock", "catalog", "category", "price", "sku",
            "variant", "warehouse", "supplier", "brand",
        ],
    ),
    (
        "Content",
        &[
            "post", "comment", "article", "page", "media", "image", "file", "tag", "review",
            "message", "blog", "attachment", "document",
        ],
    ),
    (
        "Analytics",
        &[
            "event", "log", "metric", "analytic", "stat", "report", "audit", "visit", "click",
            "tracking", "history",
        ],
    ),
];

/// Pick a category from the words in a table name
pub fn classify(table_name: &str) -> &'static str {
    let words: Vec<String> = split_words(table_name)
        .into_iter()
        .map(|word| singular(&word))
        .collect();
    BUCKETS
        .iter()
        .find(|(_, keywords)| words.iter().any(|word| keywords.contains(&word.as_str())))
        .map(|(category, _)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

/// Give every table its category's color
///
/// Categories get palette slots in order of first appearance; slot
/// `n` for the n-th distinct category, wrapping after the palette runs out.
pub fn assign_colors(tables: &mut [Table]) {
    let mut assigned: Vec<(String, &'static str)> = Vec::new();
    for table in tables.iter_mut() {
        let color = match assigned.iter().find(|(c, _)| names_match(c, &table.category)) {
            Some((_, color)) => *color,
            None => {
                let color = PALETTE[assigned.len() % PALETTE.len()];
                debug!(category = %table.category, color, "Assigned category color");
                assigned.push((table.category.clone(), color));
                color
            }
        };
        table.color = color.to_string();
    }
}

/// Return a copy of the schema with one table moved to a new category
///
/// Colors are reassigned across the whole schema. An unknown table name
/// leaves the schema unchanged apart from the recomputed colors.
pub fn set_table_category(
    schema: &DatabaseSchema,
    table_name: &str,
    category: &str,
) -> DatabaseSchema {
    let mut updated = schema.clone();
    let category = match category.trim() {
        "" => DEFAULT_CATEGORY,
        c => c,
    };
    if let Some(table) = updated.tables.iter_mut().find(|t| t.name_matches(table_name)) {
        table.category = category.to_string();
    }
    assign_colors(&mut updated.tables);
    updated
}
