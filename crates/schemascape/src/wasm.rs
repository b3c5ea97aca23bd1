//! WebAssembly bindings for Schemascape
//!
//! Schemas cross the boundary as JSON strings in the camelCase shape the
//! model types serialize to. Every binding returns `Err` with a readable
//! message instead of panicking.

use wasm_bindgen::prelude::*;

use crate::core::{DatabaseSchema, LayoutKind, SchemaFormat, ViewMode};
use crate::schema::ColumnFacts;

fn js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn from_json<'a, T: serde::Deserialize<'a>>(json: &'a str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| js_error(format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

/// Parse schema text
///
/// # Arguments
/// * `text` - SQL DDL or a Mermaid `erDiagram`
/// * `format_hint` - `"sql"`, `"mermaid"`, or empty to auto-detect
///
/// # Returns
/// * Schema JSON, or `null` when no tables were found
#[wasm_bindgen(js_name = parseSchema)]
pub fn parse_schema(text: &str, format_hint: Option<String>) -> Result<Option<String>, JsValue> {
    let hint = match format_hint.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(name) => Some(name.parse::<SchemaFormat>().map_err(js_error)?),
    };
    crate::parse_schema(text, hint)
        .map(|schema| to_json(&schema))
        .transpose()
}

/// Lay out a schema
///
/// # Arguments
/// * `schema_json` - Schema JSON as returned by `parseSchema`
/// * `layout` - `"force"`, `"hierarchical"` or `"circular"`
/// * `view_mode` - `"2D"` or `"3D"`
#[wasm_bindgen(js_name = applyLayoutToSchema)]
pub fn apply_layout_to_schema(
    schema_json: &str,
    layout: &str,
    view_mode: &str,
) -> Result<String, JsValue> {
    let schema: DatabaseSchema = from_json(schema_json, "schema")?;
    let layout: LayoutKind = layout.parse().map_err(js_error)?;
    let view_mode: ViewMode = view_mode.parse().map_err(js_error)?;
    to_json(&crate::apply_layout_to_schema(&schema, layout, view_mode))
}

#[wasm_bindgen(js_name = areSchemasEqual)]
pub fn are_schemas_equal(a_json: &str, b_json: &str) -> Result<bool, JsValue> {
    let a: DatabaseSchema = from_json(a_json, "schema")?;
    let b: DatabaseSchema = from_json(b_json, "schema")?;
    Ok(crate::are_schemas_equal(&a, &b))
}

/// Cardinality notation from column facts; empty `pk_json` means unknown
#[wasm_bindgen(js_name = calculateCardinality)]
pub fn calculate_cardinality(pk_json: &str, fk_json: &str) -> Result<String, JsValue> {
    let pk: Option<ColumnFacts> = match pk_json.trim() {
        "" | "null" | "undefined" => None,
        json => Some(from_json(json, "column facts")?),
    };
    let fk: ColumnFacts = from_json(fk_json, "column facts")?;
    Ok(crate::calculate_cardinality(pk.as_ref(), &fk))
}

#[wasm_bindgen(js_name = parseCardinality)]
pub fn parse_cardinality(notation: &str) -> Result<String, JsValue> {
    to_json(&crate::parse_cardinality(notation))
}
