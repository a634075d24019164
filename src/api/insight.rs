//! Insight page operations for the WASM API
//!
//! - `annotateInsight`: annotate AI or static insight text with the built-in
//!   tables for a calendar
//! - `annotateWith`: annotate with caller-supplied glossary / catalog
//! - `configTitle`, `highlightCommand`: small page helpers

use wasm_bindgen::prelude::*;
use crate::annotate::Annotator;
use crate::api::helpers::{deserialize, deserialize_lenient, serialize, to_js_error};
use crate::glossary::{Calendar, Glossary};
use crate::insight::InsightContext;
use crate::visuals::{HighlightCommand, VisualCatalog, VisualContext, VisualTag, VisualTagId};
use crate::{wasm_info, wasm_log, wasm_warn};

/// Annotate insight text using the page's built-in tables
///
/// # Parameters
/// - `text`: raw insight text (lightweight markup + `[[RENDER:TAG]]` markers)
/// - `calendar`: trailing path segment of the page ("panchanga", "mayan")
/// - `context_js`: the stored calculation result (may be `null`; a malformed
///   value is ignored)
///
/// # Returns
/// `{ html, resolvedTags, blocks }`
#[wasm_bindgen(js_name = annotateInsight)]
pub fn annotate_insight(text: &str, calendar: &str, context_js: JsValue) -> Result<JsValue, JsValue> {
    wasm_info!("annotateInsight called: {} bytes, calendar='{}'", text.len(), calendar);

    let calendar = Calendar::from_path_segment(calendar);
    let context: InsightContext = deserialize_lenient(context_js, "Insight context deserialization error")
        .unwrap_or_default();

    let glossary = Glossary::for_calendar(calendar);
    let catalog = VisualCatalog::standard();
    let visual_context = context.visual_context();

    let output = Annotator::new(&glossary, &catalog, &visual_context).annotate(text);
    wasm_log!("  {} visual blocks rendered", output.resolved_tags.len());

    serialize(&output, "AnnotatedOutput serialization error")
}

/// Annotate insight text with caller-supplied tables
///
/// # Parameters
/// - `text`: raw insight text
/// - `glossary_js`: `{ "<term>": { def, target } }`
/// - `catalog_js`: array of VisualTag objects, or `null` for the standard catalog
/// - `context_js`: `{ key: value }` query parameters for visual modules, in
///   the caller's key order
///
/// A malformed table is logged and replaced by its default (empty glossary,
/// standard catalog, empty context); it never makes the call throw.
#[wasm_bindgen(js_name = annotateWith)]
pub fn annotate_with(
    text: &str,
    glossary_js: JsValue,
    catalog_js: JsValue,
    context_js: JsValue,
) -> Result<JsValue, JsValue> {
    wasm_info!("annotateWith called: {} bytes", text.len());

    let glossary: Glossary = deserialize_lenient(glossary_js, "Glossary deserialization error")
        .unwrap_or_default();
    let catalog = match deserialize_lenient::<Vec<VisualTag>>(catalog_js, "Visual catalog deserialization error") {
        Some(tags) => tags.into_iter().collect(),
        None => VisualCatalog::standard(),
    };
    let context: VisualContext = deserialize_lenient(context_js, "Visual context deserialization error")
        .unwrap_or_default();

    if glossary.is_empty() {
        wasm_warn!("annotateWith: empty glossary, no terms will be annotated");
    }

    let output = Annotator::new(&glossary, &catalog, &context).annotate(text);
    serialize(&output, "AnnotatedOutput serialization error")
}

/// Headline for the insights page
#[wasm_bindgen(js_name = configTitle)]
pub fn config_title(calendar: &str, context_js: JsValue) -> Result<String, JsValue> {
    let context: InsightContext = deserialize(context_js, "Insight context deserialization error")?;
    Ok(context.config_title(Calendar::from_path_segment(calendar)))
}

/// Scroll/pulse command for a glossary click
///
/// # Returns
/// `{ elementId, message: { action: "pulse", term } }`
#[wasm_bindgen(js_name = highlightCommand)]
pub fn highlight_command(tag: &str) -> Result<JsValue, JsValue> {
    let tag: VisualTagId = tag.parse().map_err(|e| to_js_error("highlightCommand", e))?;
    serialize(&HighlightCommand::for_tag(tag), "HighlightCommand serialization error")
}
