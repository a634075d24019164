//! Birthday time machine operations for the WASM API

use wasm_bindgen::prelude::*;
use crate::api::helpers::{serialize, to_js_error};
use crate::drift::{self, DriftNote, DriftQuery};
use crate::{wasm_info, wasm_log};
use serde::Serialize;

/// Everything the time machine panel displays for one year
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimeMachineView {
    #[serde(flatten)]
    result: drift::DriftResult,
    note: DriftNote,
    explanation: String,
    pointer_left: String,
}

/// Estimate the lunisolar drift for a year
///
/// # Parameters
/// - `year`: whole year number; fractional or non-finite values are rejected
///
/// # Returns
/// DriftResult object (camelCase fields)
#[wasm_bindgen(js_name = estimateDrift)]
pub fn estimate_drift(year: f64) -> Result<JsValue, JsValue> {
    wasm_log!("estimateDrift called: year={}", year);

    let year = drift::year_from_number(year).map_err(|e| to_js_error("estimateDrift", e))?;
    let result = drift::estimate_drift(year);

    serialize(&result, "DriftResult serialization error")
}

/// Estimate drift against a custom anchor year
#[wasm_bindgen(js_name = estimateDriftFrom)]
pub fn estimate_drift_from(year: f64, anchor_year: f64) -> Result<JsValue, JsValue> {
    wasm_log!("estimateDriftFrom called: year={}, anchor={}", year, anchor_year);

    let year = drift::year_from_number(year).map_err(|e| to_js_error("estimateDriftFrom", e))?;
    let anchor = drift::year_from_number(anchor_year).map_err(|e| to_js_error("estimateDriftFrom", e))?;
    let result = DriftQuery::with_anchor(year, anchor).estimate();

    serialize(&result, "DriftResult serialization error")
}

/// Full time machine view for a slider value
///
/// Slider values are coerced by truncation, so `2030.7` reads as 2030.
///
/// # Returns
/// Object with the drift result fields plus `note`, `explanation` (HTML)
/// and `pointerLeft` (CSS value for the sync meter)
#[wasm_bindgen(js_name = timeMachine)]
pub fn time_machine(year: f64) -> Result<JsValue, JsValue> {
    let year = drift::coerce_year(year).map_err(|e| to_js_error("timeMachine", e))?;
    let result = drift::estimate_drift(year);

    let view = TimeMachineView {
        note: DriftNote::for_result(&result),
        explanation: drift::explain(&result),
        pointer_left: drift::sync_pointer_left(&result),
        result,
    };

    wasm_info!("timeMachine: year={} drift={} days {}", year, view.result.drift_magnitude_days, view.result.direction.as_str());
    serialize(&view, "TimeMachine serialization error")
}

/// Explanation sentence only (HTML)
#[wasm_bindgen(js_name = explainDrift)]
pub fn explain_drift(year: f64) -> Result<String, JsValue> {
    let year = drift::coerce_year(year).map_err(|e| to_js_error("explainDrift", e))?;
    Ok(drift::explain(&drift::estimate_drift(year)))
}
