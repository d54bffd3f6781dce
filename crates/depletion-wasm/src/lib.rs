//! WASM bindings for depletion-engine.
//!
//! Exposes depletion-date prediction and consumption forecasts to JavaScript
//! via `wasm-bindgen`. Plans and results cross the boundary as JSON strings,
//! in the same shape `depletion-engine` reads and writes.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p depletion-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/depletion-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/depletion_wasm.wasm
//! ```

use chrono::NaiveDate;
use depletion_engine::{FixedClock, ForecastOptions, Plan};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers (plain `String` errors so they run natively under `cargo test`)
// ---------------------------------------------------------------------------

/// Parse a `YYYY-MM-DD` date.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    s.parse::<NaiveDate>()
        .map_err(|e| format!("Invalid date '{}': {}", s, e))
}

fn parse_plan(json: &str) -> Result<Plan, String> {
    Plan::from_json(json).map_err(|e| e.to_string())
}

fn predict(plan_json: &str, today: &str) -> Result<Option<String>, String> {
    let plan = parse_plan(plan_json)?;
    let clock = FixedClock(parse_date(today)?);
    Ok(plan.predict_end_date(&clock).map(|d| d.to_string()))
}

/// Ledger rows returned when the caller does not pass a limit.
const DEFAULT_LEDGER_LIMIT: usize = 1_000;

fn forecast_json(
    plan_json: &str,
    today: &str,
    horizon: Option<&str>,
    limit: Option<usize>,
) -> Result<String, String> {
    let plan = parse_plan(plan_json)?;
    let clock = FixedClock(parse_date(today)?);
    let options = ForecastOptions {
        horizon: horizon.map(parse_date).transpose()?,
        max_entries: Some(limit.unwrap_or(DEFAULT_LEDGER_LIMIT)),
    };
    let forecast = plan.forecast(&clock, options);

    serde_json::to_string(&forecast).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Predict the date a plan's stock runs out.
///
/// `plan_json` is `{"stock": n, "uses": [...]}`; `today` is a `YYYY-MM-DD`
/// reference date. Returns the depletion date as `YYYY-MM-DD`, or `undefined`
/// when the uses end before the stock does.
#[wasm_bindgen(js_name = "predictEndDate")]
pub fn predict_end_date(plan_json: &str, today: &str) -> Result<Option<String>, JsValue> {
    predict(plan_json, today).map_err(|e| JsValue::from_str(&e))
}

/// Run a full forecast and return it as a JSON string.
///
/// The result carries the outcome (`depleted`, `never_depleted`, or
/// `horizon_reached`), the remaining stock, and one ledger row per consumed
/// occurrence. `horizon`, when given, is the last `YYYY-MM-DD` simulated.
/// `limit` caps the ledger (default 1000 rows); `truncated` is set when rows
/// were dropped. The outcome is computed over the full simulation either way.
#[wasm_bindgen(js_name = "forecast")]
pub fn forecast(
    plan_json: &str,
    today: &str,
    horizon: Option<String>,
    limit: Option<u32>,
) -> Result<String, JsValue> {
    forecast_json(plan_json, today, horizon.as_deref(), limit.map(|n| n as usize))
        .map_err(|e| JsValue::from_str(&e))
}
