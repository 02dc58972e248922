//! WebAssembly module for the Warehouse Inventory Portal
//!
//! Exposes the stock-movement reconciliation engine to the browser so a
//! cached snapshot can be re-reconciled client-side without a round trip.

use wasm_bindgen::prelude::*;

use shared::models::StockSnapshot;
use shared::report::{reconcile, ReportPeriod};

// Re-export shared types for use in JavaScript
pub use shared::models::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Reconcile a stock snapshot into a movement report.
///
/// `snapshot_json` holds the five source collections as served by the
/// backend. `month` is 1-12 for a monthly report; pass 0 for a
/// whole-year report. Returns the report as a JSON string.
#[wasm_bindgen]
pub fn reconcile_stock_movement(
    snapshot_json: &str,
    year: i32,
    month: i32,
) -> Result<String, JsValue> {
    reconcile_impl(snapshot_json, year, month).map_err(|e| JsValue::from_str(&e))
}

/// Number of distinct item ids in a snapshot.
#[wasm_bindgen]
pub fn count_reportable_items(snapshot_json: &str) -> Result<u32, JsValue> {
    count_items_impl(snapshot_json).map_err(|e| JsValue::from_str(&e))
}

fn count_items_impl(snapshot_json: &str) -> Result<u32, String> {
    let snapshot = parse_snapshot(snapshot_json)?;

    let mut seen = std::collections::HashSet::new();
    for item in &snapshot.items {
        seen.insert(item.id);
    }
    Ok(seen.len() as u32)
}

/// Sum of `total_value` across a report's records, as a decimal string.
#[wasm_bindgen]
pub fn movement_total_value(report_json: &str) -> Result<String, JsValue> {
    total_value_impl(report_json).map_err(|e| JsValue::from_str(&e))
}

fn total_value_impl(report_json: &str) -> Result<String, String> {
    let report: shared::models::ReconciliationReport = serde_json::from_str(report_json)
        .map_err(|e| format!("Invalid report JSON: {}", e))?;

    let total: rust_decimal::Decimal = report.records.iter().map(|r| r.total_value).sum();
    Ok(total.to_string())
}

fn reconcile_impl(snapshot_json: &str, year: i32, month: i32) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let period = period_from(year, month)?;
    let report = reconcile(&snapshot, period);

    serde_json::to_string(&report).map_err(|e| format!("Failed to serialize report: {}", e))
}

fn parse_snapshot(snapshot_json: &str) -> Result<StockSnapshot, String> {
    serde_json::from_str(snapshot_json).map_err(|e| format!("Invalid snapshot JSON: {}", e))
}

fn period_from(year: i32, month: i32) -> Result<ReportPeriod, String> {
    if month <= 0 {
        return Ok(ReportPeriod::year(year));
    }
    let month0 = (month as u32) - 1;
    ReportPeriod::month(month0, year).map_err(|e| format!("Invalid period: {}", e))
}
