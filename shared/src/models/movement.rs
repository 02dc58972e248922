//! Computed stock-movement records and reconciliation diagnostics

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-item stock movement for a reporting period
///
/// Computed fresh on every reconciliation run, never persisted.
/// Invariant: `last_month_stock = max(0, current_stock + issued_this_month
/// - received_this_month)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub item_id: i64,
    pub item_code: String,
    pub item_name: String,
    pub unit: String,
    pub category: String,
    pub category_id: Option<i64>,
    pub last_month_stock: i64,
    pub last_month_damaged: i64,
    pub received_this_month: i64,
    pub issued_this_month: i64,
    pub current_stock: i64,
    pub current_damaged: i64,
    pub unit_price: Decimal,
    pub total_value: Decimal,
}

/// Source collection of an orphaned reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanSource {
    Requisition,
    DamageReport,
    StockTransaction,
}

/// A reference to an item id absent from the items collection
///
/// Such rows are dropped from the totals, but materially affect the
/// report, so they are surfaced here instead of disappearing silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanedReference {
    pub source: OrphanSource,
    pub item_id: i64,
    pub rows: usize,
}

/// Output of a reconciliation run
///
/// Records are in items-collection order; orphan diagnostics are sorted
/// by source and item id, so identical inputs produce identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub records: Vec<MovementRecord>,
    pub orphaned: Vec<OrphanedReference>,
}
