//! Materialized snapshot of the upstream collections

use std::collections::HashMap;

use serde::Deserialize;

use super::{Category, DamageReport, InventoryItem, Requisition, StockTransaction};

/// The five source collections, fully fetched before reconciliation
///
/// Damage reports and stock transactions are grouped by item id, matching
/// how the upstream serves them. The engine treats the whole snapshot as
/// immutable; partial or streaming input is not supported.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockSnapshot {
    #[serde(default)]
    pub items: Vec<InventoryItem>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub requisitions: Vec<Requisition>,
    #[serde(default)]
    pub damage_reports: HashMap<i64, Vec<DamageReport>>,
    #[serde(default)]
    pub transactions: HashMap<i64, Vec<StockTransaction>>,
}
