//! Period-bounded stock-movement reconciliation

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{
    MovementRecord, OrphanSource, OrphanedReference, ReconciliationReport, Requisition,
    RequisitionStatus, StockSnapshot,
};
use crate::report::{resolve_category, ReportPeriod};

/// Reconcile a snapshot into per-item movement records for a period.
///
/// Stateless: identical snapshot and period always produce identical
/// output. Records come back in items-collection order; duplicate item
/// ids keep the first occurrence. Rows referencing item ids absent from
/// the items collection are dropped from the totals and reported in the
/// orphan diagnostics.
pub fn reconcile(snapshot: &StockSnapshot, period: ReportPeriod) -> ReconciliationReport {
    let names_by_id: HashMap<i64, String> = snapshot
        .categories
        .iter()
        .map(|c| (c.id, c.name.clone()))
        .collect();

    let (mut records, index) = build_baseline(snapshot, &names_by_id);
    let mut orphans = OrphanTracker::default();

    apply_issuances(&snapshot.requisitions, period, &index, &mut records, &mut orphans);
    apply_damage(snapshot, period, &index, &mut records, &mut orphans);
    apply_receipts(snapshot, period, &index, &mut records, &mut orphans);

    for record in &mut records {
        finalize(record);
    }

    ReconciliationReport {
        records,
        orphaned: orphans.into_sorted(),
    }
}

/// One zeroed movement record per distinct item id, first occurrence
/// wins. The insertion-ordered vec plus index map makes the dedup rule
/// explicit rather than an accident of map semantics.
fn build_baseline(
    snapshot: &StockSnapshot,
    names_by_id: &HashMap<i64, String>,
) -> (Vec<MovementRecord>, HashMap<i64, usize>) {
    let mut records = Vec::with_capacity(snapshot.items.len());
    let mut index = HashMap::with_capacity(snapshot.items.len());

    for item in &snapshot.items {
        if index.contains_key(&item.id) {
            continue;
        }
        let (category_id, category) = resolve_category(item, names_by_id);
        index.insert(item.id, records.len());
        records.push(MovementRecord {
            item_id: item.id,
            item_code: item.item_code.clone().unwrap_or_default(),
            item_name: item.name.clone().unwrap_or_default(),
            unit: item.unit.clone().unwrap_or_default(),
            category,
            category_id,
            last_month_stock: 0,
            last_month_damaged: 0,
            received_this_month: 0,
            issued_this_month: 0,
            current_stock: item.on_hand(),
            current_damaged: 0,
            unit_price: item.unit_price.unwrap_or_default(),
            total_value: Decimal::ZERO,
        });
    }

    (records, index)
}

fn apply_issuances(
    requisitions: &[Requisition],
    period: ReportPeriod,
    index: &HashMap<i64, usize>,
    records: &mut [MovementRecord],
    orphans: &mut OrphanTracker,
) {
    for req in requisitions {
        if req.status != RequisitionStatus::Approved {
            continue;
        }
        let Some(item_id) = req.item.item_id() else {
            continue;
        };
        let Some(date) = req.effective_date() else {
            continue;
        };
        if !period.contains(date) {
            continue;
        }
        match index.get(&item_id) {
            Some(&i) => records[i].issued_this_month += req.effective_quantity(),
            None => orphans.record(OrphanSource::Requisition, item_id, 1),
        }
    }
}

fn apply_damage(
    snapshot: &StockSnapshot,
    period: ReportPeriod,
    index: &HashMap<i64, usize>,
    records: &mut [MovementRecord],
    orphans: &mut OrphanTracker,
) {
    for (&item_id, reports) in &snapshot.damage_reports {
        let Some(&i) = index.get(&item_id) else {
            if !reports.is_empty() {
                orphans.record(OrphanSource::DamageReport, item_id, reports.len());
            }
            continue;
        };
        for report in reports {
            // non-positive damage quantities are malformed rows
            if report.damage_quantity <= 0 {
                continue;
            }
            let Some(date) = report.date else {
                continue;
            };
            if period.contains(date) {
                records[i].current_damaged += report.damage_quantity;
            } else if period.preceded_by(date) {
                records[i].last_month_damaged += report.damage_quantity;
            }
        }
    }
}

fn apply_receipts(
    snapshot: &StockSnapshot,
    period: ReportPeriod,
    index: &HashMap<i64, usize>,
    records: &mut [MovementRecord],
    orphans: &mut OrphanTracker,
) {
    for (&item_id, transactions) in &snapshot.transactions {
        let Some(&i) = index.get(&item_id) else {
            if !transactions.is_empty() {
                orphans.record(OrphanSource::StockTransaction, item_id, transactions.len());
            }
            continue;
        };
        for tx in transactions {
            if !tx.transaction_type.is_receipt() || tx.quantity <= 0 {
                continue;
            }
            let Some(date) = tx.date else {
                continue;
            };
            if period.contains(date) {
                records[i].received_this_month += tx.quantity;
            }
        }
    }
}

/// Derive opening stock and total value for a finished record.
///
/// Opening stock reconstructs what stock must have been at the start of
/// the period by reversing this period's net movement, clamped at zero
/// because transaction data may be incomplete and must never imply
/// negative historical stock.
fn finalize(record: &mut MovementRecord) {
    record.last_month_stock =
        (record.current_stock + record.issued_this_month - record.received_this_month).max(0);
    record.total_value = Decimal::from(record.current_stock) * record.unit_price;
}

/// Collects unknown-item-id references, aggregated per source and id
#[derive(Debug, Default)]
struct OrphanTracker {
    counts: HashMap<(OrphanSource, i64), usize>,
}

impl OrphanTracker {
    fn record(&mut self, source: OrphanSource, item_id: i64, rows: usize) {
        *self.counts.entry((source, item_id)).or_insert(0) += rows;
    }

    fn into_sorted(self) -> Vec<OrphanedReference> {
        let mut orphaned: Vec<OrphanedReference> = self
            .counts
            .into_iter()
            .map(|((source, item_id), rows)| OrphanedReference {
                source,
                item_id,
                rows,
            })
            .collect();
        orphaned.sort_by_key(|o| (o.source, o.item_id));
        orphaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DamageReport, InventoryItem, StockTransaction};

    fn items_from(json: serde_json::Value) -> Vec<InventoryItem> {
        serde_json::from_value(json).unwrap()
    }

    fn requisitions_from(json: serde_json::Value) -> Vec<Requisition> {
        serde_json::from_value(json).unwrap()
    }

    fn damage_from(json: serde_json::Value) -> Vec<DamageReport> {
        serde_json::from_value(json).unwrap()
    }

    fn transactions_from(json: serde_json::Value) -> Vec<StockTransaction> {
        serde_json::from_value(json).unwrap()
    }

    /// The worked example: gloves with one approved requisition and one
    /// received transaction in the target month.
    fn gloves_snapshot() -> StockSnapshot {
        StockSnapshot {
            items: items_from(serde_json::json!([{
                "id": 1,
                "name": "Gloves",
                "item_code": "GLV-01",
                "unit": "box",
                "stock": 50,
                "unit_price": 1000,
                "category": { "id": 2, "name": "Safety" }
            }])),
            categories: Vec::new(),
            requisitions: requisitions_from(serde_json::json!([{
                "item": 1,
                "status": "approved",
                "quantity": 10,
                "approved_quantity": 8,
                "created_at": "2024-05-12T09:00:00Z"
            }])),
            damage_reports: HashMap::new(),
            transactions: HashMap::from([(
                1,
                transactions_from(serde_json::json!([{
                    "date": "2024-05-20",
                    "transaction_type": "received",
                    "quantity": 30
                }])),
            )]),
        }
    }

    fn may_2024() -> ReportPeriod {
        ReportPeriod::month(4, 2024).unwrap()
    }

    #[test]
    fn test_gloves_scenario() {
        let report = reconcile(&gloves_snapshot(), may_2024());
        assert_eq!(report.records.len(), 1);
        assert!(report.orphaned.is_empty());

        let record = &report.records[0];
        assert_eq!(record.item_name, "Gloves");
        assert_eq!(record.category, "Safety");
        assert_eq!(record.category_id, Some(2));
        assert_eq!(record.issued_this_month, 8);
        assert_eq!(record.received_this_month, 30);
        assert_eq!(record.current_stock, 50);
        // max(0, 50 + 8 - 30) = 28
        assert_eq!(record.last_month_stock, 28);
        assert_eq!(record.total_value, Decimal::from(50_000));
    }

    #[test]
    fn test_idempotent_runs() {
        let snapshot = gloves_snapshot();
        let first = reconcile(&snapshot, may_2024());
        let second = reconcile(&snapshot, may_2024());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_opening_stock_clamped_at_zero() {
        let mut snapshot = gloves_snapshot();
        snapshot.requisitions = requisitions_from(serde_json::json!([{
            "item": 1,
            "status": "approved",
            "quantity": 2,
            "created_at": "2024-05-12"
        }]));
        snapshot.items[0].stock = Some(5);
        // received 30 > stock 5 + issued 2
        let report = reconcile(&snapshot, may_2024());
        assert_eq!(report.records[0].last_month_stock, 0);
    }

    #[test]
    fn test_rows_outside_period_ignored() {
        let mut snapshot = gloves_snapshot();
        snapshot.requisitions = requisitions_from(serde_json::json!([{
            "item": 1,
            "status": "approved",
            "approved_quantity": 8,
            "created_at": "2024-04-12"
        }]));
        let report = reconcile(&snapshot, may_2024());
        assert_eq!(report.records[0].issued_this_month, 0);
        assert_eq!(report.records[0].received_this_month, 30);
    }

    #[test]
    fn test_unapproved_requisitions_ignored() {
        let mut snapshot = gloves_snapshot();
        snapshot.requisitions = requisitions_from(serde_json::json!([
            { "item": 1, "status": "pending", "quantity": 5, "created_at": "2024-05-12" },
            { "item": 1, "status": "rejected", "quantity": 5, "created_at": "2024-05-12" }
        ]));
        let report = reconcile(&snapshot, may_2024());
        assert_eq!(report.records[0].issued_this_month, 0);
    }

    #[test]
    fn test_unknown_references_become_orphans() {
        let mut snapshot = gloves_snapshot();
        snapshot.requisitions.extend(requisitions_from(serde_json::json!([{
            "item": 999,
            "status": "approved",
            "quantity": 4,
            "created_at": "2024-05-12"
        }])));
        snapshot.damage_reports.insert(
            777,
            damage_from(serde_json::json!([
                { "date": "2024-05-03", "damage_quantity": 1 },
                { "date": "2024-05-04", "damage_quantity": 2 }
            ])),
        );

        let report = reconcile(&snapshot, may_2024());
        // output records untouched by the orphan rows
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].issued_this_month, 8);

        assert_eq!(
            report.orphaned,
            vec![
                OrphanedReference {
                    source: OrphanSource::Requisition,
                    item_id: 999,
                    rows: 1
                },
                OrphanedReference {
                    source: OrphanSource::DamageReport,
                    item_id: 777,
                    rows: 2
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_item_ids_first_wins() {
        let mut snapshot = gloves_snapshot();
        snapshot.items.extend(items_from(serde_json::json!([{
            "id": 1,
            "name": "Gloves (duplicate)",
            "stock": 999
        }])));
        let report = reconcile(&snapshot, may_2024());
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].item_name, "Gloves");
        assert_eq!(report.records[0].current_stock, 50);
    }

    #[test]
    fn test_damage_split_between_periods() {
        let mut snapshot = gloves_snapshot();
        snapshot.damage_reports.insert(
            1,
            damage_from(serde_json::json!([
                { "date": "2024-05-03", "damage_quantity": 2 },
                { "date": "2024-04-20", "damage_quantity": 3 },
                { "date": "2024-03-20", "damage_quantity": 7 },
                { "date": "2024-05-10", "damage_quantity": -4 }
            ])),
        );
        let report = reconcile(&snapshot, may_2024());
        assert_eq!(report.records[0].current_damaged, 2);
        assert_eq!(report.records[0].last_month_damaged, 3);
    }

    #[test]
    fn test_whole_year_mode_skips_previous_damage() {
        let mut snapshot = gloves_snapshot();
        snapshot.damage_reports.insert(
            1,
            damage_from(serde_json::json!([
                { "date": "2024-02-03", "damage_quantity": 2 },
                { "date": "2024-11-20", "damage_quantity": 3 },
                { "date": "2023-12-31", "damage_quantity": 7 }
            ])),
        );
        let report = reconcile(&snapshot, ReportPeriod::year(2024));
        assert_eq!(report.records[0].current_damaged, 5);
        // previous-period comparison only exists in month mode
        assert_eq!(report.records[0].last_month_damaged, 0);
    }

    #[test]
    fn test_non_receipt_transactions_ignored() {
        let mut snapshot = gloves_snapshot();
        snapshot.transactions.insert(
            1,
            transactions_from(serde_json::json!([
                { "date": "2024-05-20", "transaction_type": "RESTOCK", "quantity": 10 },
                { "date": "2024-05-21", "transaction_type": "issued", "quantity": 5 },
                { "date": "2024-05-22", "transaction_type": "received", "quantity": -3 },
                { "date": "2024-05-23", "transaction_type": "purchase", "quantity": 4 }
            ])),
        );
        let report = reconcile(&snapshot, may_2024());
        assert_eq!(report.records[0].received_this_month, 14);
    }

    #[test]
    fn test_empty_items_collection_yields_empty_report() {
        let mut snapshot = gloves_snapshot();
        snapshot.items.clear();
        let report = reconcile(&snapshot, may_2024());
        assert!(report.records.is_empty());
        // everything else now dangles
        assert_eq!(report.orphaned.len(), 2);
    }
}
