//! Stock-movement report service
//!
//! Orchestrates a reconciliation run: load a fresh snapshot from the
//! upstream API, build the reporting period, and hand both to the pure
//! engine in `shared`. Nothing is cached between runs; every query
//! recomputes from source.

use serde::Serialize;
use shared::models::{MovementRecord, OrphanedReference};
use shared::report::{reconcile, ReportPeriod};

use crate::error::{AppError, AppResult};
use crate::external::InventoryApiClient;

/// Stock-movement report service
#[derive(Clone)]
pub struct MovementReportService {
    inventory_api: InventoryApiClient,
}

/// A computed stock-movement report for one period
#[derive(Debug, Serialize)]
pub struct StockMovementReport {
    pub year: i32,
    /// 1-12; absent for whole-year reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    pub records: Vec<MovementRecord>,
    pub orphaned_references: Vec<OrphanedReference>,
}

impl MovementReportService {
    pub fn new(inventory_api: InventoryApiClient) -> Self {
        Self { inventory_api }
    }

    /// Compute the report for one calendar month or, when `month` is
    /// `None`, the whole year. `month` is 1-12 at this surface; the
    /// engine's period index is zero-based.
    pub async fn stock_movement(
        &self,
        year: i32,
        month: Option<u32>,
    ) -> AppResult<StockMovementReport> {
        let period = match month {
            Some(m) => {
                let month0 = m
                    .checked_sub(1)
                    .ok_or_else(|| AppError::Validation("month must be between 1 and 12".into()))?;
                ReportPeriod::month(month0, year)
                    .map_err(|e| AppError::Validation(e.to_string()))?
            }
            None => ReportPeriod::year(year),
        };

        let snapshot = self.inventory_api.load_snapshot().await?;
        tracing::debug!(
            items = snapshot.items.len(),
            categories = snapshot.categories.len(),
            requisitions = snapshot.requisitions.len(),
            "Snapshot materialized, reconciling"
        );

        let report = reconcile(&snapshot, period);
        if !report.orphaned.is_empty() {
            tracing::warn!(
                orphans = report.orphaned.len(),
                "Snapshot contained references to unknown item ids"
            );
        }

        Ok(StockMovementReport {
            year,
            month,
            records: report.records,
            orphaned_references: report.orphaned,
        })
    }
}
