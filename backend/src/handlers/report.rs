//! Stock-movement report handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::movement_report::{MovementReportService, StockMovementReport};
use crate::AppState;

#[derive(Deserialize)]
pub struct StockMovementQuery {
    pub year: i32,
    /// 1-12; omit for a whole-year report
    pub month: Option<u32>,
}

/// Get the stock-movement reconciliation report for a period
pub async fn get_stock_movement_report(
    State(state): State<AppState>,
    Query(query): Query<StockMovementQuery>,
) -> AppResult<Json<StockMovementReport>> {
    if let Some(month) = query.month {
        if !(1..=12).contains(&month) {
            return Err(AppError::Validation(
                "month must be between 1 and 12".to_string(),
            ));
        }
    }

    let service = MovementReportService::new(state.inventory_api.clone());
    let report = service.stock_movement(query.year, query.month).await?;
    Ok(Json(report))
}
