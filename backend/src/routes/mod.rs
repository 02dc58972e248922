//! Route definitions for the Warehouse Inventory Portal

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/reports", report_routes())
}

/// Reporting routes
fn report_routes() -> Router<AppState> {
    Router::new().route(
        "/stock-movement",
        get(handlers::get_stock_movement_report),
    )
}
