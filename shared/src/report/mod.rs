//! Stock-movement reconciliation engine
//!
//! Pure, synchronous computation: given a fully materialized
//! [`StockSnapshot`](crate::models::StockSnapshot) and a
//! [`ReportPeriod`], derive one movement record per inventory item.
//! The engine carries no state between runs.

mod category;
mod engine;
mod period;

pub use category::resolve_category;
pub use engine::reconcile;
pub use period::{PeriodError, ReportPeriod};
