//! Shared types and logic for the Warehouse Inventory Portal
//!
//! This crate contains the snapshot models consumed from the upstream
//! inventory API and the stock-movement reconciliation engine, shared
//! between the backend and the browser (via WASM).

pub mod models;
pub mod report;

pub use models::*;
pub use report::*;
