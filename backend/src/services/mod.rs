//! Business logic services

pub mod movement_report;

pub use movement_report::MovementReportService;
