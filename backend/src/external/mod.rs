//! Clients for external services

pub mod inventory_api;

pub use inventory_api::InventoryApiClient;
