//! Snapshot models for the Warehouse Inventory Portal
//!
//! These mirror the record shapes served by the upstream inventory API.
//! The upstream is inconsistent about field names and value types, so
//! numeric and date fields deserialize leniently and degrade to defaults
//! instead of failing the whole collection.

mod damage;
mod de;
mod item;
mod movement;
mod requisition;
mod snapshot;
mod transaction;

pub use damage::*;
pub use item::*;
pub use movement::*;
pub use requisition::*;
pub use snapshot::*;
pub use transaction::*;
