//! Damage report snapshot model

use chrono::NaiveDate;
use serde::Deserialize;

use super::de;

/// A damage report row, fetched grouped by item id
#[derive(Debug, Clone, Deserialize)]
pub struct DamageReport {
    #[serde(default, deserialize_with = "de::lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::lenient_quantity_or_zero")]
    pub damage_quantity: i64,
}
