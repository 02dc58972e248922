//! Stock transaction snapshot model

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::de;

/// A stock transaction row, fetched grouped by item id
#[derive(Debug, Clone, Deserialize)]
pub struct StockTransaction {
    #[serde(default, deserialize_with = "de::lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub transaction_type: TransactionKind,
    #[serde(default, deserialize_with = "de::lenient_quantity_or_zero")]
    pub quantity: i64,
}

/// Known stock transaction types
///
/// Matching is case-insensitive; anything outside the known set maps to
/// `Other` and never counts as a receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransactionKind {
    Received,
    Restock,
    Purchase,
    Issued,
    Adjustment,
    Transfer,
    #[default]
    Other,
}

impl TransactionKind {
    /// Whether this transaction type indicates a stock increase.
    pub fn is_receipt(&self) -> bool {
        matches!(
            self,
            TransactionKind::Received | TransactionKind::Restock | TransactionKind::Purchase
        )
    }
}

impl<'de> Deserialize<'de> for TransactionKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.to_ascii_lowercase().as_str() {
            "received" => TransactionKind::Received,
            "restock" => TransactionKind::Restock,
            "purchase" => TransactionKind::Purchase,
            "issued" => TransactionKind::Issued,
            "adjustment" => TransactionKind::Adjustment,
            "transfer" => TransactionKind::Transfer,
            _ => TransactionKind::Other,
        })
    }
}
