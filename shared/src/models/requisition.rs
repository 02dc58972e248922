//! Requisition (stock request) snapshot model

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::de;

/// A requisition row from the upstream request workflow
///
/// Only rows whose status is `approved` count toward issued stock. The
/// `item` field is either a bare id or an embedded item object, and the
/// request timestamp lives under `created_at` or `date_requested`
/// depending on the endpoint version.
#[derive(Debug, Clone, Deserialize)]
pub struct Requisition {
    #[serde(default)]
    pub item: ItemRef,
    #[serde(default)]
    pub status: RequisitionStatus,
    #[serde(default, deserialize_with = "de::lenient_quantity")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "de::lenient_quantity")]
    pub approved_quantity: Option<i64>,
    #[serde(default, deserialize_with = "de::lenient_date")]
    pub created_at: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::lenient_date")]
    pub date_requested: Option<NaiveDate>,
}

impl Requisition {
    /// Request date: `created_at` wins over `date_requested`.
    pub fn effective_date(&self) -> Option<NaiveDate> {
        self.created_at.or(self.date_requested)
    }

    /// Granted quantity: `approved_quantity` wins over `quantity`,
    /// default 0, never negative.
    pub fn effective_quantity(&self) -> i64 {
        self.approved_quantity
            .or(self.quantity)
            .unwrap_or(0)
            .max(0)
    }
}

/// Reference to the requested item: a bare id or an embedded object
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ItemRef {
    Id(i64),
    Embedded(i64),
    #[default]
    Unresolved,
}

impl ItemRef {
    pub fn item_id(&self) -> Option<i64> {
        match self {
            ItemRef::Id(id) | ItemRef::Embedded(id) => Some(*id),
            ItemRef::Unresolved => None,
        }
    }
}

impl<'de> Deserialize<'de> for ItemRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let item_ref = match &value {
            Value::Number(n) => n.as_i64().map(ItemRef::Id),
            Value::String(s) => s.trim().parse().ok().map(ItemRef::Id),
            Value::Object(map) => map.get("id").and_then(Value::as_i64).map(ItemRef::Embedded),
            _ => None,
        };
        Ok(item_ref.unwrap_or(ItemRef::Unresolved))
    }
}

/// Requisition workflow status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequisitionStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    #[default]
    Unknown,
}
