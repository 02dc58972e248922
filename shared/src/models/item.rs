//! Inventory item and category snapshot models

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::de;

/// An inventory item as served by the upstream API
///
/// Read-only snapshot row; the engine never mutates it. On-hand stock is
/// serialized under one of three field names depending on the endpoint
/// version, and `category` comes in four different encodings.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub item_code: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_quantity")]
    pub current_stock: Option<i64>,
    #[serde(default, deserialize_with = "de::lenient_quantity")]
    pub stock: Option<i64>,
    #[serde(default, deserialize_with = "de::lenient_quantity")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "de::lenient_decimal")]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub category: CategoryRef,
    #[serde(default, deserialize_with = "de::lenient_quantity")]
    pub category_id: Option<i64>,
    #[serde(default, rename = "categoryId", deserialize_with = "de::lenient_quantity")]
    pub category_id_camel: Option<i64>,
}

impl InventoryItem {
    /// On-hand quantity: `current_stock`, then `stock`, then `quantity`,
    /// first present wins, default 0.
    pub fn on_hand(&self) -> i64 {
        self.current_stock
            .or(self.stock)
            .or(self.quantity)
            .unwrap_or(0)
    }
}

/// The `category` field of an inventory item, normalized into a closed
/// set of encodings at the ingestion boundary
///
/// The upstream serializes category as an embedded object, a bare numeric
/// id, a numeric string or a free-text name. Numeric strings are promoted
/// to `NamedId` here so resolution never re-inspects raw values.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CategoryRef {
    Embedded {
        id: Option<i64>,
        name: Option<String>,
    },
    Id(i64),
    /// A numeric string such as `"3"`, carrying the parsed id
    NamedId(i64),
    Name(String),
    #[default]
    Absent,
}

impl CategoryRef {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => CategoryRef::Embedded {
                id: map.get("id").and_then(Value::as_i64),
                name: map
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
            },
            Value::Number(n) => match n.as_i64() {
                Some(id) => CategoryRef::Id(id),
                None => CategoryRef::Absent,
            },
            Value::String(s) => match s.trim().parse::<i64>() {
                Ok(id) => CategoryRef::NamedId(id),
                Err(_) => CategoryRef::Name(s.clone()),
            },
            _ => CategoryRef::Absent,
        }
    }
}

impl<'de> Deserialize<'de> for CategoryRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(CategoryRef::from_value(&value))
    }
}

/// A category row, used only as an id-to-name lookup table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}
