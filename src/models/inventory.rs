//! Persisted per-place status entity ("product").

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryStatus {
    #[default]
    Unknown,
    Available,
    SoldOut,
}

impl InventoryStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            InventoryStatus::Unknown => "UNKNOWN",
            InventoryStatus::Available => "AVAILABLE",
            InventoryStatus::SoldOut => "SOLD_OUT",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "UNKNOWN" => Some(InventoryStatus::Unknown),
            "AVAILABLE" => Some(InventoryStatus::Available),
            "SOLD_OUT" => Some(InventoryStatus::SoldOut),
            _ => None,
        }
    }

    /// Human label used by `list`.
    pub fn label(&self) -> &'static str {
        match self {
            InventoryStatus::Unknown => "unknown",
            InventoryStatus::Available => "available",
            InventoryStatus::SoldOut => "sold out",
        }
    }
}

/// Write payload for `upsert_inventory`.
///
/// `None` fields fall back to the column defaults on insert and keep the
/// stored value on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewInventory {
    pub place_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InventoryStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checked_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

impl NewInventory {
    pub fn for_place(place_id: i64) -> Self {
        Self {
            place_id,
            ..Self::default()
        }
    }
}

/// An `inventory` row.
#[derive(Debug, Clone, Serialize)]
pub struct Inventory {
    pub id: i64,
    pub place_id: i64,
    pub price: i64,
    pub status: InventoryStatus,
    pub stock_count: Option<i64>,
    pub last_checked_at: Option<String>,
    pub owner_id: Option<String>,
}
