use crate::models::inventory::InventoryStatus;
use crate::models::position::RawPosition;
use serde::{Deserialize, Serialize};

/// Unpersisted place record as yielded by a candidate source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub raw_name: String,
    pub raw_position: RawPosition,
    /// Free-text block scanned by the address heuristic.
    #[serde(default)]
    pub free_text: Option<String>,
    /// Preferred over the heuristic when present.
    #[serde(default)]
    pub structured_address: Option<String>,
    #[serde(default)]
    pub hints: InventoryHints,
}

impl Candidate {
    pub fn new(raw_name: &str, raw_position: RawPosition) -> Self {
        Self {
            raw_name: raw_name.to_string(),
            raw_position,
            free_text: None,
            structured_address: None,
            hints: InventoryHints::default(),
        }
    }

    pub fn with_free_text(mut self, text: &str) -> Self {
        self.free_text = Some(text.to_string());
        self
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.structured_address = Some(address.to_string());
        self
    }

    pub fn with_hints(mut self, hints: InventoryHints) -> Self {
        self.hints = hints;
        self
    }
}

/// Optional inventory signal carried by seed lists and captured snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryHints {
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub status: Option<InventoryStatus>,
    #[serde(default)]
    pub stock_count: Option<i64>,
}

impl InventoryHints {
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.status.is_none() && self.stock_count.is_none()
    }
}
