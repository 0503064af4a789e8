// In crates/core-types/src/requests.rs

use serde::{Deserialize, Serialize};

use crate::types::{ItemId, StockStatus, SubType};

/// Registers a purchase. The store merges it into an existing item with the
/// same `wfm_id` and sub type, or creates a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStockItem {
    pub wfm_id: String,
    pub item_name: String,
    /// Price paid per unit.
    pub bought: i64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<SubType>,
    /// Also close the matching buy order on the market.
    #[serde(default)]
    pub report: bool,
}

/// A partial update. Fields left as `None` are not touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStockItem {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owned: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StockStatus>,
}

impl UpdateStockItem {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn minimum_price(mut self, price: i64) -> Self {
        self.minimum_price = Some(price);
        self
    }

    pub fn hidden(mut self, is_hidden: bool) -> Self {
        self.is_hidden = Some(is_hidden);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.minimum_price.is_none()
            && self.list_price.is_none()
            && self.owned.is_none()
            && self.is_hidden.is_none()
            && self.status.is_none()
    }
}

/// Records a sale of `quantity` units at `price` each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellStockItem {
    pub id: ItemId,
    pub price: i64,
    pub quantity: i64,
    /// Also close the matching sell order on the market.
    #[serde(default)]
    pub report: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_patch_only_serializes_set_fields() {
        let patch = UpdateStockItem::new(3).minimum_price(120);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 3, "minimum_price": 120 }));
        assert!(!patch.is_empty());
        assert!(UpdateStockItem::new(3).is_empty());
    }
}
