// In crates/core-types/src/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Identifier of a stock item as assigned by the item store.
pub type ItemId = i64;

/// The lifecycle state the trading bot assigns to a stock item.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    #[default]
    Pending,
    Live,
    ToLowProfit,
    NoSellers,
    NoBuyers,
    #[serde(rename = "inactive")]
    InActive,
    SmaLimit,
    OrderLimit,
    Overpriced,
    Underpriced,
}

impl StockStatus {
    /// Every status, in the order the status filter presents them.
    pub const ALL: [StockStatus; 10] = [
        StockStatus::Pending,
        StockStatus::Live,
        StockStatus::ToLowProfit,
        StockStatus::NoSellers,
        StockStatus::NoBuyers,
        StockStatus::InActive,
        StockStatus::SmaLimit,
        StockStatus::OrderLimit,
        StockStatus::Overpriced,
        StockStatus::Underpriced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Pending => "pending",
            StockStatus::Live => "live",
            StockStatus::ToLowProfit => "to_low_profit",
            StockStatus::NoSellers => "no_sellers",
            StockStatus::NoBuyers => "no_buyers",
            StockStatus::InActive => "inactive",
            StockStatus::SmaLimit => "sma_limit",
            StockStatus::OrderLimit => "order_limit",
            StockStatus::Overpriced => "overpriced",
            StockStatus::Underpriced => "underpriced",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        StockStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == needle)
            .ok_or_else(|| Error::UnknownStatus(s.to_string()))
    }
}

/// Variant information for items that come in ranks or grades.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amber_stars: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cyan_stars: Option<i64>,
}

impl SubType {
    pub fn rank(rank: i64) -> Self {
        Self {
            rank: Some(rank),
            ..Self::default()
        }
    }
}

/// A single observed market price for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

/// A tradable inventory record.
///
/// Prices are whole platinum amounts. `list_price` and `minimum_price` are
/// only present once the bot has listed the item or the user set a floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: ItemId,
    #[serde(default)]
    pub wfm_id: String,
    #[serde(default)]
    pub wfm_url: String,
    pub item_name: String,
    #[serde(default)]
    pub item_unique_name: String,
    #[serde(default)]
    pub sub_type: Option<SubType>,
    #[serde(default)]
    pub bought: i64,
    #[serde(default)]
    pub minimum_price: Option<i64>,
    #[serde(default)]
    pub list_price: Option<i64>,
    #[serde(default)]
    pub owned: i64,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub status: StockStatus,
    #[serde(default)]
    pub price_history: Vec<PriceHistory>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl StockItem {
    /// Creates a pending item with one unit owned and no prices set.
    pub fn new(id: ItemId, item_name: impl Into<String>) -> Self {
        let item_name = item_name.into();
        let wfm_url = item_name.to_lowercase().replace(' ', "_");
        let now = Utc::now();
        Self {
            id,
            wfm_id: String::new(),
            wfm_url,
            item_name,
            item_unique_name: String::new(),
            sub_type: None,
            bought: 0,
            minimum_price: None,
            list_price: None,
            owned: 1,
            is_hidden: false,
            status: StockStatus::Pending,
            price_history: Vec::new(),
            updated_at: now,
            created_at: now,
        }
    }
}
