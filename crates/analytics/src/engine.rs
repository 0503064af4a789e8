// In crates/analytics/src/engine.rs

use crate::types::{InventorySummary, Segment, SegmentKind, StatusCounts};
use core_types::StockItem;

/// Computes the summary statistics shown above the stock table.
///
/// All figures are taken over the full collection, regardless of which rows
/// the table currently shows.
#[derive(Debug, Default)]
pub struct InventoryAnalytics;

impl InventoryAnalytics {
    pub fn new() -> Self {
        Self
    }

    /// Builds the full summary for a collection.
    pub fn summarize(&self, items: &[StockItem]) -> InventorySummary {
        InventorySummary {
            item_count: items.len(),
            total_owned: items.iter().fold(0i64, |acc, i| acc.saturating_add(i.owned)),
            status_counts: self.status_counts(items),
            segments: self.segments(items),
        }
    }

    /// Counts items per status, zero-filled for absent statuses.
    pub fn status_counts(&self, items: &[StockItem]) -> StatusCounts {
        let mut counts = StatusCounts::zeroed();
        for item in items {
            counts.increment(item.status);
        }
        counts
    }

    /// Splits the inventory value into bought, listed and profit segments.
    ///
    /// Profit is `listed - bought` clamped at zero, and is zero while nothing
    /// is listed. With an empty or valueless collection every percentage is 0.
    pub fn segments(&self, items: &[StockItem]) -> [Segment; 3] {
        let bought = items.iter().fold(0i64, |acc, item| {
            acc.saturating_add(item.bought.saturating_mul(item.owned))
        });
        let listed = items.iter().fold(0i64, |acc, item| {
            acc.saturating_add(item.list_price.unwrap_or(0).saturating_mul(item.owned))
        });
        let profit = if listed > 0 {
            listed.saturating_sub(bought).max(0)
        } else {
            0
        };

        let total = bought as f64 + listed as f64 + profit as f64;
        let share = |value: i64| {
            if total == 0.0 {
                0.0
            } else {
                value as f64 / total * 100.0
            }
        };

        [
            (SegmentKind::Bought, bought),
            (SegmentKind::Listed, listed),
            (SegmentKind::Profit, profit),
        ]
        .map(|(kind, value)| Segment {
            kind,
            label: kind.label_key(),
            value,
            percentage: share(value),
            color: kind.color(),
        })
    }
}
