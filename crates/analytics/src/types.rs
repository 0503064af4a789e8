// In crates/analytics/src/types.rs

use core_types::StockStatus;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of items per status, over the whole unfiltered collection.
///
/// Every status is present, with zero for statuses no item currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCounts(BTreeMap<StockStatus, usize>);

impl StatusCounts {
    pub fn zeroed() -> Self {
        Self(StockStatus::ALL.into_iter().map(|s| (s, 0)).collect())
    }

    pub(crate) fn increment(&mut self, status: StockStatus) {
        *self.0.entry(status).or_insert(0) += 1;
    }

    pub fn get(&self, status: StockStatus) -> usize {
        self.0.get(&status).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StockStatus, usize)> + '_ {
        self.0.iter().map(|(status, count)| (*status, *count))
    }
}

impl Default for StatusCounts {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Bought,
    Listed,
    Profit,
}

impl SegmentKind {
    /// Translation key of the segment's label.
    pub fn label_key(&self) -> &'static str {
        match self {
            SegmentKind::Bought => "segment.bought",
            SegmentKind::Listed => "segment.listed",
            SegmentKind::Profit => "segment.profit",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SegmentKind::Bought => "blue",
            SegmentKind::Listed => "orange",
            SegmentKind::Profit => "green",
        }
    }
}

/// One part of the bought / listed / profit breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub label: &'static str,
    pub value: i64,
    /// Share of the three values' sum, in percent.
    pub percentage: f64,
    pub color: &'static str,
}

/// Everything the summary header shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySummary {
    pub item_count: usize,
    pub total_owned: i64,
    pub status_counts: StatusCounts,
    pub segments: [Segment; 3],
}
