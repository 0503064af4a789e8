// In crates/analytics/src/lib.rs

pub mod engine;
pub mod types;

pub use engine::InventoryAnalytics;
pub use types::{InventorySummary, Segment, SegmentKind, StatusCounts};
