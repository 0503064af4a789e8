// In crates/core-types/src/lib.rs

pub mod error;
pub mod requests;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use requests::{CreateStockItem, SellStockItem, UpdateStockItem};
pub use types::{ItemId, PriceHistory, StockItem, StockStatus, SubType};
