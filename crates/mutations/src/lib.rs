// In crates/mutations/src/lib.rs

use async_trait::async_trait;
use core_types::{CreateStockItem, ItemId, SellStockItem, StockItem, UpdateStockItem};

pub mod coordinator;
pub mod error;
pub mod live;
pub mod simulated;
pub mod types;

// Re-export public types
pub use coordinator::MutationCoordinator;
pub use error::{Error, Result};
pub use live::LiveStockApi;
pub use simulated::SimulatedStockApi;
pub use types::{MutationKind, MutationPhase, MutationStatus};

/// The universal interface for the store that owns the stock items.
///
/// A `StockItemApi` applies mutation requests to the external item store and
/// returns the resulting item. It never touches a locally held collection;
/// the store publishes its own change notifications.
#[async_trait]
pub trait StockItemApi: Send + Sync {
    /// The name of the back end (e.g., "LiveStockApi", "SimulatedStockApi").
    fn name(&self) -> &'static str;

    /// Registers a purchase and returns the created or merged item.
    async fn create(&self, request: &CreateStockItem) -> Result<StockItem>;

    /// Applies a partial update and returns the updated item.
    async fn update(&self, request: &UpdateStockItem) -> Result<StockItem>;

    /// Records a sale and returns the item as it stands afterwards.
    async fn sell(&self, request: &SellStockItem) -> Result<StockItem>;

    /// Removes an item.
    async fn delete(&self, id: ItemId) -> Result<()>;
}
