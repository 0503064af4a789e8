// In crates/mutations/src/live.rs

use crate::{Result, StockItemApi};
use api_client::ApiClient;
use async_trait::async_trait;
use core_types::{CreateStockItem, ItemId, SellStockItem, StockItem, UpdateStockItem};

/// Sends mutations to the remote stock API.
///
/// Timeouts come from the `ApiClient` configuration; nothing is retried.
#[derive(Debug, Clone)]
pub struct LiveStockApi {
    api_client: ApiClient,
}

impl LiveStockApi {
    pub fn new(api_client: ApiClient) -> Self {
        Self { api_client }
    }
}

#[async_trait]
impl StockItemApi for LiveStockApi {
    fn name(&self) -> &'static str {
        "LiveStockApi"
    }

    async fn create(&self, request: &CreateStockItem) -> Result<StockItem> {
        Ok(self.api_client.create_stock_item(request).await?)
    }

    async fn update(&self, request: &UpdateStockItem) -> Result<StockItem> {
        Ok(self.api_client.update_stock_item(request).await?)
    }

    async fn sell(&self, request: &SellStockItem) -> Result<StockItem> {
        Ok(self.api_client.sell_stock_item(request).await?)
    }

    async fn delete(&self, id: ItemId) -> Result<()> {
        Ok(self.api_client.delete_stock_item(id).await?)
    }
}
