// In crates/api-client/src/lib.rs

use std::time::Duration;

use app_config::ApiSettings;
use core_types::{CreateStockItem, ItemId, SellStockItem, StockItem, UpdateStockItem};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod error;
pub mod live_connector;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use live_connector::LiveConnector;
pub use types::*;

impl ApiClient {
    /// Constructs a new ApiClient from ApiSettings.
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;
        let base_url = settings.rest_base_url.trim_end_matches('/').to_string();
        Ok(ApiClient {
            http_client,
            base_url,
        })
    }

    fn items_url(&self) -> String {
        format!("{}/stock/items", self.base_url)
    }

    fn item_url(&self, id: ItemId) -> String {
        format!("{}/stock/items/{}", self.base_url, id)
    }

    /// Sends a request and returns the status and raw body.
    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, String)> {
        let response = request.send().await.map_err(Error::RequestFailed)?;
        let status = response.status();
        let text = response.text().await.map_err(Error::RequestFailed)?;
        Ok((status, text))
    }

    /// Fetches the whole stock collection.
    ///
    /// This corresponds to the `GET /stock/items` endpoint.
    pub async fn get_stock_items(&self) -> Result<Vec<StockItem>> {
        let (status, body) = self.send(self.http_client.get(self.items_url())).await?;
        parse_body(status, &body)
    }

    /// Registers a purchase.
    ///
    /// This corresponds to the `POST /stock/items` endpoint.
    pub async fn create_stock_item(&self, request: &CreateStockItem) -> Result<StockItem> {
        tracing::debug!(wfm_id = %request.wfm_id, quantity = request.quantity, "Creating stock item.");
        let (status, body) = self
            .send(self.http_client.post(self.items_url()).json(request))
            .await?;
        parse_body(status, &body)
    }

    /// Applies a partial update.
    ///
    /// This corresponds to the `PATCH /stock/items/{id}` endpoint.
    pub async fn update_stock_item(&self, request: &UpdateStockItem) -> Result<StockItem> {
        tracing::debug!(id = request.id, "Updating stock item.");
        let (status, body) = self
            .send(self.http_client.patch(self.item_url(request.id)).json(request))
            .await?;
        parse_body(status, &body)
    }

    /// Records a sale.
    ///
    /// This corresponds to the `POST /stock/items/{id}/sell` endpoint.
    pub async fn sell_stock_item(&self, request: &SellStockItem) -> Result<StockItem> {
        tracing::debug!(id = request.id, price = request.price, quantity = request.quantity, "Selling stock item.");
        let url = format!("{}/sell", self.item_url(request.id));
        let (status, body) = self.send(self.http_client.post(url).json(request)).await?;
        parse_body(status, &body)
    }

    /// Deletes an item.
    ///
    /// This corresponds to the `DELETE /stock/items/{id}` endpoint.
    pub async fn delete_stock_item(&self, id: ItemId) -> Result<()> {
        tracing::debug!(id, "Deleting stock item.");
        let (status, body) = self.send(self.http_client.delete(self.item_url(id))).await?;
        check_status(status, &body)
    }
}

// Free function to allow api_client::new usage
pub fn new(settings: &ApiSettings) -> Result<ApiClient> {
    ApiClient::new(settings)
}

/// Turns a non-2xx response into `Error::ApiError`, using the error object
/// when the body carries one.
fn check_status(status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    let parsed: Option<ApiErrorBody> = serde_json::from_str(body).ok();
    let code = parsed
        .as_ref()
        .and_then(|b| b.code)
        .unwrap_or(i64::from(status.as_u16()));
    let msg = parsed
        .and_then(|b| b.message)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Unknown error".to_string());
    Err(Error::ApiError { code, msg })
}

/// Checks the status and deserializes a success body.
fn parse_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    check_status(status, body)?;
    let value: Value = serde_json::from_str(body).map_err(Error::DeserializationFailed)?;
    serde_json::from_value(value).map_err(Error::DeserializationFailed)
}
