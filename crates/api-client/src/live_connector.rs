// In crates/api-client/src/live_connector.rs

use crate::Result;
use async_stream::stream;
use events::StockItemEvent;
use futures::Stream;
use futures_util::StreamExt;
use std::time::Duration;
use tokio_tungstenite::connect_async;

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// A connector for the item store's change feed.
#[derive(Clone, Default)]
pub struct LiveConnector;

impl LiveConnector {
    pub fn new() -> Self {
        Self
    }

    /// Subscribes to stock item change events.
    ///
    /// The stream reconnects on its own after connection errors and never
    /// ends. Messages that are not stock item events are skipped.
    pub fn subscribe_to_stock_events(
        &self,
        url: &str,
    ) -> impl Stream<Item = Result<StockItemEvent>> + Send + use<> {
        let url = url.to_string();

        stream! {
            loop {
                tracing::info!(url = %url, "Connecting to stock event stream...");
                let (ws_stream, _) = match connect_async(url.as_str()).await {
                    Ok(s) => s,
                    Err(e) => {
                        tracing::error!(error = %e, "WebSocket connection failed. Retrying in 5s...");
                        tokio::time::sleep(RECONNECT_DELAY).await;
                        continue;
                    }
                };
                tracing::info!("Stock event stream connected.");

                let mut read = ws_stream.fuse();

                while let Some(message) = read.next().await {
                    match message {
                        Ok(msg) => {
                            if let Ok(text) = msg.to_text() {
                                match serde_json::from_str::<StockItemEvent>(text) {
                                    Ok(event) => {
                                        tracing::debug!(id = event.item_id(), "Stock event received.");
                                        yield Ok(event);
                                    }
                                    Err(e) => tracing::trace!(error = %e, "Ignoring non-stock message."),
                                }
                            }
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Error reading from WebSocket. Reconnecting...");
                            // Break the inner loop to trigger a reconnection.
                            break;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_feed_retries_without_yielding() {
        // Nothing listens on the discard port.
        let mut events = Box::pin(LiveConnector::new().subscribe_to_stock_events("ws://127.0.0.1:9"));

        let next = tokio::time::timeout(Duration::from_millis(200), events.next()).await;

        assert!(next.is_err());
    }
}
