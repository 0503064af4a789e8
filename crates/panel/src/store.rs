// In crates/panel/src/store.rs

use core_types::StockItem;
use events::StockItemEvent;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// The read side of the external item store.
pub trait ItemStore: Send + Sync {
    /// The current collection. A new `Arc` is handed out after every change,
    /// so callers may compare pointers to detect one.
    fn snapshot(&self) -> Arc<Vec<StockItem>>;

    /// Whether the store is currently receiving updates.
    fn is_running(&self) -> bool;
}

/// An item store kept in a `watch` channel and fed by change events.
pub struct WatchItemStore {
    items_tx: watch::Sender<Arc<Vec<StockItem>>>,
    running: AtomicBool,
    minimum_owned: i64,
}

impl WatchItemStore {
    /// Items owning `minimum_owned` units or fewer are kept out of the collection.
    pub fn new(items: Vec<StockItem>, minimum_owned: i64) -> Self {
        let items = Self::retain_owned(items, minimum_owned);
        let (items_tx, _) = watch::channel(Arc::new(items));
        Self {
            items_tx,
            running: AtomicBool::new(false),
            minimum_owned,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<StockItem>>> {
        self.items_tx.subscribe()
    }

    /// Swaps in a complete collection, e.g. after a full reload.
    pub fn replace(&self, items: Vec<StockItem>) {
        let items = Self::retain_owned(items, self.minimum_owned);
        tracing::debug!(count = items.len(), "Stock item collection replaced.");
        self.items_tx.send_replace(Arc::new(items));
    }

    pub fn apply_event(&self, event: &StockItemEvent) {
        let minimum_owned = self.minimum_owned;
        self.items_tx.send_modify(|items| {
            let mut next = items.as_ref().clone();
            event.apply_to(&mut next);
            *items = Arc::new(Self::retain_owned(next, minimum_owned));
        });
        tracing::trace!(id = event.item_id(), "Applied stock item event.");
    }

    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Relaxed);
    }

    /// Pumps a change feed into the store on a background task.
    ///
    /// The store reports itself running until the feed ends.
    pub fn spawn_event_sync<S>(self: &Arc<Self>, events: S) -> JoinHandle<()>
    where
        S: Stream<Item = StockItemEvent> + Send + 'static,
    {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            store.set_running(true);
            let mut events = Box::pin(events);
            while let Some(event) = events.next().await {
                store.apply_event(&event);
            }
            store.set_running(false);
            tracing::warn!("Stock item change feed ended.");
        })
    }

    fn retain_owned(mut items: Vec<StockItem>, minimum_owned: i64) -> Vec<StockItem> {
        items.retain(|item| item.owned > minimum_owned);
        items
    }
}

impl ItemStore for WatchItemStore {
    fn snapshot(&self) -> Arc<Vec<StockItem>> {
        self.items_tx.borrow().clone()
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

/// Adapts a broadcast receiver to a stream, skipping over lag.
pub fn broadcast_events(
    rx: broadcast::Receiver<StockItemEvent>,
) -> impl Stream<Item = StockItemEvent> + Send {
    futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => return Some((event, rx)),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Stock event subscriber lagged behind.");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, owned: i64) -> StockItem {
        let mut item = StockItem::new(id, format!("Item {}", id));
        item.owned = owned;
        item
    }

    #[test]
    fn events_produce_a_new_snapshot() {
        let store = WatchItemStore::new(vec![item(1, 1)], 0);
        let before = store.snapshot();

        store.apply_event(&StockItemEvent::CreateOrUpdate(item(2, 3)));

        let after = store.snapshot();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after.len(), 2);
        assert_eq!(before.len(), 1);
    }

    #[test]
    fn minimum_owned_filters_items() {
        let store = WatchItemStore::new(vec![item(1, 1), item(2, 2), item(3, 0)], 1);
        assert_eq!(store.snapshot().iter().map(|i| i.id).collect::<Vec<_>>(), [2]);

        store.apply_event(&StockItemEvent::CreateOrUpdate(item(2, 1)));
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn event_sync_runs_until_feed_ends() {
        let store = Arc::new(WatchItemStore::new(Vec::new(), 0));
        let (tx, rx) = broadcast::channel(8);
        let mut items = store.subscribe();

        let handle = store.spawn_event_sync(broadcast_events(rx));
        tx.send(StockItemEvent::CreateOrUpdate(item(7, 1))).unwrap();
        items.wait_for(|items| items.len() == 1).await.unwrap();
        assert!(store.is_running());

        drop(tx);
        handle.await.unwrap();
        assert!(!store.is_running());
    }
}
