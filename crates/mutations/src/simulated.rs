// In crates/mutations/src/simulated.rs

use crate::{Error, Result, StockItemApi};
use async_trait::async_trait;
use chrono::Utc;
use core_types::{
    CreateStockItem, ItemId, PriceHistory, SellStockItem, StockItem, StockStatus, UpdateStockItem,
};
use events::StockItemEvent;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{broadcast, watch};

const EVENT_CHANNEL_SIZE: usize = 256;

struct Inventory {
    items: Vec<StockItem>,
    next_id: ItemId,
}

/// An in-memory item store for offline use and tests.
///
/// It applies mutations the way the real store does and publishes every
/// change both as a `StockItemEvent` and as a fresh collection snapshot.
pub struct SimulatedStockApi {
    inventory: Mutex<Inventory>,
    snapshot_tx: watch::Sender<Arc<Vec<StockItem>>>,
    event_tx: broadcast::Sender<StockItemEvent>,
}

impl SimulatedStockApi {
    pub fn new(items: Vec<StockItem>) -> Self {
        let next_id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let (snapshot_tx, _) = watch::channel(Arc::new(items.clone()));
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        Self {
            inventory: Mutex::new(Inventory { items, next_id }),
            snapshot_tx,
            event_tx,
        }
    }

    /// Receives the whole collection after every change.
    pub fn subscribe_items(&self) -> watch::Receiver<Arc<Vec<StockItem>>> {
        self.snapshot_tx.subscribe()
    }

    /// Receives one event per changed item.
    pub fn subscribe_events(&self) -> broadcast::Receiver<StockItemEvent> {
        self.event_tx.subscribe()
    }

    pub fn items(&self) -> Vec<StockItem> {
        self.lock().items.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inventory> {
        self.inventory.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inventory: &Inventory, event: StockItemEvent) {
        self.snapshot_tx.send_replace(Arc::new(inventory.items.clone()));
        let _ = self.event_tx.send(event);
    }

    fn position(inventory: &Inventory, id: ItemId) -> Result<usize> {
        inventory
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(Error::NotFound(id))
    }
}

impl Default for SimulatedStockApi {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl StockItemApi for SimulatedStockApi {
    fn name(&self) -> &'static str {
        "SimulatedStockApi"
    }

    /// Merges into an item with the same market id and sub type, averaging the
    /// purchase price, or creates a new pending item.
    async fn create(&self, request: &CreateStockItem) -> Result<StockItem> {
        if request.quantity <= 0 {
            return Err(Error::Rejected {
                reason: format!("Quantity must be positive, got {}", request.quantity),
            });
        }
        if request.bought < 0 {
            return Err(Error::Rejected {
                reason: format!("Purchase price cannot be negative, got {}", request.bought),
            });
        }

        let mut inventory = self.lock();
        let existing = inventory
            .items
            .iter_mut()
            .find(|item| item.wfm_id == request.wfm_id && item.sub_type == request.sub_type);

        let item = match existing {
            Some(item) => {
                let merged = item.owned.checked_add(request.quantity).and_then(|owned| {
                    let held = item.bought.checked_mul(item.owned)?;
                    let added = request.bought.checked_mul(request.quantity)?;
                    Some((owned, held.checked_add(added)?.checked_div(owned)?))
                });
                let Some((owned, bought)) = merged else {
                    return Err(Error::Rejected {
                        reason: format!(
                            "Cannot add {} to the {} held of {}",
                            request.quantity, item.owned, item.item_name
                        ),
                    });
                };
                item.bought = bought;
                item.owned = owned;
                item.updated_at = Utc::now();
                item.clone()
            }
            None => {
                let mut item = StockItem::new(inventory.next_id, request.item_name.clone());
                item.wfm_id = request.wfm_id.clone();
                item.sub_type = request.sub_type.clone();
                item.bought = request.bought;
                item.owned = request.quantity;
                item.status = StockStatus::Pending;
                inventory.next_id += 1;
                inventory.items.push(item.clone());
                item
            }
        };

        tracing::debug!(id = item.id, owned = item.owned, "Simulated store recorded purchase.");
        self.publish(&inventory, StockItemEvent::CreateOrUpdate(item.clone()));
        Ok(item)
    }

    async fn update(&self, request: &UpdateStockItem) -> Result<StockItem> {
        if request.minimum_price.is_some_and(|p| p < 0) {
            return Err(Error::Rejected {
                reason: "Minimum price cannot be negative".to_string(),
            });
        }
        if let Some(owned) = request.owned.filter(|owned| *owned < 0) {
            return Err(Error::Rejected {
                reason: format!("Owned quantity cannot be negative, got {}", owned),
            });
        }

        let mut inventory = self.lock();
        let index = Self::position(&inventory, request.id)?;
        let item = &mut inventory.items[index];

        if let Some(price) = request.minimum_price {
            item.minimum_price = Some(price);
        }
        if let Some(price) = request.list_price {
            item.list_price = Some(price);
        }
        if let Some(owned) = request.owned {
            item.owned = owned;
        }
        if let Some(is_hidden) = request.is_hidden {
            item.is_hidden = is_hidden;
        }
        if let Some(status) = request.status {
            item.status = status;
        }
        item.updated_at = Utc::now();
        let item = item.clone();

        self.publish(&inventory, StockItemEvent::CreateOrUpdate(item.clone()));
        Ok(item)
    }

    /// Decrements the owned quantity. An item sold out is removed from the
    /// store and returned with `owned == 0`.
    async fn sell(&self, request: &SellStockItem) -> Result<StockItem> {
        if request.quantity <= 0 {
            return Err(Error::Rejected {
                reason: format!("Quantity must be positive, got {}", request.quantity),
            });
        }

        let mut inventory = self.lock();
        let index = Self::position(&inventory, request.id)?;
        let item = &mut inventory.items[index];

        if request.quantity > item.owned {
            return Err(Error::Rejected {
                reason: format!(
                    "Cannot sell {} of {}, only {} owned",
                    request.quantity, item.item_name, item.owned
                ),
            });
        }

        let now = Utc::now();
        item.owned -= request.quantity;
        item.updated_at = now;
        item.price_history.push(PriceHistory {
            name: item.item_name.clone(),
            price: request.price,
            user_id: String::new(),
            created_at: now,
        });
        let item = item.clone();

        let event = if item.owned == 0 {
            inventory.items.remove(index);
            StockItemEvent::Delete { id: item.id }
        } else {
            StockItemEvent::CreateOrUpdate(item.clone())
        };
        self.publish(&inventory, event);
        Ok(item)
    }

    async fn delete(&self, id: ItemId) -> Result<()> {
        let mut inventory = self.lock();
        let index = Self::position(&inventory, id)?;
        inventory.items.remove(index);

        self.publish(&inventory, StockItemEvent::Delete { id });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::SubType;

    fn purchase(wfm_id: &str, name: &str, bought: i64, quantity: i64) -> CreateStockItem {
        CreateStockItem {
            wfm_id: wfm_id.to_string(),
            item_name: name.to_string(),
            bought,
            quantity,
            sub_type: None,
            report: false,
        }
    }

    #[tokio::test]
    async fn create_merges_same_item_and_averages_price() {
        let store = SimulatedStockApi::default();
        let first = store.create(&purchase("vectis", "Vectis Prime Set", 40, 1)).await.unwrap();
        let merged = store.create(&purchase("vectis", "Vectis Prime Set", 60, 3)).await.unwrap();

        assert_eq!(first.id, merged.id);
        assert_eq!(merged.owned, 4);
        assert_eq!(merged.bought, (40 + 60 * 3) / 4);
        assert_eq!(store.items().len(), 1);
    }

    #[tokio::test]
    async fn create_keeps_sub_types_apart() {
        let store = SimulatedStockApi::default();
        let mut ranked = purchase("arcane", "Arcane Energize", 100, 1);
        ranked.sub_type = Some(SubType::rank(5));
        store.create(&purchase("arcane", "Arcane Energize", 20, 1)).await.unwrap();
        store.create(&ranked).await.unwrap();

        assert_eq!(store.items().len(), 2);
    }

    #[tokio::test]
    async fn selling_everything_removes_item_and_publishes_delete() {
        let store = SimulatedStockApi::default();
        let item = store.create(&purchase("braton", "Braton Prime Set", 20, 2)).await.unwrap();
        let mut events = store.subscribe_events();
        let items = store.subscribe_items();

        let sold = store
            .sell(&SellStockItem { id: item.id, price: 35, quantity: 2, report: false })
            .await
            .unwrap();

        assert_eq!(sold.owned, 0);
        assert_eq!(sold.price_history.last().map(|p| p.price), Some(35));
        assert_eq!(events.recv().await.unwrap(), StockItemEvent::Delete { id: item.id });
        assert!(items.borrow().is_empty());
    }

    #[tokio::test]
    async fn overselling_is_rejected() {
        let store = SimulatedStockApi::new(vec![StockItem::new(1, "Soma Prime Set")]);
        let err = store
            .sell(&SellStockItem { id: 1, price: 10, quantity: 2, report: false })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Rejected { .. }));
        assert_eq!(store.items()[0].owned, 1);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id() {
        let store = SimulatedStockApi::default();
        assert!(matches!(
            store.update(&UpdateStockItem::new(9).hidden(true)).await,
            Err(Error::NotFound(9))
        ));
        assert!(matches!(store.delete(9).await, Err(Error::NotFound(9))));
    }

    #[tokio::test]
    async fn update_applies_only_set_fields() {
        let mut seed = StockItem::new(1, "Soma Prime Set");
        seed.list_price = Some(80);
        let store = SimulatedStockApi::new(vec![seed]);

        let updated = store
            .update(&UpdateStockItem::new(1).minimum_price(55))
            .await
            .unwrap();

        assert_eq!(updated.minimum_price, Some(55));
        assert_eq!(updated.list_price, Some(80));
    }

    #[tokio::test]
    async fn negative_owned_update_is_rejected() {
        let mut seed = StockItem::new(1, "Soma Prime Set");
        seed.wfm_id = "soma".to_string();
        let store = SimulatedStockApi::new(vec![seed]);

        let mut patch = UpdateStockItem::new(1);
        patch.owned = Some(-1);
        assert!(matches!(store.update(&patch).await, Err(Error::Rejected { .. })));

        let merged = store.create(&purchase("soma", "Soma Prime Set", 30, 1)).await.unwrap();
        assert_eq!(merged.owned, 2);
    }

    #[tokio::test]
    async fn merge_overflow_is_rejected_and_item_kept() {
        let mut seed = StockItem::new(1, "Vectis Prime Set");
        seed.wfm_id = "vectis".to_string();
        seed.bought = 10;
        seed.owned = i64::MAX / 2;
        let store = SimulatedStockApi::new(vec![seed.clone()]);

        let result = store.create(&purchase("vectis", "Vectis Prime Set", 10, 1)).await;

        assert!(matches!(result, Err(Error::Rejected { .. })));
        assert_eq!(store.items()[0].owned, seed.owned);
        assert_eq!(store.items()[0].bought, 10);
    }
}
