// In crates/events/src/stock_event.rs

use core_types::{ItemId, StockItem};
use serde::{Deserialize, Serialize};

/// A change notification published by the item store.
///
/// On the wire this is `{"event": "CREATE_OR_UPDATE", "data": {...item}}` or
/// `{"event": "DELETE", "data": {"id": 12}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum StockItemEvent {
    #[serde(rename = "CREATE_OR_UPDATE")]
    CreateOrUpdate(StockItem),
    #[serde(rename = "DELETE")]
    Delete { id: ItemId },
}

impl StockItemEvent {
    pub fn item_id(&self) -> ItemId {
        match self {
            StockItemEvent::CreateOrUpdate(item) => item.id,
            StockItemEvent::Delete { id } => *id,
        }
    }

    /// Applies the event to a collection, replacing an item with the same id
    /// or appending it.
    pub fn apply_to(&self, items: &mut Vec<StockItem>) {
        match self {
            StockItemEvent::CreateOrUpdate(item) => {
                match items.iter_mut().find(|existing| existing.id == item.id) {
                    Some(existing) => *existing = item.clone(),
                    None => items.push(item.clone()),
                }
            }
            StockItemEvent::Delete { id } => items.retain(|existing| existing.id != *id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_event_reads_wire_format() {
        let event: StockItemEvent =
            serde_json::from_str(r#"{"event": "DELETE", "data": {"id": 12}}"#).unwrap();
        assert_eq!(event, StockItemEvent::Delete { id: 12 });
    }

    #[test]
    fn apply_replaces_appends_and_removes() {
        let mut items = vec![StockItem::new(1, "Braton"), StockItem::new(2, "Vectis Prime")];

        let mut renamed = StockItem::new(1, "Braton Prime");
        renamed.owned = 3;
        StockItemEvent::CreateOrUpdate(renamed).apply_to(&mut items);
        StockItemEvent::CreateOrUpdate(StockItem::new(3, "Soma")).apply_to(&mut items);
        StockItemEvent::Delete { id: 2 }.apply_to(&mut items);

        let names: Vec<_> = items.iter().map(|i| i.item_name.as_str()).collect();
        assert_eq!(names, ["Braton Prime", "Soma"]);
        assert_eq!(items[0].owned, 3);
    }
}
