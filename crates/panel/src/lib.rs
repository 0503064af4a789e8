// In crates/panel/src/lib.rs

pub mod error;
pub mod prompt;
pub mod store;

pub use error::{Error, Result};
pub use prompt::{Clipboard, NumberField, Prompt};
pub use store::{ItemStore, WatchItemStore, broadcast_events};

use analytics::{InventoryAnalytics, InventorySummary};
use core_types::{ItemId, StockItem, StockStatus, UpdateStockItem};
use events::Translator;
use mutations::MutationCoordinator;
use std::sync::Arc;
use view::{DerivedRows, PageSize, SortSpec, ViewState};

/// Fixed amounts for the quick minimum price buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceStep {
    Five,
    Ten,
}

impl PriceStep {
    pub fn amount(&self) -> i64 {
        match self {
            PriceStep::Five => 5,
            PriceStep::Ten => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// The stock item panel: a table over the store's collection, its summary
/// header, and the row actions that go through the mutation coordinator.
///
/// Derived rows and the summary are cached and only recomputed when the
/// store hands out a different collection or the view state changes.
pub struct StockPanel {
    store: Arc<dyn ItemStore>,
    coordinator: Arc<MutationCoordinator>,
    translator: Arc<dyn Translator>,
    analytics: InventoryAnalytics,
    view: ViewState,
    rows_cache: Option<(Arc<Vec<StockItem>>, ViewState, DerivedRows)>,
    summary_cache: Option<(Arc<Vec<StockItem>>, InventorySummary)>,
}

impl StockPanel {
    pub fn new(
        store: Arc<dyn ItemStore>,
        coordinator: Arc<MutationCoordinator>,
        translator: Arc<dyn Translator>,
        page_size: PageSize,
    ) -> Self {
        Self {
            store,
            coordinator,
            translator,
            analytics: InventoryAnalytics::new(),
            view: ViewState::with_page_size(page_size),
            rows_cache: None,
            summary_cache: None,
        }
    }

    pub fn coordinator(&self) -> &Arc<MutationCoordinator> {
        &self.coordinator
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn is_store_running(&self) -> bool {
        self.store.is_running()
    }

    /// Row actions and the creation form are disabled while this is true.
    pub fn busy(&self) -> bool {
        self.coordinator.busy()
    }

    // --- View state ---

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.view.set_query(query);
    }

    pub fn toggle_status(&mut self, status: StockStatus) {
        self.view.toggle_status(status);
    }

    pub fn set_page(&mut self, page: usize) {
        self.view.set_page(page);
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.view.set_page_size(page_size);
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.view.set_sort(sort);
    }

    // --- Derived state ---

    pub fn rows(&mut self) -> &DerivedRows {
        let items = self.store.snapshot();
        let fresh = matches!(
            &self.rows_cache,
            Some((cached, view, _)) if Arc::ptr_eq(cached, &items) && *view == self.view
        );
        if !fresh {
            self.rows_cache = None;
        }
        let (_, _, rows) = self.rows_cache.get_or_insert_with(|| {
            let rows = view::apply(&items, &self.view);
            (items, self.view.clone(), rows)
        });
        rows
    }

    pub fn summary(&mut self) -> &InventorySummary {
        let items = self.store.snapshot();
        let fresh = matches!(
            &self.summary_cache,
            Some((cached, _)) if Arc::ptr_eq(cached, &items)
        );
        if !fresh {
            self.summary_cache = None;
        }
        let (_, summary) = self.summary_cache.get_or_insert_with(|| {
            tracing::trace!(count = items.len(), "Recomputing inventory summary.");
            let summary = self.analytics.summarize(&items);
            (items, summary)
        });
        summary
    }

    // --- Row actions ---

    /// Asks for a new minimum price and applies it. A cancelled prompt
    /// changes nothing and returns `Ok(None)`.
    pub async fn edit_minimum_price(
        &self,
        id: ItemId,
        prompt: &dyn Prompt,
    ) -> Result<Option<StockItem>> {
        let item = self.actionable(id)?;
        let field = NumberField {
            name: "minimum_price",
            label: self.translator.translate("prompt.minimum_price.label"),
            min: Some(0),
            initial: item.minimum_price,
        };

        let Some(price) = self.ask(prompt, &field).await? else {
            return Ok(None);
        };
        let updated = self
            .coordinator
            .update(UpdateStockItem::new(id).minimum_price(price))
            .await?;
        Ok(Some(updated))
    }

    /// Asks for a sale price and sells a single unit.
    pub async fn manual_sell(&self, id: ItemId, prompt: &dyn Prompt) -> Result<Option<StockItem>> {
        let item = self.actionable(id)?;
        let field = NumberField {
            name: "price",
            label: self.translator.translate("prompt.sell.label"),
            min: Some(0),
            initial: item.list_price,
        };

        let Some(price) = self.ask(prompt, &field).await? else {
            return Ok(None);
        };
        let sold = self.coordinator.sell(id, price, 1).await?;
        Ok(Some(sold))
    }

    /// Moves the minimum price by a fixed step. An unset price counts as 0.
    ///
    /// A step that would take the price below zero is skipped without a
    /// request or a notification, returning `Ok(None)`.
    pub async fn adjust_minimum_price(
        &self,
        id: ItemId,
        step: PriceStep,
        direction: Direction,
    ) -> Result<Option<StockItem>> {
        let item = self.actionable(id)?;
        let current = item.minimum_price.unwrap_or(0);
        let next = match direction {
            Direction::Up => current.saturating_add(step.amount()),
            Direction::Down => current.saturating_sub(step.amount()),
        };
        if next < 0 {
            tracing::debug!(id, current, step = step.amount(), "Skipping minimum price below zero.");
            return Ok(None);
        }

        let updated = self
            .coordinator
            .update(UpdateStockItem::new(id).minimum_price(next))
            .await?;
        Ok(Some(updated))
    }

    pub async fn toggle_hidden(&self, id: ItemId) -> Result<StockItem> {
        let item = self.actionable(id)?;
        let updated = self
            .coordinator
            .update(UpdateStockItem::new(id).hidden(!item.is_hidden))
            .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: ItemId) -> Result<()> {
        self.actionable(id)?;
        self.coordinator.delete(id).await?;
        Ok(())
    }

    /// Copies the item's display name. Allowed while busy.
    pub fn copy_item_name(&self, id: ItemId, clipboard: &dyn Clipboard) -> Result<()> {
        let item = self.find(id)?;
        clipboard.write_text(&item.item_name)?;
        tracing::debug!(id, "Copied item name to clipboard.");
        Ok(())
    }

    fn find(&self, id: ItemId) -> Result<StockItem> {
        self.store
            .snapshot()
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(Error::ItemNotFound(id))
    }

    fn actionable(&self, id: ItemId) -> Result<StockItem> {
        if self.busy() {
            return Err(Error::Busy);
        }
        self.find(id)
    }

    async fn ask(&self, prompt: &dyn Prompt, field: &NumberField) -> Result<Option<i64>> {
        let Some(value) = prompt.ask_number(field).await else {
            tracing::debug!(field = field.name, "Prompt cancelled.");
            return Ok(None);
        };
        if let Some(min) = field.min.filter(|min| value < *min) {
            return Err(Error::BelowMinimum {
                field: field.name,
                value,
                min,
            });
        }
        Ok(Some(value))
    }
}
