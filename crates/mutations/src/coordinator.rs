// In crates/mutations/src/coordinator.rs

use crate::types::{MutationKind, MutationPhase, MutationStatus};
use crate::{Error, Result, StockItemApi};
use core_types::{CreateStockItem, ItemId, SellStockItem, StockItem, UpdateStockItem};
use events::{Notification, NotificationSink, Severity, Translator};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Wraps the remote stock operations with per-kind request state and
/// user notifications.
///
/// Each kind runs at most one request at a time; a second request of the
/// same kind while one is pending is refused with `Error::InFlight`.
/// Different kinds are independent and may overlap. Failures are logged
/// with their detail and reported to the user only as a generic message.
pub struct MutationCoordinator {
    api: Arc<dyn StockItemApi>,
    sink: Arc<dyn NotificationSink>,
    translator: Arc<dyn Translator>,
    status_tx: watch::Sender<MutationStatus>,
}

impl MutationCoordinator {
    pub fn new(
        api: Arc<dyn StockItemApi>,
        sink: Arc<dyn NotificationSink>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        let (status_tx, _) = watch::channel(MutationStatus::default());
        Self {
            api,
            sink,
            translator,
            status_tx,
        }
    }

    pub fn api_name(&self) -> &'static str {
        self.api.name()
    }

    pub fn status(&self) -> MutationStatus {
        *self.status_tx.borrow()
    }

    /// Receives every phase change.
    pub fn subscribe(&self) -> watch::Receiver<MutationStatus> {
        self.status_tx.subscribe()
    }

    /// True while any mutation is pending.
    pub fn busy(&self) -> bool {
        self.status().busy()
    }

    pub async fn create(&self, request: CreateStockItem) -> Result<StockItem> {
        self.run(MutationKind::Create, self.api.create(&request), |item| {
            self.success_with_name(MutationKind::Create, &item.item_name)
        })
        .await
    }

    pub async fn update(&self, request: UpdateStockItem) -> Result<StockItem> {
        self.run(MutationKind::Update, self.api.update(&request), |item| {
            self.success_with_name(MutationKind::Update, &item.item_name)
        })
        .await
    }

    pub async fn sell(&self, id: ItemId, price: i64, quantity: i64) -> Result<StockItem> {
        self.sell_with_report(SellStockItem {
            id,
            price,
            quantity,
            report: false,
        })
        .await
    }

    pub async fn sell_with_report(&self, request: SellStockItem) -> Result<StockItem> {
        self.run(MutationKind::Sell, self.api.sell(&request), |item| {
            self.success_with_name(MutationKind::Sell, &item.item_name)
        })
        .await
    }

    pub async fn delete(&self, id: ItemId) -> Result<()> {
        self.run(MutationKind::Delete, self.api.delete(id), |_| {
            Notification::new(
                self.translator.translate("stock_item.delete.success.title"),
                self.translator.translate("stock_item.delete.success.message"),
                Severity::Success,
            )
        })
        .await
    }

    /// Drives one request through `Pending` to `Succeeded` or `Failed`.
    async fn run<T, F>(
        &self,
        kind: MutationKind,
        call: F,
        on_success: impl FnOnce(&T) -> Notification,
    ) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let pending = self.begin(kind)?;
        tracing::debug!(%kind, api = self.api.name(), "Stock item mutation started.");

        match call.await {
            Ok(value) => {
                pending.settle(MutationPhase::Succeeded);
                self.sink.notify(on_success(&value));
                Ok(value)
            }
            Err(e) => {
                tracing::error!(%kind, error = %e, "Stock item mutation failed.");
                pending.settle(MutationPhase::Failed);
                self.sink.notify(Notification::new(
                    self.translator.translate("notification.error.title"),
                    self.translator.translate("notification.error.message"),
                    Severity::Error,
                ));
                Err(e)
            }
        }
    }

    fn begin(&self, kind: MutationKind) -> Result<PendingMutation<'_>> {
        let mut accepted = false;
        self.status_tx.send_if_modified(|status| {
            if status.get(kind) == MutationPhase::Pending {
                return false;
            }
            status.set(kind, MutationPhase::Pending);
            accepted = true;
            true
        });

        if accepted {
            Ok(PendingMutation {
                status_tx: &self.status_tx,
                kind,
                settled: false,
            })
        } else {
            tracing::warn!(%kind, "Refusing mutation, one is already in flight.");
            Err(Error::InFlight(kind))
        }
    }

    fn success_with_name(&self, kind: MutationKind, name: &str) -> Notification {
        let prefix = format!("stock_item.{}.success", kind);
        Notification::new(
            self.translator.translate(&format!("{}.title", prefix)),
            self.translator
                .translate_with(&format!("{}.message", prefix), &[("name", name)]),
            Severity::Success,
        )
    }
}

/// A kind held in `Pending`. Dropping it unsettled, e.g. when the caller
/// abandons the request future, marks the kind `Failed`.
struct PendingMutation<'a> {
    status_tx: &'a watch::Sender<MutationStatus>,
    kind: MutationKind,
    settled: bool,
}

impl PendingMutation<'_> {
    fn settle(mut self, phase: MutationPhase) {
        self.publish(phase);
        self.settled = true;
    }

    fn publish(&self, phase: MutationPhase) {
        let kind = self.kind;
        self.status_tx.send_modify(|status| status.set(kind, phase));
    }
}

impl Drop for PendingMutation<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!(kind = %self.kind, "Stock item mutation abandoned before it settled.");
            self.publish(MutationPhase::Failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimulatedStockApi;
    use async_trait::async_trait;
    use events::EnglishCatalog;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::{Notify, broadcast};

    fn coordinator(
        api: Arc<dyn StockItemApi>,
    ) -> (MutationCoordinator, broadcast::Receiver<Notification>) {
        let (tx, rx) = broadcast::channel(16);
        (
            MutationCoordinator::new(api, Arc::new(tx), Arc::new(EnglishCatalog)),
            rx,
        )
    }

    /// Rejects every request and counts how many reached it.
    #[derive(Default)]
    struct RejectingApi {
        calls: AtomicUsize,
    }

    impl RejectingApi {
        fn reject(&self) -> Error {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Error::Rejected {
                reason: "store unavailable".to_string(),
            }
        }
    }

    #[async_trait]
    impl StockItemApi for RejectingApi {
        fn name(&self) -> &'static str {
            "RejectingApi"
        }
        async fn create(&self, _: &CreateStockItem) -> Result<StockItem> {
            Err(self.reject())
        }
        async fn update(&self, _: &UpdateStockItem) -> Result<StockItem> {
            Err(self.reject())
        }
        async fn sell(&self, _: &SellStockItem) -> Result<StockItem> {
            Err(self.reject())
        }
        async fn delete(&self, _: ItemId) -> Result<()> {
            Err(self.reject())
        }
    }

    /// Holds every delete until released.
    #[derive(Default)]
    struct GatedApi {
        gate: Notify,
    }

    #[async_trait]
    impl StockItemApi for GatedApi {
        fn name(&self) -> &'static str {
            "GatedApi"
        }
        async fn create(&self, request: &CreateStockItem) -> Result<StockItem> {
            Ok(StockItem::new(1, request.item_name.clone()))
        }
        async fn update(&self, request: &UpdateStockItem) -> Result<StockItem> {
            Ok(StockItem::new(request.id, "Updated"))
        }
        async fn sell(&self, request: &SellStockItem) -> Result<StockItem> {
            Ok(StockItem::new(request.id, "Sold"))
        }
        async fn delete(&self, _: ItemId) -> Result<()> {
            self.gate.notified().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn create_success_names_the_item() {
        let (coordinator, mut rx) = coordinator(Arc::new(SimulatedStockApi::default()));

        let item = coordinator
            .create(CreateStockItem {
                wfm_id: "vectis".to_string(),
                item_name: "Vectis Prime Set".to_string(),
                bought: 45,
                quantity: 1,
                sub_type: None,
                report: false,
            })
            .await
            .unwrap();

        let note = rx.try_recv().unwrap();
        assert_eq!(note.severity, Severity::Success);
        assert_eq!(note.title, "Item added");
        assert_eq!(note.message, "Vectis Prime Set has been added to your stock.");
        assert_eq!(item.owned, 1);
        assert_eq!(coordinator.status().create, MutationPhase::Succeeded);
    }

    #[tokio::test]
    async fn delete_success_has_no_name() {
        let api = Arc::new(SimulatedStockApi::new(vec![StockItem::new(4, "Soma")]));
        let (coordinator, mut rx) = coordinator(api);

        coordinator.delete(4).await.unwrap();

        let note = rx.try_recv().unwrap();
        assert_eq!(note.message, "The item has been removed from your stock.");
    }

    #[tokio::test]
    async fn failure_reports_generic_error_and_returns_err() {
        let (coordinator, mut rx) = coordinator(Arc::new(RejectingApi::default()));

        let result = coordinator.delete(4).await;

        assert!(matches!(result, Err(Error::Rejected { .. })));
        let note = rx.try_recv().unwrap();
        assert_eq!(note.severity, Severity::Error);
        assert_eq!(note.title, "Something went wrong");
        assert!(!note.message.contains("store unavailable"));
        assert_eq!(coordinator.status().delete, MutationPhase::Failed);
        assert!(!coordinator.busy());
    }

    #[tokio::test]
    async fn failed_request_is_not_retried() {
        let api = Arc::new(RejectingApi::default());
        let (coordinator, _rx) = coordinator(api.clone());

        let _ = coordinator.sell(1, 10, 1).await;

        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn same_kind_is_single_flight_but_other_kinds_proceed() {
        let api = Arc::new(GatedApi::default());
        let (coordinator, mut rx) = coordinator(api.clone());
        let coordinator = Arc::new(coordinator);
        let mut status = coordinator.subscribe();

        let pending = tokio::spawn({
            let coordinator = coordinator.clone();
            async move { coordinator.delete(1).await }
        });
        status
            .wait_for(|s| s.delete == MutationPhase::Pending)
            .await
            .unwrap();
        assert!(coordinator.busy());

        assert!(matches!(
            coordinator.delete(2).await,
            Err(Error::InFlight(MutationKind::Delete))
        ));
        coordinator.update(UpdateStockItem::new(3).hidden(true)).await.unwrap();
        assert!(coordinator.busy());

        api.gate.notify_one();
        pending.await.unwrap().unwrap();
        assert!(!coordinator.busy());

        // One success for the update, one for the delete; the refused delete is silent.
        let mut titles = Vec::new();
        while let Ok(note) = rx.try_recv() {
            titles.push(note.title);
        }
        assert_eq!(titles, ["Item updated", "Item deleted"]);
    }

    #[tokio::test]
    async fn abandoned_request_does_not_stay_pending() {
        let api = Arc::new(GatedApi::default());
        let (coordinator, mut rx) = coordinator(api.clone());

        let timed_out = tokio::time::timeout(Duration::from_millis(50), coordinator.delete(1)).await;

        assert!(timed_out.is_err());
        assert!(!coordinator.busy());
        assert_eq!(coordinator.status().delete, MutationPhase::Failed);
        assert!(rx.try_recv().is_err());

        // The next delete goes through instead of being refused as in flight.
        api.gate.notify_one();
        coordinator.delete(1).await.unwrap();
        assert_eq!(coordinator.status().delete, MutationPhase::Succeeded);
    }
}
