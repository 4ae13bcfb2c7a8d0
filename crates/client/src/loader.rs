use std::sync::Arc;

use storefront_core::{LoadError, ViewEvent, VisitId};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::source::CatalogSource;

/// The in-flight fetch of one visit.
///
/// Dropping the handle aborts the task, so a view that goes away never has a
/// late response delivered to it.
#[derive(Debug)]
pub struct LoadHandle {
    visit_id: VisitId,
    task: JoinHandle<()>,
    receiver: Option<oneshot::Receiver<ViewEvent>>,
}

/// Spawns the one fetch a visit is allowed. Must be called inside a tokio runtime.
pub fn spawn_load(source: Arc<dyn CatalogSource>, visit_id: VisitId) -> LoadHandle {
    let (sender, receiver) = oneshot::channel();

    info!(
        event_name = "catalog.load.started",
        visit_id = %visit_id,
        source = %source.describe(),
        "catalog load started"
    );

    let task = tokio::spawn(async move {
        let event = match source.fetch().await {
            Ok(products) => ViewEvent::CatalogLoaded {
                visit_id,
                products,
                fetched_at: chrono::Utc::now(),
            },
            Err(error) => ViewEvent::CatalogFailed { visit_id, error },
        };
        if sender.send(event).is_err() {
            debug!(
                event_name = "catalog.load.discarded",
                visit_id = %visit_id,
                "load result dropped because nobody is waiting for it"
            );
        }
    });

    LoadHandle { visit_id, task, receiver: Some(receiver) }
}

impl LoadHandle {
    pub fn visit_id(&self) -> VisitId {
        self.visit_id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn cancel(&self) {
        if !self.task.is_finished() {
            info!(event_name = "catalog.load.cancelled", visit_id = %self.visit_id, "catalog load cancelled");
        }
        self.task.abort();
    }

    /// Waits for the load result. A cancelled or already consumed load yields
    /// `CatalogFailed` with [`LoadError::Cancelled`].
    pub async fn outcome(&mut self) -> ViewEvent {
        let cancelled =
            ViewEvent::CatalogFailed { visit_id: self.visit_id, error: LoadError::Cancelled };
        match self.receiver.take() {
            Some(receiver) => receiver.await.unwrap_or(cancelled),
            None => cancelled,
        }
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use storefront_core::{LoadError, Product, ViewEvent, VisitId};

    use crate::source::{CatalogSource, StaticCatalogSource};

    use super::spawn_load;

    /// Never answers; records whether its future was dropped mid-flight.
    struct HangingSource {
        dropped: Arc<AtomicBool>,
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl CatalogSource for HangingSource {
        async fn fetch(&self) -> Result<Vec<Product>, LoadError> {
            let _flag = DropFlag(self.dropped.clone());
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }

        fn describe(&self) -> String {
            "hanging".to_string()
        }
    }

    #[tokio::test]
    async fn delivers_loaded_event_tagged_with_visit() {
        let visit_id = VisitId::new();
        let mut handle = spawn_load(Arc::new(StaticCatalogSource::products(Vec::new())), visit_id);

        let event = handle.outcome().await;

        assert!(matches!(event, ViewEvent::CatalogLoaded { visit_id: id, .. } if id == visit_id));
    }

    #[tokio::test]
    async fn delivers_failure_event_for_source_errors() {
        let source = StaticCatalogSource::failing(LoadError::Format("not an array".to_string()));
        let mut handle = spawn_load(Arc::new(source), VisitId::new());

        let event = handle.outcome().await;

        assert!(matches!(event, ViewEvent::CatalogFailed { error: LoadError::Format(_), .. }));
    }

    #[tokio::test]
    async fn cancel_aborts_fetch_and_reports_cancelled() {
        let dropped = Arc::new(AtomicBool::new(false));
        let source = HangingSource { dropped: dropped.clone() };
        let mut handle = spawn_load(Arc::new(source), VisitId::new());

        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.cancel();
        let event = handle.outcome().await;

        assert!(matches!(event, ViewEvent::CatalogFailed { error: LoadError::Cancelled, .. }));
        assert!(dropped.load(Ordering::SeqCst), "fetch future should be dropped on cancel");
    }

    #[tokio::test]
    async fn dropping_handle_aborts_fetch() {
        let dropped = Arc::new(AtomicBool::new(false));
        let source = HangingSource { dropped: dropped.clone() };
        let handle = spawn_load(Arc::new(source), VisitId::new());

        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(handle);
        for _ in 0..50 {
            if dropped.load(Ordering::SeqCst) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert!(dropped.load(Ordering::SeqCst), "fetch future should be dropped with the handle");
    }

    #[tokio::test]
    async fn outcome_can_only_be_taken_once() {
        let mut handle = spawn_load(Arc::new(StaticCatalogSource::products(Vec::new())), VisitId::new());

        let _ = handle.outcome().await;
        let second = handle.outcome().await;

        assert!(matches!(second, ViewEvent::CatalogFailed { error: LoadError::Cancelled, .. }));
    }
}
