use std::sync::Arc;

use storefront_core::{CatalogView, TransitionOutcome, ViewEvent, ViewTransitionError, VisitId};
use tracing::warn;

use crate::loader::{spawn_load, LoadHandle};
use crate::source::CatalogSource;

/// One activation of the catalog page: the view plus the fetch it started.
///
/// Closing (or dropping) the session aborts a fetch that is still running.
pub struct CatalogSession {
    view: CatalogView,
    load: Option<LoadHandle>,
}

impl CatalogSession {
    /// Creates the view in `Loading` and fires the single catalog request.
    /// Must be called inside a tokio runtime.
    pub fn open(source: Arc<dyn CatalogSource>) -> Self {
        let visit_id = VisitId::new();
        let load = spawn_load(source, visit_id);
        Self { view: CatalogView::new(visit_id), load: Some(load) }
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn visit_id(&self) -> VisitId {
        self.view.visit_id()
    }

    pub fn is_pending(&self) -> bool {
        self.load.is_some()
    }

    /// Waits for the load to finish and applies its result to the view.
    pub async fn settle(&mut self) -> &CatalogView {
        if let Some(mut handle) = self.load.take() {
            let event = handle.outcome().await;
            if let Err(error) = self.view.apply(event) {
                warn!(
                    event_name = "catalog.session.result_rejected",
                    visit_id = %self.view.visit_id(),
                    error = %error,
                    "load result was not applied"
                );
            }
        }
        &self.view
    }

    /// Applies a user input event (search, category, clear).
    pub fn input(&mut self, event: ViewEvent) -> Result<TransitionOutcome, ViewTransitionError> {
        self.view.apply(event)
    }

    pub fn close(mut self) {
        if let Some(handle) = self.load.take() {
            handle.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use storefront_core::{LoadError, LoadState, Product, ProductId, ViewEvent};

    use crate::source::StaticCatalogSource;

    use super::CatalogSession;

    fn products() -> Vec<Product> {
        ["Red Shirt", "Blue Hat"]
            .iter()
            .enumerate()
            .map(|(index, title)| Product {
                id: ProductId(index as u64 + 1),
                title: (*title).to_string(),
                description: String::new(),
                price: Decimal::new(1000, 2),
                category: "men's clothing".to_string(),
                image: String::new(),
            })
            .collect()
    }

    #[tokio::test]
    async fn settle_applies_loaded_catalog() {
        let mut session = CatalogSession::open(Arc::new(StaticCatalogSource::products(products())));
        assert_eq!(session.view().state(), LoadState::Loading);
        assert!(session.is_pending());

        let view = session.settle().await;

        assert_eq!(view.state(), LoadState::Loaded);
        assert_eq!(view.filtered().len(), 2);
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn settle_moves_to_failed_on_source_error() {
        let source = StaticCatalogSource::failing(LoadError::Network("dns failure".to_string()));
        let mut session = CatalogSession::open(Arc::new(source));

        let view = session.settle().await;

        assert_eq!(view.state(), LoadState::Failed);
        assert!(view.filtered().is_empty());
    }

    #[tokio::test]
    async fn input_after_settle_filters_catalog() {
        let mut session = CatalogSession::open(Arc::new(StaticCatalogSource::products(products())));
        session.settle().await;

        let outcome = session.input(ViewEvent::SearchChanged("shirt".to_string())).expect("search");

        assert_eq!(outcome.visible, 1);
        assert_eq!(session.view().filtered().items()[0].title(), "Red Shirt");
    }

    #[tokio::test]
    async fn settling_twice_keeps_first_result() {
        let mut session = CatalogSession::open(Arc::new(StaticCatalogSource::products(products())));
        session.settle().await;
        let view = session.settle().await;

        assert_eq!(view.state(), LoadState::Loaded);
        assert_eq!(view.filtered().len(), 2);
    }
}
