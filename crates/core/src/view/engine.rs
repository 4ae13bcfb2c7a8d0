use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, FilterCriteria, FilteredView};
use crate::domain::visit::VisitId;
use crate::errors::LoadError;
use crate::view::states::{LoadState, TransitionOutcome, ViewEvent, ViewEventKind};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ViewTransitionError {
    #[error("load result for {received} does not belong to {expected}")]
    StaleVisit { expected: VisitId, received: VisitId },
    #[error("catalog already settled in state {state:?}; {event:?} ignored")]
    AlreadySettled { state: LoadState, event: ViewEventKind },
}

/// Page state for one visit: load status, the decorated catalog, the active
/// criteria and the view derived from them.
///
/// Every accepted event recomputes the filtered view in full. Rejected events
/// leave the state untouched.
#[derive(Clone, Debug)]
pub struct CatalogView {
    visit_id: VisitId,
    state: LoadState,
    catalog: Option<Catalog>,
    failure: Option<LoadError>,
    criteria: FilterCriteria,
    filtered: FilteredView,
}

impl CatalogView {
    pub fn new(visit_id: VisitId) -> Self {
        Self {
            visit_id,
            state: LoadState::Loading,
            catalog: None,
            failure: None,
            criteria: FilterCriteria::default(),
            filtered: FilteredView::default(),
        }
    }

    pub fn visit_id(&self) -> VisitId {
        self.visit_id
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn failure(&self) -> Option<&LoadError> {
        self.failure.as_ref()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn filtered(&self) -> &FilteredView {
        &self.filtered
    }

    pub fn apply(&mut self, event: ViewEvent) -> Result<TransitionOutcome, ViewTransitionError> {
        let from = self.state;
        let kind = event.kind();

        match event {
            ViewEvent::CatalogLoaded { visit_id, products, fetched_at } => {
                self.ensure_pending(visit_id, kind)?;
                let catalog = Catalog::from_response(products, fetched_at);
                info!(
                    event_name = "catalog.view.loaded",
                    visit_id = %self.visit_id,
                    product_count = catalog.len(),
                    "catalog loaded"
                );
                self.catalog = Some(catalog);
                self.state = LoadState::Loaded;
            }
            ViewEvent::CatalogFailed { visit_id, error } => {
                self.ensure_pending(visit_id, kind)?;
                warn!(
                    event_name = "catalog.view.failed",
                    visit_id = %self.visit_id,
                    error_class = error.class(),
                    error = %error,
                    "catalog load failed"
                );
                self.failure = Some(error);
                self.state = LoadState::Failed;
            }
            ViewEvent::SearchChanged(search_term) => {
                self.criteria.search_term = search_term;
            }
            ViewEvent::CategoryChanged(selected_category) => {
                self.criteria.selected_category = selected_category;
            }
            ViewEvent::FiltersCleared => {
                self.criteria = FilterCriteria::default();
            }
        }

        self.refilter();
        debug!(
            event_name = "catalog.view.recomputed",
            visit_id = %self.visit_id,
            search_term = %self.criteria.search_term,
            selected_category = %self.criteria.selected_category,
            visible = self.filtered.len(),
            "filtered view recomputed"
        );

        Ok(TransitionOutcome { from, to: self.state, event: kind, visible: self.filtered.len() })
    }

    fn ensure_pending(
        &self,
        received: VisitId,
        event: ViewEventKind,
    ) -> Result<(), ViewTransitionError> {
        if received != self.visit_id {
            let error = ViewTransitionError::StaleVisit { expected: self.visit_id, received };
            warn!(event_name = "catalog.view.stale_result", error = %error, "load result rejected");
            return Err(error);
        }
        if self.state.is_terminal() {
            let error = ViewTransitionError::AlreadySettled { state: self.state, event };
            warn!(event_name = "catalog.view.late_result", error = %error, "load result rejected");
            return Err(error);
        }
        Ok(())
    }

    fn refilter(&mut self) {
        self.filtered = match &self.catalog {
            Some(catalog) => catalog.filter(&self.criteria),
            None => FilteredView::default(),
        };
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::domain::product::{Product, ProductId};
    use crate::domain::visit::VisitId;
    use crate::errors::LoadError;
    use crate::view::states::{LoadState, ViewEvent, ViewEventKind};

    use super::{CatalogView, ViewTransitionError};

    fn products() -> Vec<Product> {
        [("Red Shirt", "men's clothing"), ("Blue Hat", "men's clothing"), ("SSD", "electronics")]
            .iter()
            .enumerate()
            .map(|(index, (title, category))| Product {
                id: ProductId(index as u64 + 1),
                title: (*title).to_string(),
                description: String::new(),
                price: Decimal::new(2000, 2),
                category: (*category).to_string(),
                image: String::new(),
            })
            .collect()
    }

    fn loaded(view: &CatalogView) -> ViewEvent {
        ViewEvent::CatalogLoaded {
            visit_id: view.visit_id(),
            products: products(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn starts_loading_with_empty_view() {
        let view = CatalogView::new(VisitId::new());

        assert_eq!(view.state(), LoadState::Loading);
        assert!(view.filtered().is_empty());
        assert!(view.catalog().is_none());
        assert!(view.criteria().is_unconstrained());
    }

    #[test]
    fn load_success_shows_full_catalog() {
        let mut view = CatalogView::new(VisitId::new());

        let outcome = view.apply(loaded(&view)).expect("load should apply");

        assert_eq!(outcome.from, LoadState::Loading);
        assert_eq!(outcome.to, LoadState::Loaded);
        assert_eq!(outcome.event, ViewEventKind::CatalogLoaded);
        assert_eq!(outcome.visible, 3);
        assert_eq!(view.filtered().len(), 3);
    }

    #[test]
    fn load_failure_is_terminal_and_empty() {
        let mut view = CatalogView::new(VisitId::new());

        let outcome = view
            .apply(ViewEvent::CatalogFailed {
                visit_id: view.visit_id(),
                error: LoadError::Network("connection reset".to_string()),
            })
            .expect("failure should apply");

        assert_eq!(outcome.to, LoadState::Failed);
        assert!(view.filtered().is_empty());
        assert!(matches!(view.failure(), Some(LoadError::Network(_))));

        let late = view.apply(loaded(&view));
        assert_eq!(
            late,
            Err(ViewTransitionError::AlreadySettled {
                state: LoadState::Failed,
                event: ViewEventKind::CatalogLoaded,
            })
        );
        assert!(view.catalog().is_none());
    }

    #[test]
    fn stale_visit_result_is_rejected() {
        let mut view = CatalogView::new(VisitId::new());
        let other = VisitId::new();

        let result = view.apply(ViewEvent::CatalogLoaded {
            visit_id: other,
            products: products(),
            fetched_at: Utc::now(),
        });

        assert!(matches!(result, Err(ViewTransitionError::StaleVisit { received, .. }) if received == other));
        assert_eq!(view.state(), LoadState::Loading);
        assert!(view.catalog().is_none());
    }

    #[test]
    fn criteria_changes_recompute_view() {
        let mut view = CatalogView::new(VisitId::new());
        view.apply(loaded(&view)).expect("load");

        let outcome =
            view.apply(ViewEvent::SearchChanged("shirt".to_string())).expect("search applies");
        assert_eq!(outcome.visible, 1);
        assert_eq!(view.filtered().items()[0].title(), "Red Shirt");

        view.apply(ViewEvent::CategoryChanged("ELECTRONICS".to_string())).expect("category");
        assert!(view.filtered().is_empty());

        view.apply(ViewEvent::SearchChanged(String::new())).expect("search cleared");
        assert_eq!(view.filtered().len(), 1);
        assert_eq!(view.filtered().items()[0].title(), "SSD");

        view.apply(ViewEvent::FiltersCleared).expect("cleared");
        assert_eq!(view.filtered().len(), 3);
    }

    #[test]
    fn criteria_entered_while_loading_apply_once_catalog_arrives() {
        let mut view = CatalogView::new(VisitId::new());

        let outcome = view.apply(ViewEvent::SearchChanged("hat".to_string())).expect("search");
        assert_eq!(outcome.to, LoadState::Loading);
        assert_eq!(outcome.visible, 0);

        view.apply(loaded(&view)).expect("load");
        assert_eq!(view.filtered().len(), 1);
        assert_eq!(view.filtered().items()[0].title(), "Blue Hat");
    }

    #[test]
    fn reapplying_same_criteria_is_idempotent() {
        let mut view = CatalogView::new(VisitId::new());
        view.apply(loaded(&view)).expect("load");

        view.apply(ViewEvent::SearchChanged("s".to_string())).expect("first");
        let first = view.filtered().clone();
        view.apply(ViewEvent::SearchChanged("s".to_string())).expect("second");

        assert_eq!(&first, view.filtered());
    }
}
