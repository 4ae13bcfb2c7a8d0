use serde::Serialize;

use crate::catalog::{Catalog, CategoryOptions};
use crate::config::DisplayConfig;
use crate::errors::ApplicationError;
use crate::presentation::card::ProductCard;
use crate::view::{CatalogView, LoadState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    Loading,
    Loaded,
    Failed,
}

impl From<LoadState> for PageStatus {
    fn from(state: LoadState) -> Self {
        match state {
            LoadState::Loading => Self::Loading,
            LoadState::Loaded => Self::Loaded,
            LoadState::Failed => Self::Failed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageModel {
    pub status: PageStatus,
    pub notice: Option<String>,
    pub failure_class: Option<String>,
    pub search_term: String,
    pub selected_category: String,
    pub category_options: Vec<String>,
    pub total: usize,
    pub visible: usize,
    pub cards: Vec<ProductCard>,
}

impl PageModel {
    pub fn from_view(
        view: &CatalogView,
        display: &DisplayConfig,
        categories: &CategoryOptions,
    ) -> Self {
        let status = PageStatus::from(view.state());
        let notice = match status {
            PageStatus::Loading => Some("Loading products...".to_string()),
            PageStatus::Failed => Some(failure_notice(view)),
            PageStatus::Loaded if view.catalog().map_or(true, Catalog::is_empty) => {
                Some("The catalog has no products.".to_string())
            }
            PageStatus::Loaded if view.filtered().is_empty() => {
                Some("No products match the current filters.".to_string())
            }
            PageStatus::Loaded => None,
        };

        Self {
            status,
            notice,
            failure_class: view.failure().map(|error| error.class().to_string()),
            search_term: view.criteria().search_term.clone(),
            selected_category: view.criteria().selected_category.clone(),
            category_options: categories.options().to_vec(),
            total: view.catalog().map(|catalog| catalog.len()).unwrap_or(0),
            visible: view.filtered().len(),
            cards: view
                .filtered()
                .iter()
                .map(|product| ProductCard::from_product(product, display))
                .collect(),
        }
    }
}

fn failure_notice(view: &CatalogView) -> String {
    match view.failure() {
        Some(error) => ApplicationError::from(error.clone())
            .into_interface(view.visit_id().to_string())
            .user_message()
            .to_string(),
        None => "Products could not be loaded right now.".to_string(),
    }
}
