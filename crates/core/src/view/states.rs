use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::visit::VisitId;
use crate::errors::LoadError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Loading,
    Loaded,
    Failed,
}

impl LoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    CatalogLoaded { visit_id: VisitId, products: Vec<Product>, fetched_at: DateTime<Utc> },
    CatalogFailed { visit_id: VisitId, error: LoadError },
    SearchChanged(String),
    CategoryChanged(String),
    FiltersCleared,
}

impl ViewEvent {
    pub fn kind(&self) -> ViewEventKind {
        match self {
            Self::CatalogLoaded { .. } => ViewEventKind::CatalogLoaded,
            Self::CatalogFailed { .. } => ViewEventKind::CatalogFailed,
            Self::SearchChanged(_) => ViewEventKind::SearchChanged,
            Self::CategoryChanged(_) => ViewEventKind::CategoryChanged,
            Self::FiltersCleared => ViewEventKind::FiltersCleared,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewEventKind {
    CatalogLoaded,
    CatalogFailed,
    SearchChanged,
    CategoryChanged,
    FiltersCleared,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub from: LoadState,
    pub to: LoadState,
    pub event: ViewEventKind,
    pub visible: usize,
}
