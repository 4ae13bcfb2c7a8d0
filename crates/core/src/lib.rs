//! Storefront core: the catalog page as plain data.
//!
//! - `catalog` - discount rule, decorated catalog, filter engine, category options
//! - `view` - per-visit state machine (`Loading → Loaded | Failed`) plus criteria
//! - `presentation` - card and page display models
//! - `config` / `errors` - layered configuration and the error taxonomy

pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod presentation;
pub mod view;

pub use catalog::{filter_catalog, Catalog, CategoryOptions, FilterCriteria, FilteredView};
pub use domain::product::{DecoratedProduct, Product, ProductId};
pub use domain::visit::VisitId;
pub use errors::{ApplicationError, InterfaceError, LoadError};
pub use presentation::{PageModel, PageStatus, ProductCard};
pub use view::{CatalogView, LoadState, TransitionOutcome, ViewEvent, ViewTransitionError};
