//! Display models for the catalog page.
//!
//! Everything here is formatting over a [`CatalogView`](crate::view::CatalogView);
//! renderers (terminal, JSON, HTML) consume these models without touching the
//! view state themselves.

pub mod card;
pub mod page;

pub use card::{format_money, truncate_description, truncate_title, ProductCard};
pub use page::{PageModel, PageStatus};
