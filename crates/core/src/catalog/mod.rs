pub mod categories;
pub mod discount;
pub mod filter;

use chrono::{DateTime, Utc};

use crate::domain::product::{DecoratedProduct, Product, ProductId};

pub use categories::CategoryOptions;
pub use filter::{filter_catalog, FilterCriteria, FilteredView};

/// The decorated product list of one page visit. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<DecoratedProduct>,
    fetched_at: DateTime<Utc>,
}

impl Catalog {
    /// Decorates `products` in response order; positions drive the discount.
    pub fn from_response(products: Vec<Product>, fetched_at: DateTime<Utc>) -> Self {
        let products = products
            .into_iter()
            .enumerate()
            .map(|(position, product)| DecoratedProduct::new(product, position))
            .collect();
        Self { products, fetched_at }
    }

    pub fn products(&self) -> &[DecoratedProduct] {
        &self.products
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, product_id: ProductId) -> Option<&DecoratedProduct> {
        self.products.iter().find(|product| product.id() == product_id)
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> FilteredView {
        filter_catalog(&self.products, criteria)
    }
}
