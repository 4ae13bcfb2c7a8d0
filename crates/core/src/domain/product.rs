use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::discount;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog record exactly as the upstream listing endpoint returns it.
///
/// Unknown fields (ratings and the like) are ignored; a missing field fails
/// deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub image: String,
}

/// A product carrying the discount assigned at load time.
///
/// `discount` and `discounted_price` are fixed at construction from the
/// record's position in the fetch response and cannot be changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DecoratedProduct {
    #[serde(flatten)]
    product: Product,
    position: usize,
    discount: u32,
    discounted_price: Decimal,
}

impl DecoratedProduct {
    pub fn new(product: Product, position: usize) -> Self {
        let discount = discount::discount_for_position(position);
        let discounted_price = discount::discounted_price(product.price, discount);
        Self { product, position, discount, discounted_price }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    pub fn title(&self) -> &str {
        &self.product.title
    }

    pub fn category(&self) -> &str {
        &self.product.category
    }

    pub fn price(&self) -> Decimal {
        self.product.price
    }

    /// Zero-based index in the original fetch response.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Discount percentage, `0` when the item is not promoted.
    pub fn discount(&self) -> u32 {
        self.discount
    }

    pub fn is_discounted(&self) -> bool {
        self.discount > 0
    }

    pub fn discounted_price(&self) -> Decimal {
        self.discounted_price
    }
}
