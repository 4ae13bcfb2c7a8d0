use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::DisplayConfig;
use crate::domain::product::DecoratedProduct;

pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;
const ELLIPSIS: &str = "...";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: u64,
    pub image: String,
    pub title: String,
    pub description: String,
    /// Struck-through list price, present only for discounted items.
    pub original_price: Option<String>,
    pub price: String,
    pub badge: Option<String>,
    pub detail_href: String,
}

impl ProductCard {
    pub fn from_product(product: &DecoratedProduct, display: &DisplayConfig) -> Self {
        let discounted = product.is_discounted();
        Self {
            id: product.id().0,
            image: product.product().image.clone(),
            title: truncate_title(product.title(), display.title_width),
            description: truncate_description(&product.product().description),
            original_price: discounted.then(|| format_money(product.price())),
            price: format_money(product.discounted_price()),
            badge: discounted.then(|| format!("{}% OFF", product.discount())),
            detail_href: detail_href(&display.detail_base_path, product),
        }
    }
}

pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// Cuts `title` to at most `width` characters, marking the cut with `...`.
pub fn truncate_title(title: &str, width: usize) -> String {
    if title.chars().count() <= width {
        return title.to_string();
    }
    let kept: String = title.chars().take(width.saturating_sub(ELLIPSIS.len())).collect();
    format!("{}{ELLIPSIS}", kept.trim_end())
}

/// First 100 characters of the description followed by `...`, whatever its length.
pub fn truncate_description(description: &str) -> String {
    let preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!("{preview}{ELLIPSIS}")
}

fn detail_href(base_path: &str, product: &DecoratedProduct) -> String {
    format!("{}/{}", base_path.trim_end_matches('/'), product.id())
}
