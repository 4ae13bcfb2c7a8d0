use serde::{Deserialize, Serialize};

use crate::domain::product::DecoratedProduct;

/// User-controlled filter inputs. An empty field imposes no constraint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_term: String,
    pub selected_category: String,
}

impl FilterCriteria {
    pub fn new(search_term: impl Into<String>, selected_category: impl Into<String>) -> Self {
        Self { search_term: search_term.into(), selected_category: selected_category.into() }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty() && self.selected_category.is_empty()
    }

    pub fn matches(&self, product: &DecoratedProduct) -> bool {
        self.matches_title(product.title()) && self.matches_category(product.category())
    }

    fn matches_title(&self, title: &str) -> bool {
        self.search_term.is_empty()
            || title.to_lowercase().contains(&self.search_term.to_lowercase())
    }

    fn matches_category(&self, category: &str) -> bool {
        self.selected_category.is_empty()
            || category.to_lowercase() == self.selected_category.to_lowercase()
    }
}

/// The products currently matching the active criteria, in fetch order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilteredView {
    items: Vec<DecoratedProduct>,
}

impl FilteredView {
    pub fn items(&self) -> &[DecoratedProduct] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecoratedProduct> {
        self.items.iter()
    }
}

pub fn filter_catalog(products: &[DecoratedProduct], criteria: &FilterCriteria) -> FilteredView {
    let items = products.iter().filter(|product| criteria.matches(product)).cloned().collect();
    FilteredView { items }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::product::{DecoratedProduct, Product, ProductId};

    use super::{filter_catalog, FilterCriteria};

    fn catalog(entries: &[(&str, &str)]) -> Vec<DecoratedProduct> {
        entries
            .iter()
            .enumerate()
            .map(|(index, (title, category))| {
                DecoratedProduct::new(
                    Product {
                        id: ProductId(index as u64 + 1),
                        title: (*title).to_string(),
                        description: format!("{title} description"),
                        price: Decimal::new(1000, 2),
                        category: (*category).to_string(),
                        image: format!("https://img.example/{index}.jpg"),
                    },
                    index,
                )
            })
            .collect()
    }

    fn titles(view: &super::FilteredView) -> Vec<&str> {
        view.iter().map(|product| product.title()).collect()
    }

    fn sample() -> Vec<DecoratedProduct> {
        catalog(&[
            ("Red Shirt", "men's clothing"),
            ("Blue Hat", "men's clothing"),
            ("Silver Ring", "jewelery"),
            ("Summer Shirt Dress", "women's clothing"),
            ("SSD 1TB", "electronics"),
        ])
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let products = catalog(&[("Red Shirt", "men's clothing"), ("Blue Hat", "men's clothing")]);

        let view = filter_catalog(&products, &FilterCriteria::new("shirt", ""));

        assert_eq!(titles(&view), vec!["Red Shirt"]);
    }

    #[test]
    fn category_is_case_insensitive_exact_match() {
        let products = sample();

        let view = filter_catalog(&products, &FilterCriteria::new("", "JEWELERY"));
        assert_eq!(titles(&view), vec!["Silver Ring"]);

        let partial = filter_catalog(&products, &FilterCriteria::new("", "jewel"));
        assert!(partial.is_empty());
    }

    #[test]
    fn both_criteria_must_hold() {
        let products = sample();

        let view = filter_catalog(&products, &FilterCriteria::new("shirt", "women's clothing"));

        assert_eq!(titles(&view), vec!["Summer Shirt Dress"]);
    }

    #[test]
    fn empty_criteria_return_full_catalog() {
        let products = sample();
        let criteria = FilterCriteria::default();

        let view = filter_catalog(&products, &criteria);

        assert!(criteria.is_unconstrained());
        assert_eq!(view.items(), products.as_slice());
    }

    #[test]
    fn missing_category_yields_empty_view() {
        let products = catalog(&[("Red Shirt", "men's clothing"), ("Blue Hat", "men's clothing")]);

        let view = filter_catalog(&products, &FilterCriteria::new("", "electronics"));

        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
    }

    #[test]
    fn members_match_and_non_members_fail_some_predicate() {
        let products = sample();
        let criteria_set = [
            FilterCriteria::new("s", ""),
            FilterCriteria::new("", "men's clothing"),
            FilterCriteria::new("shirt", "men's clothing"),
            FilterCriteria::new("ring", "electronics"),
        ];

        for criteria in &criteria_set {
            let view = filter_catalog(&products, criteria);

            for product in &products {
                let included = view.iter().any(|member| member.id() == product.id());
                assert_eq!(included, criteria.matches(product), "criteria {criteria:?}");
            }
            assert!(view.iter().all(|member| products.contains(member)));
        }
    }

    #[test]
    fn filtering_is_idempotent_and_keeps_source_intact() {
        let products = sample();
        let before = products.clone();
        let criteria = FilterCriteria::new("shirt", "");

        let first = filter_catalog(&products, &criteria);
        let second = filter_catalog(&products, &criteria);

        assert_eq!(first, second);
        assert_eq!(products, before);
    }

    #[test]
    fn filtering_preserves_assigned_discounts() {
        let products = sample();

        let view = filter_catalog(&products, &FilterCriteria::new("ssd", ""));

        let only = &view.items()[0];
        assert_eq!(only.position(), 4);
        assert_eq!(only.discount(), 0);
    }
}
