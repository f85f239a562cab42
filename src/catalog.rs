//! Filtering and sorting views over the product list.
//!
//! Pure functions: safe to recompute on every request. The service layer
//! memoizes results per (catalog revision, criteria) so unrelated requests
//! do not pay for re-filtering; see `services::product_service`.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::{CategoryKind, Product};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PriceSort {
    PriceAsc,
    PriceDesc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    pub category: Option<CategoryKind>,
    /// Matched against the product's subcategory, falling back to the name
    /// for products that have no subcategory.
    pub subcategory: Option<String>,
    pub max_price: Option<i64>,
    /// Free-text keyword matched against name and description.
    pub q: Option<String>,
    pub sort: Option<PriceSort>,
}

/// Produce the filtered subsequence, preserving the source order unless a
/// price sort is requested. Both sorts are stable, so products with equal
/// prices keep their relative order.
pub fn filter_products(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let mut out: Vec<Product> = products
        .iter()
        .filter(|p| matches(p, criteria))
        .cloned()
        .collect();

    match criteria.sort {
        Some(PriceSort::PriceAsc) => out.sort_by(|a, b| a.price.cmp(&b.price)),
        Some(PriceSort::PriceDesc) => out.sort_by(|a, b| b.price.cmp(&a.price)),
        None => {}
    }

    out
}

fn matches(product: &Product, criteria: &FilterCriteria) -> bool {
    if let Some(kind) = criteria.category {
        if product.category.kind() != kind {
            return false;
        }
    }

    if let Some(term) = non_empty(criteria.subcategory.as_deref()) {
        let haystack = product.subcategory.as_deref().unwrap_or(&product.name);
        if !contains_ignore_case(haystack, term) {
            return false;
        }
    }

    if let Some(max) = criteria.max_price {
        if product.price > max {
            return false;
        }
    }

    if let Some(keyword) = non_empty(criteria.q.as_deref()) {
        if !contains_ignore_case(&product.name, keyword)
            && !contains_ignore_case(&product.description, keyword)
        {
            return false;
        }
    }

    true
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty()).map(str::trim)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::Utc;

    fn product(id: i64, name: &str, price: i64, category: Category) -> Product {
        Product {
            id,
            name: name.to_string(),
            price,
            original_price: None,
            category,
            subcategory: None,
            description: String::new(),
            image: String::new(),
            extra_images: Vec::new(),
            rating: 0.0,
            review_count: 0,
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Product> {
        let mut tee = product(1, "Basic Tee", 300, Category::Apparel { sizes: vec!["S".into(), "M".into()] });
        tee.subcategory = Some("t-shirts".to_string());
        tee.description = "Plain cotton tee".to_string();
        let hoodie = product(2, "Zip Hoodie", 900, Category::Apparel { sizes: vec!["M".into(), "L".into()] });
        let sneaker = product(3, "Court Sneaker", 1200, Category::Footwear { sizes: vec!["42".into()] });
        let mug = product(4, "Enamel Mug", 150, Category::Home);
        vec![tee, hoodie, sneaker, mug]
    }

    #[test]
    fn empty_criteria_returns_everything_in_order() {
        let products = sample();
        let out = filter_products(&products, &FilterCriteria::default());
        assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn category_filter_keeps_only_that_kind() {
        let products = sample();
        let criteria = FilterCriteria {
            category: Some(CategoryKind::Apparel),
            ..Default::default()
        };
        let out = filter_products(&products, &criteria);
        assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn subcategory_term_falls_back_to_name() {
        let products = sample();
        // "hoodie" is nobody's subcategory, but matches the Zip Hoodie by name.
        let criteria = FilterCriteria {
            subcategory: Some("hoodie".to_string()),
            ..Default::default()
        };
        let out = filter_products(&products, &criteria);
        assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);

        // "t-shirt" matches via the tee's subcategory.
        let criteria = FilterCriteria {
            subcategory: Some("T-Shirt".to_string()),
            ..Default::default()
        };
        let out = filter_products(&products, &criteria);
        assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn max_price_is_inclusive() {
        let products = sample();
        let criteria = FilterCriteria {
            max_price: Some(900),
            ..Default::default()
        };
        let out = filter_products(&products, &criteria);
        assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn keyword_searches_name_and_description() {
        let products = sample();
        let criteria = FilterCriteria {
            q: Some("cotton".to_string()),
            ..Default::default()
        };
        let out = filter_products(&products, &criteria);
        assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn price_sort_orders_and_is_stable() {
        let mut products = sample();
        // Give the mug the same price as the tee to exercise stability.
        products[3].price = 300;
        let criteria = FilterCriteria {
            sort: Some(PriceSort::PriceAsc),
            ..Default::default()
        };
        let out = filter_products(&products, &criteria);
        assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 4, 2, 3]);

        let criteria = FilterCriteria {
            sort: Some(PriceSort::PriceDesc),
            ..Default::default()
        };
        let out = filter_products(&products, &criteria);
        assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 2, 1, 4]);
    }

    #[test]
    fn filters_compose() {
        let products = sample();
        let criteria = FilterCriteria {
            category: Some(CategoryKind::Apparel),
            max_price: Some(500),
            ..Default::default()
        };
        let out = filter_products(&products, &criteria);
        assert_eq!(out.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);
    }
}
