use serde::Deserialize;
use utoipa::ToSchema;

use crate::catalog::{FilterCriteria, PriceSort};
use crate::models::CategoryKind;

#[derive(Debug, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

// Pagination fields are inlined rather than #[serde(flatten)]ed: flattening
// buffers values as strings, which breaks integer fields under the Query
// extractor.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub category: Option<CategoryKind>,
    /// Subcategory term; falls back to matching the name for products
    /// without a subcategory.
    pub subcategory: Option<String>,
    pub max_price: Option<i64>,
    /// Free-text keyword over name and description.
    pub q: Option<String>,
    pub sort: Option<PriceSort>,
}

impl ProductQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            category: self.category,
            subcategory: self.subcategory.clone(),
            max_price: self.max_price,
            q: self.q.clone(),
            sort: self.sort,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RemoveItemQuery {
    pub size: Option<String>,
}
