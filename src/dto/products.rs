use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Category, Product};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: i64,
    pub original_price: Option<i64>,
    pub category: Category,
    pub subcategory: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub extra_images: Vec<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: i32,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub original_price: Option<i64>,
    pub category: Option<Category>,
    pub subcategory: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub extra_images: Option<Vec<String>>,
    pub rating: Option<f32>,
    pub review_count: Option<i32>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
