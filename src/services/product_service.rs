use std::sync::Arc;

use chrono::Utc;
use sea_orm::{EntityTrait, QueryOrder};

use crate::{
    catalog::{self, FilterCriteria},
    entity::products::{Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    models::{Category, Product},
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
};
use crate::dto::products::ProductList;

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let filtered = filtered_catalog(state, query.criteria()).await?;

    let items: Vec<Product> = filtered
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect();

    let meta = Meta::new(page, limit, filtered.len() as i64);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: i64) -> AppResult<ApiResponse<Product>> {
    let product = match find_product(state, id).await? {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn find_product(state: &AppState, id: i64) -> AppResult<Option<Product>> {
    Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(product_from_entity)
        .transpose()
}

/// Filter views are memoized per (catalog revision, criteria): admin writes
/// bump the revision, so stale entries simply stop being addressed.
async fn filtered_catalog(
    state: &AppState,
    criteria: FilterCriteria,
) -> AppResult<Arc<Vec<Product>>> {
    let key = (state.catalog_revision(), criteria);
    if let Some(hit) = state.catalog_cache().get(&key) {
        return Ok(hit);
    }

    let all = load_catalog(state).await?;
    let filtered = Arc::new(catalog::filter_products(&all, &key.1));
    state.catalog_cache().insert(key, Arc::clone(&filtered));
    Ok(filtered)
}

/// The full catalog in insertion order (ids are assigned monotonically).
async fn load_catalog(state: &AppState) -> AppResult<Vec<Product>> {
    Products::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect()
}

pub fn product_from_entity(model: ProductModel) -> AppResult<Product> {
    let category: Category = serde_json::from_value(model.category).map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "bad category payload on product {}: {e}",
            model.id
        ))
    })?;
    let extra_images: Vec<String> = serde_json::from_value(model.extra_images).map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "bad extra_images payload on product {}: {e}",
            model.id
        ))
    })?;

    Ok(Product {
        id: model.id,
        name: model.name,
        price: model.price,
        original_price: model.original_price,
        category,
        subcategory: model.subcategory,
        description: model.description,
        image: model.image,
        extra_images,
        rating: model.rating,
        review_count: model.review_count,
        created_at: model.created_at.with_timezone(&Utc),
    })
}
