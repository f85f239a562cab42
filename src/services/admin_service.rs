use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    dto::products::{CreateProductRequest, UpdateProductRequest},
    entity::products::{ActiveModel, Entity as Products},
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    services::product_service::product_from_entity,
    state::AppState,
};

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    validate_fields(
        &payload.name,
        payload.price,
        payload.original_price,
        payload.rating,
        payload.review_count,
    )?;

    // Ids are max + 1, so deleting the highest-id product can reissue its id.
    // Nothing persisted references product ids, which is what makes this safe.
    let next_id: (i64,) = sqlx::query_as("SELECT COALESCE(MAX(id), 0) + 1 FROM products")
        .fetch_one(&state.pool)
        .await?;

    let active = ActiveModel {
        id: Set(next_id.0),
        name: Set(payload.name),
        price: Set(payload.price),
        original_price: Set(payload.original_price),
        category: Set(category_json(&payload.category)?),
        subcategory: Set(payload.subcategory),
        description: Set(payload.description),
        image: Set(payload.image),
        extra_images: Set(images_json(&payload.extra_images)?),
        rating: Set(payload.rating),
        review_count: Set(payload.review_count),
        created_at: NotSet,
    };
    let product = active.insert(&state.orm).await?;
    state.bump_catalog_revision();

    tracing::info!(product_id = product.id, "product created");
    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product)?,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: i64,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let existing = match Products::find_by_id(id).one(&state.orm).await? {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    // Validate the record as it would look after the merge, so a partial
    // update cannot sneak an invariant violation past the field checks.
    let merged_name = payload.name.as_deref().unwrap_or(&existing.name);
    let merged_price = payload.price.unwrap_or(existing.price);
    let merged_original = payload.original_price.or(existing.original_price);
    let merged_rating = payload.rating.unwrap_or(existing.rating);
    let merged_reviews = payload.review_count.unwrap_or(existing.review_count);
    validate_fields(
        merged_name,
        merged_price,
        merged_original,
        merged_rating,
        merged_reviews,
    )?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(original_price) = payload.original_price {
        active.original_price = Set(Some(original_price));
    }
    if let Some(category) = &payload.category {
        active.category = Set(category_json(category)?);
    }
    if let Some(subcategory) = payload.subcategory {
        active.subcategory = Set(Some(subcategory));
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(image) = payload.image {
        active.image = Set(image);
    }
    if let Some(extra_images) = &payload.extra_images {
        active.extra_images = Set(images_json(extra_images)?);
    }
    if let Some(rating) = payload.rating {
        active.rating = Set(rating);
    }
    if let Some(review_count) = payload.review_count {
        active.review_count = Set(review_count);
    }

    let product = active.update(&state.orm).await?;
    state.bump_catalog_revision();

    Ok(ApiResponse::success(
        "Updated",
        product_from_entity(product)?,
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    state.bump_catalog_revision();

    tracing::info!(product_id = id, "product deleted");
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Field-scoped checks run before any write; a rejected create never reaches
/// the id query, so no id is consumed.
fn validate_fields(
    name: &str,
    price: i64,
    original_price: Option<i64>,
    rating: f32,
    review_count: i32,
) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("name", "name is required"));
    }
    if price <= 0 {
        return Err(AppError::validation("price", "price must be greater than 0"));
    }
    if let Some(original) = original_price {
        if original < price {
            return Err(AppError::validation(
                "original_price",
                "original price must be at least the current price",
            ));
        }
    }
    if !(0.0..=5.0).contains(&rating) {
        return Err(AppError::validation("rating", "rating must be between 0 and 5"));
    }
    if review_count < 0 {
        return Err(AppError::validation(
            "review_count",
            "review count cannot be negative",
        ));
    }
    Ok(())
}

fn category_json(category: &crate::models::Category) -> AppResult<serde_json::Value> {
    serde_json::to_value(category)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing category: {e}")))
}

fn images_json(images: &[String]) -> AppResult<serde_json::Value> {
    serde_json::to_value(images)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing images: {e}")))
}
