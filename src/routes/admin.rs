use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    routing::{delete, post, put},
};

use crate::{
    dto::auth::{AdminLoginRequest, AdminLoginResponse},
    dto::products::{CreateProductRequest, UpdateProductRequest},
    dto::uploads::UploadResponse,
    error::AppResult,
    middleware::auth::AdminSession,
    models::Product,
    response::ApiResponse,
    services::{admin_service, auth_service, upload_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/products", post(create_product))
        .route("/products/{id}", put(update_product))
        .route("/products/{id}", delete(delete_product))
        .route("/uploads", post(upload_image))
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Bearer token with a fixed TTL", body = ApiResponse<AdminLoginResponse>),
        (status = 400, description = "Invalid password")
    ),
    tag = "Admin"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> AppResult<Json<ApiResponse<AdminLoginResponse>>> {
    let resp = auth_service::login(&state.config, payload)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Create product", body = ApiResponse<Product>),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::create_product(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::update_product(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Deleted product"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = admin_service::delete_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/uploads",
    responses(
        (status = 200, description = "Stored image URL", body = ApiResponse<UploadResponse>),
        (status = 422, description = "Unsupported or empty file"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    _admin: AdminSession,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadResponse>>> {
    let resp = upload_service::save_image(&state, multipart).await?;
    Ok(Json(resp))
}
