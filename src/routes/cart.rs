use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post},
};

use crate::{
    dto::cart::{AddItemRequest, CartView, LineItemKey},
    error::AppResult,
    middleware::session::CartSession,
    response::ApiResponse,
    routes::params::RemoveItemQuery,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart).delete(clear_cart))
        .route("/items", post(add_item))
        .route("/items/increase", post(increase_item))
        .route("/items/decrease", post(decrease_item))
        .route("/items/{product_id}", delete(remove_item))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    params(
        ("x-session-id" = String, Header, description = "Cart session UUID"),
    ),
    responses(
        (status = 200, description = "Current cart with aggregates", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::view_cart(&state, session)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = AddItemRequest,
    params(
        ("x-session-id" = String, Header, description = "Cart session UUID"),
    ),
    responses(
        (status = 200, description = "Cart after the add", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    session: CartSession,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::add_item(&state, session, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/items/increase",
    request_body = LineItemKey,
    params(
        ("x-session-id" = String, Header, description = "Cart session UUID"),
    ),
    responses(
        (status = 200, description = "Cart after the increment", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn increase_item(
    State(state): State<AppState>,
    session: CartSession,
    Json(payload): Json<LineItemKey>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::increase_item(&state, session, payload)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/items/decrease",
    request_body = LineItemKey,
    params(
        ("x-session-id" = String, Header, description = "Cart session UUID"),
    ),
    responses(
        (status = 200, description = "Cart after the decrement (quantity floors at 1)", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn decrease_item(
    State(state): State<AppState>,
    session: CartSession,
    Json(payload): Json<LineItemKey>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::decrease_item(&state, session, payload)?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{product_id}",
    params(
        ("product_id" = i64, Path, description = "Product ID"),
        ("size" = Option<String>, Query, description = "Size of the line item to remove"),
        ("x-session-id" = String, Header, description = "Cart session UUID"),
    ),
    responses(
        (status = 200, description = "Cart after the removal", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    session: CartSession,
    Path(product_id): Path<i64>,
    Query(query): Query<RemoveItemQuery>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::remove_item(&state, session, product_id, query.size)?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    params(
        ("x-session-id" = String, Header, description = "Cart session UUID"),
    ),
    responses(
        (status = 200, description = "Empty cart", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::clear_cart(&state, session)?;
    Ok(Json(resp))
}
