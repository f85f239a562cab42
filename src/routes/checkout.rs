use axum::{Json, Router, extract::State, routing::post};

use crate::{
    checkout::ShippingForm,
    dto::checkout::CheckoutResponse,
    error::AppResult,
    middleware::session::CartSession,
    response::ApiResponse,
    services::checkout_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(checkout))
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    request_body = ShippingForm,
    params(
        ("x-session-id" = String, Header, description = "Cart session UUID"),
    ),
    responses(
        (status = 200, description = "Order summary, message and dispatch link", body = ApiResponse<CheckoutResponse>),
        (status = 400, description = "Cart is empty"),
        (status = 422, description = "Shipping form incomplete"),
    ),
    tag = "Checkout"
)]
pub async fn checkout(
    State(state): State<AppState>,
    session: CartSession,
    Json(form): Json<ShippingForm>,
) -> AppResult<Json<ApiResponse<CheckoutResponse>>> {
    let resp = checkout_service::checkout(&state, session, form)?;
    Ok(Json(resp))
}
