use crate::{
    cart::LineItemCandidate,
    dto::cart::{AddItemRequest, CartView, LineItemKey},
    error::AppResult,
    middleware::session::CartSession,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn view_cart(state: &AppState, session: CartSession) -> AppResult<ApiResponse<CartView>> {
    let view = state.with_cart(session.0, |cart| CartView::of(cart));
    Ok(ApiResponse::success("OK", view, None))
}

/// Snapshot name/price/image from the catalog at add time; the cart never
/// sees later catalog edits. A product id that no longer exists is a silent
/// no-op, not an error.
pub async fn add_item(
    state: &AppState,
    session: CartSession,
    payload: AddItemRequest,
) -> AppResult<ApiResponse<CartView>> {
    let view = match product_service::find_product(state, payload.product_id).await? {
        Some(product) => state.with_cart(session.0, |cart| {
            cart.add(LineItemCandidate {
                product_id: product.id,
                name: product.name,
                price: product.price,
                original_price: product.original_price,
                image: product.image,
                size: payload.size,
            });
            CartView::of(cart)
        }),
        None => {
            tracing::debug!(
                product_id = payload.product_id,
                "add to cart ignored, product not in catalog"
            );
            state.with_cart(session.0, |cart| CartView::of(cart))
        }
    };

    Ok(ApiResponse::success("OK", view, None))
}

pub fn increase_item(
    state: &AppState,
    session: CartSession,
    key: LineItemKey,
) -> AppResult<ApiResponse<CartView>> {
    let view = state.with_cart(session.0, |cart| {
        cart.increase_qty(key.product_id, key.size.as_deref());
        CartView::of(cart)
    });
    Ok(ApiResponse::success("OK", view, None))
}

pub fn decrease_item(
    state: &AppState,
    session: CartSession,
    key: LineItemKey,
) -> AppResult<ApiResponse<CartView>> {
    let view = state.with_cart(session.0, |cart| {
        cart.decrease_qty(key.product_id, key.size.as_deref());
        CartView::of(cart)
    });
    Ok(ApiResponse::success("OK", view, None))
}

pub fn remove_item(
    state: &AppState,
    session: CartSession,
    product_id: i64,
    size: Option<String>,
) -> AppResult<ApiResponse<CartView>> {
    let view = state.with_cart(session.0, |cart| {
        cart.remove(product_id, size.as_deref());
        CartView::of(cart)
    });
    Ok(ApiResponse::success("Removed from cart", view, None))
}

pub fn clear_cart(state: &AppState, session: CartSession) -> AppResult<ApiResponse<CartView>> {
    let view = state.with_cart(session.0, |cart| {
        cart.clear();
        CartView::of(cart)
    });
    Ok(ApiResponse::success("Cart cleared", view, None))
}
