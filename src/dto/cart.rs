use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::cart::{Cart, CartLineItem};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddItemRequest {
    pub product_id: i64,
    pub size: Option<String>,
}

/// Key of an existing line item, used by increase/decrease.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LineItemKey {
    pub product_id: i64,
    pub size: Option<String>,
}

/// The cart plus its derived aggregates, recomputed after every mutation.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLineItem>,
    pub total_item_count: u32,
    pub total_price: i64,
    pub is_empty: bool,
}

impl CartView {
    pub fn of(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total_item_count: cart.total_item_count(),
            total_price: cart.total_price(),
            is_empty: cart.is_empty(),
        }
    }
}
