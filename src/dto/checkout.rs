use serde::Serialize;
use utoipa::ToSchema;

use crate::checkout::OrderSummary;

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub summary: OrderSummary,
    /// The rendered text block.
    pub message: String,
    /// wa.me link the client opens to hand the message to the channel.
    pub dispatch_url: String,
}
