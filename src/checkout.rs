//! Checkout: turn a cart plus a shipping form into an order summary and the
//! text block handed to the dispatch channel.
//!
//! Everything here is a pure function of its inputs except `new_reference`,
//! which draws the 6 random digits. The reference is cosmetic: collisions are
//! neither checked nor prevented, it is not a unique identifier.

use rand::Rng;
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::cart::CartLineItem;

pub const REFERENCE_PREFIX: &str = "ORD-";

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ShippingForm {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SummaryLine {
    pub name: String,
    pub size: Option<String>,
    pub quantity: u32,
    pub line_total: i64,
}

/// Derived at checkout time, serialized to text and handed off. Never stored.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderSummary {
    pub reference: String,
    pub lines: Vec<SummaryLine>,
    pub subtotal: i64,
    pub shipping_fee: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct ShippingPolicy {
    pub flat_fee: i64,
    pub free_threshold: i64,
}

/// Flat fee below the free-shipping threshold, zero at or above it.
pub fn shipping_fee(subtotal: i64, policy: ShippingPolicy) -> i64 {
    if subtotal >= policy.free_threshold {
        0
    } else {
        policy.flat_fee
    }
}

pub fn new_reference() -> String {
    let digits: u32 = rand::rng().random_range(0..1_000_000);
    format!("{REFERENCE_PREFIX}{digits:06}")
}

pub fn build_summary(
    items: &[CartLineItem],
    policy: ShippingPolicy,
    reference: String,
) -> OrderSummary {
    let lines: Vec<SummaryLine> = items
        .iter()
        .map(|item| SummaryLine {
            name: item.name.clone(),
            size: item.size.clone(),
            quantity: item.quantity,
            line_total: item.price * i64::from(item.quantity),
        })
        .collect();

    let subtotal: i64 = lines.iter().map(|line| line.line_total).sum();
    let shipping_fee = shipping_fee(subtotal, policy);

    OrderSummary {
        reference,
        lines,
        subtotal,
        shipping_fee,
        total: subtotal + shipping_fee,
    }
}

/// Render the order as the single text block sent over the dispatch channel.
pub fn format_message(summary: &OrderSummary, form: &ShippingForm, store_name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("*{store_name} — Order {}*\n\n", summary.reference));

    for (idx, line) in summary.lines.iter().enumerate() {
        match &line.size {
            Some(size) => out.push_str(&format!(
                "{}. {} ({}) x{} = {}\n",
                idx + 1,
                line.name,
                size,
                line.quantity,
                line.line_total
            )),
            None => out.push_str(&format!(
                "{}. {} x{} = {}\n",
                idx + 1,
                line.name,
                line.quantity,
                line.line_total
            )),
        }
    }

    out.push_str(&format!("\nSubtotal: {}\n", summary.subtotal));
    if summary.shipping_fee == 0 {
        out.push_str("Shipping: FREE\n");
    } else {
        out.push_str(&format!("Shipping: {}\n", summary.shipping_fee));
    }
    out.push_str(&format!("Total: {}\n", summary.total));

    out.push_str(&format!("\nCustomer: {}\n", form.name));
    out.push_str(&format!("Phone: {}\n", form.phone));
    if let Some(email) = &form.email {
        out.push_str(&format!("Email: {email}\n"));
    }
    out.push_str(&format!(
        "Address: {}, {} {}\n",
        form.address, form.city, form.postal_code
    ));

    out
}

/// Build the wa.me deep link carrying the rendered message. The caller opens
/// the link; nothing here waits for or interprets a response.
pub fn dispatch_url(destination: &str, text: &str) -> Result<Url, url::ParseError> {
    Url::parse_with_params(&format!("https://wa.me/{destination}"), &[("text", text)])
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: ShippingPolicy = ShippingPolicy {
        flat_fee: 100,
        free_threshold: 1000,
    };

    fn item(name: &str, price: i64, quantity: u32, size: Option<&str>) -> CartLineItem {
        CartLineItem {
            product_id: 1,
            name: name.to_string(),
            price,
            original_price: None,
            image: String::new(),
            size: size.map(str::to_owned),
            quantity,
        }
    }

    fn form() -> ShippingForm {
        ShippingForm {
            name: "Ada".to_string(),
            phone: "15550001".to_string(),
            email: None,
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            postal_code: "12345".to_string(),
        }
    }

    #[test]
    fn fee_is_flat_below_threshold_and_zero_at_it() {
        assert_eq!(shipping_fee(950, POLICY), 100);
        assert_eq!(shipping_fee(999, POLICY), 100);
        assert_eq!(shipping_fee(1000, POLICY), 0);
        assert_eq!(shipping_fee(5000, POLICY), 0);
    }

    #[test]
    fn summary_totals_add_up() {
        let items = vec![item("Tee", 475, 2, Some("M"))];
        let summary = build_summary(&items, POLICY, "ORD-000001".to_string());
        assert_eq!(summary.subtotal, 950);
        assert_eq!(summary.shipping_fee, 100);
        assert_eq!(summary.total, 1050);

        let items = vec![item("Tee", 500, 2, Some("M"))];
        let summary = build_summary(&items, POLICY, "ORD-000001".to_string());
        assert_eq!(summary.subtotal, 1000);
        assert_eq!(summary.shipping_fee, 0);
        assert_eq!(summary.total, 1000);
    }

    #[test]
    fn reference_is_prefix_plus_six_digits() {
        for _ in 0..50 {
            let reference = new_reference();
            let digits = reference.strip_prefix(REFERENCE_PREFIX).expect("prefix");
            assert_eq!(digits.len(), 6);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn message_is_deterministic_given_the_reference() {
        let items = vec![
            item("Tee", 500, 2, Some("M")),
            item("Mug", 150, 1, None),
        ];
        let summary = build_summary(&items, POLICY, "ORD-123456".to_string());
        let a = format_message(&summary, &form(), "Shoply");
        let b = format_message(&summary, &form(), "Shoply");
        assert_eq!(a, b);

        assert!(a.contains("Order ORD-123456"));
        assert!(a.contains("1. Tee (M) x2 = 1000"));
        assert!(a.contains("2. Mug x1 = 150"));
        assert!(a.contains("Subtotal: 1150"));
        assert!(a.contains("Shipping: FREE"));
        assert!(a.contains("Total: 1150"));
        assert!(a.contains("Customer: Ada"));
        assert!(!a.contains("Email:"));
    }

    #[test]
    fn dispatch_url_encodes_the_message() {
        let url = dispatch_url("15550009999", "order *ORD-000001*\nTotal: 10").expect("url");
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/15550009999");
        let text = url
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .expect("text param");
        assert_eq!(text, "order *ORD-000001*\nTotal: 10");
    }
}
