use crate::{
    checkout::{self, ShippingForm, ShippingPolicy},
    dto::checkout::CheckoutResponse,
    error::{AppError, AppResult},
    middleware::session::CartSession,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn checkout(
    state: &AppState,
    session: CartSession,
    form: ShippingForm,
) -> AppResult<ApiResponse<CheckoutResponse>> {
    validate_form(&form)?;

    // Take the items and clear in one lock: nothing after this point can
    // fail in a way that should give the cart back.
    let items = state.with_cart(session.0, |cart| {
        if cart.is_empty() {
            None
        } else {
            let items = cart.items().to_vec();
            cart.clear();
            Some(items)
        }
    });
    let items = items.ok_or_else(|| AppError::BadRequest("Cart is empty".into()))?;

    let policy = ShippingPolicy {
        flat_fee: state.config.shipping_flat_fee,
        free_threshold: state.config.free_shipping_threshold,
    };
    let summary = checkout::build_summary(&items, policy, checkout::new_reference());
    let message = checkout::format_message(&summary, &form, &state.config.store_name);
    let dispatch_url = checkout::dispatch_url(&state.config.whatsapp_number, &message)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("building dispatch url: {e}")))?
        .to_string();

    tracing::info!(reference = %summary.reference, total = summary.total, "order handed to dispatch");
    Ok(ApiResponse::success(
        "Order ready",
        CheckoutResponse {
            summary,
            message,
            dispatch_url,
        },
        Some(Meta::empty()),
    ))
}

fn validate_form(form: &ShippingForm) -> AppResult<()> {
    required("name", &form.name)?;
    required("phone", &form.phone)?;
    required("address", &form.address)?;
    required("city", &form.city)?;
    required("postal_code", &form.postal_code)?;
    Ok(())
}

fn required(field: &'static str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(field, format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ShippingForm {
        ShippingForm {
            name: "Ada".into(),
            phone: "15550001".into(),
            email: None,
            address: "1 Main St".into(),
            city: "Springfield".into(),
            postal_code: "12345".into(),
        }
    }

    #[test]
    fn accepts_a_complete_form() {
        assert!(validate_form(&form()).is_ok());
    }

    #[test]
    fn email_is_optional_but_address_fields_are_not() {
        let mut f = form();
        f.email = Some("ada@example.com".into());
        assert!(validate_form(&f).is_ok());

        let mut f = form();
        f.city = "   ".into();
        match validate_form(&f).unwrap_err() {
            AppError::Validation { field, .. } => assert_eq!(field, "city"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
