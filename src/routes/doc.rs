use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cart::CartLineItem,
    catalog::PriceSort,
    checkout::{OrderSummary, ShippingForm, SummaryLine},
    dto::{
        auth::{AdminLoginRequest, AdminLoginResponse},
        cart::{AddItemRequest, CartView, LineItemKey},
        checkout::CheckoutResponse,
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        uploads::UploadResponse,
    },
    models::{Category, CategoryKind, Product},
    response::{ApiResponse, Meta},
    routes::{admin, cart, checkout, health, params, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        cart::view_cart,
        cart::add_item,
        cart::increase_item,
        cart::decrease_item,
        cart::remove_item,
        cart::clear_cart,
        checkout::checkout,
        admin::login,
        admin::create_product,
        admin::update_product,
        admin::delete_product,
        admin::upload_image,
    ),
    components(
        schemas(
            Product,
            Category,
            CategoryKind,
            CartLineItem,
            CartView,
            AddItemRequest,
            LineItemKey,
            ShippingForm,
            SummaryLine,
            OrderSummary,
            CheckoutResponse,
            AdminLoginRequest,
            AdminLoginResponse,
            CreateProductRequest,
            UpdateProductRequest,
            UploadResponse,
            ProductList,
            PriceSort,
            params::Pagination,
            params::ProductQuery,
            params::RemoveItemQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartView>,
            ApiResponse<CheckoutResponse>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Public catalog endpoints"),
        (name = "Cart", description = "Session cart endpoints"),
        (name = "Checkout", description = "Order summary and dispatch"),
        (name = "Admin", description = "Catalog administration endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
