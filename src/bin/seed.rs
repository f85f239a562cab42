use sea_orm::{EntityTrait, PaginatorTrait};

use storefront_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    dto::products::CreateProductRequest,
    entity::products::Entity as Products,
    models::Category,
    services::admin_service,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let state = AppState::new(pool, orm, config);

    let existing = Products::find().count(&state.orm).await?;
    if existing > 0 {
        println!("Catalog already has {existing} products, skipping seed");
        return Ok(());
    }

    for payload in demo_catalog() {
        let resp = admin_service::create_product(&state, payload)
            .await
            .map_err(|e| anyhow::anyhow!("seed insert failed: {e}"))?;
        if let Some(product) = resp.data {
            println!("Seeded #{} {}", product.id, product.name);
        }
    }

    Ok(())
}

fn demo_catalog() -> Vec<CreateProductRequest> {
    let sizes = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    vec![
        CreateProductRequest {
            name: "Classic Cotton Tee".into(),
            price: 450,
            original_price: Some(600),
            category: Category::Apparel { sizes: sizes(&["S", "M", "L", "XL"]) },
            subcategory: Some("t-shirts".into()),
            description: "Plain heavyweight cotton tee".into(),
            image: "/uploads/demo-tee.jpg".into(),
            extra_images: vec![],
            rating: 4.6,
            review_count: 34,
        },
        CreateProductRequest {
            name: "Oversized Hoodie".into(),
            price: 950,
            original_price: None,
            category: Category::Apparel { sizes: sizes(&["M", "L", "XL"]) },
            subcategory: Some("hoodies".into()),
            description: "Brushed fleece, dropped shoulders".into(),
            image: "/uploads/demo-hoodie.jpg".into(),
            extra_images: vec![],
            rating: 4.8,
            review_count: 12,
        },
        CreateProductRequest {
            name: "Canvas Low Sneaker".into(),
            price: 1250,
            original_price: Some(1500),
            category: Category::Footwear { sizes: sizes(&["40", "41", "42", "43", "44"]) },
            subcategory: Some("sneakers".into()),
            description: "Vulcanized sole, cotton canvas upper".into(),
            image: "/uploads/demo-sneaker.jpg".into(),
            extra_images: vec!["/uploads/demo-sneaker-side.jpg".into()],
            rating: 4.2,
            review_count: 57,
        },
        CreateProductRequest {
            name: "Leather Belt".into(),
            price: 350,
            original_price: None,
            category: Category::Accessories,
            subcategory: None,
            description: "Full-grain leather, brass buckle".into(),
            image: "/uploads/demo-belt.jpg".into(),
            extra_images: vec![],
            rating: 4.0,
            review_count: 8,
        },
        CreateProductRequest {
            name: "Enamel Mug".into(),
            price: 150,
            original_price: None,
            category: Category::Home,
            subcategory: Some("kitchen".into()),
            description: "Campfire-style enamel mug".into(),
            image: "/uploads/demo-mug.jpg".into(),
            extra_images: vec![],
            rating: 4.4,
            review_count: 21,
        },
    ]
}
