use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    // Ids are assigned by the service (max + 1), not by the database.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub original_price: Option<i64>,
    #[sea_orm(column_type = "JsonBinary")]
    pub category: Json,
    pub subcategory: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub extra_images: Json,
    pub rating: f32,
    pub review_count: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
