use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category is a tagged union: apparel and footwear carry the ordered list
/// of sizes a shopper can pick from, the other kinds have no size axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Category {
    Apparel {
        #[serde(default)]
        sizes: Vec<String>,
    },
    Footwear {
        #[serde(default)]
        sizes: Vec<String>,
    },
    Accessories,
    Home,
}

impl Category {
    pub fn kind(&self) -> CategoryKind {
        match self {
            Category::Apparel { .. } => CategoryKind::Apparel,
            Category::Footwear { .. } => CategoryKind::Footwear,
            Category::Accessories => CategoryKind::Accessories,
            Category::Home => CategoryKind::Home,
        }
    }

    pub fn sizes(&self) -> &[String] {
        match self {
            Category::Apparel { sizes } | Category::Footwear { sizes } => sizes,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Apparel,
    Footwear,
    Accessories,
    Home,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned, immutable. New products get `max(existing) + 1`.
    pub id: i64,
    pub name: String,
    /// Current price in integer currency units, always > 0.
    pub price: i64,
    /// Pre-discount price; when present it is >= `price`.
    pub original_price: Option<i64>,
    pub category: Category,
    /// Free-form label scoped to the category (e.g. "t-shirts").
    pub subcategory: Option<String>,
    pub description: String,
    /// Primary image reference.
    pub image: String,
    #[serde(default)]
    pub extra_images: Vec<String>,
    pub rating: f32,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
}
