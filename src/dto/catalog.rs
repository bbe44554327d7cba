use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Banner, Category, Topping};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub name: String,
    pub key: String,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<Category>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ToppingRequest {
    pub name: String,
    pub price: Decimal,
}

#[derive(Serialize, ToSchema)]
pub struct ToppingList {
    pub items: Vec<Topping>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BannerRequest {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub cta_text: String,
    #[serde(default)]
    pub link_section: String,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, ToSchema)]
pub struct BannerList {
    pub items: Vec<Banner>,
}
