use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{DiscountCode, DiscountType};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRequest {
    pub code: String,
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub applicable_product_ids: Vec<String>,
    pub description: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct PromotionList {
    pub items: Vec<DiscountCode>,
}
