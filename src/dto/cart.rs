use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::{OrderLine, ProductSize},
    rules::pricing::PriceQuote,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    /// Defaults to M.
    pub size: Option<ProductSize>,
    pub note: Option<String>,
    #[serde(default)]
    pub topping_ids: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    /// Added to the current quantity; the result never drops below one.
    pub delta: i64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub discount_code: Option<String>,
}

/// Cart lines priced at the current size upcharge, plus the undiscounted totals.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<OrderLine>,
    pub item_count: u32,
    pub quote: PriceQuote,
}
