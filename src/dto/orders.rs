use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, OrderStatus};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Client-chosen id. Repeating a checkout with the same id returns the stored order.
    pub order_id: Option<String>,
    /// Defaults to the account name.
    pub customer_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub payment_method: Option<String>,
    pub note: Option<String>,
    pub discount_code: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}
