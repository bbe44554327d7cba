use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Review;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewRequest {
    /// 1 to 5 stars.
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReviewList {
    pub items: Vec<Review>,
}
