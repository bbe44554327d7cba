use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Reservation, ReservationStatus};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub note: Option<String>,
    pub party_size: u32,
    pub table_id: String,
    pub datetime: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct ReservationList {
    pub items: Vec<Reservation>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReservationStatusRequest {
    pub status: ReservationStatus,
}
