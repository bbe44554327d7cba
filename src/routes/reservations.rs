use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::reservations::ReservationRequest,
    error::AppResult,
    models::Reservation,
    response::ApiResponse,
    services::reservation_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_reservation))
}

#[utoipa::path(
    post,
    path = "/api/reservations",
    request_body = ReservationRequest,
    responses(
        (status = 201, description = "Reservation received", body = ApiResponse<Reservation>),
        (status = 400, description = "Invalid reservation")
    ),
    tag = "Reservations"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(payload): Json<ReservationRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Reservation>>)> {
    let resp = reservation_service::create_reservation(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
