use chrono::Utc;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::reservations::{ReservationList, ReservationRequest, UpdateReservationStatusRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Reservation, ReservationStatus},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    rules::cart::normalize_note,
    state::AppState,
};

pub async fn create_reservation(
    state: &AppState,
    payload: ReservationRequest,
) -> AppResult<ApiResponse<Reservation>> {
    let name = payload.name.trim().to_string();
    let phone = payload.phone.trim().to_string();
    let table_id = payload.table_id.trim().to_string();
    if name.is_empty() || phone.is_empty() || table_id.is_empty() {
        return Err(AppError::BadRequest(
            "Name, phone and table are required".to_string(),
        ));
    }
    if payload.party_size == 0 {
        return Err(AppError::BadRequest(
            "Party size must be at least 1".to_string(),
        ));
    }

    let reservation = Reservation {
        id: Uuid::new_v4().to_string(),
        user_id: None,
        name,
        phone,
        email: normalize_note(payload.email.as_deref()),
        note: normalize_note(payload.note.as_deref()),
        party_size: payload.party_size,
        table_id,
        datetime: payload.datetime,
        status: ReservationStatus::Pending,
        created_at: Utc::now(),
    };
    let reservation = state.store.insert(reservation).await?;
    tracing::info!(
        reservation_id = %reservation.id,
        table_id = %reservation.table_id,
        party_size = reservation.party_size,
        "reservation received"
    );

    Ok(ApiResponse::success(
        "Reservation created",
        reservation,
        Some(Meta::empty()),
    ))
}

pub async fn list_reservations(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ReservationList>> {
    ensure_admin(user)?;
    let reservations = state.store.list::<Reservation>().await?;
    let (items, meta) = pagination.paginate(reservations);
    Ok(ApiResponse::success(
        "Reservations",
        ReservationList { items },
        Some(meta),
    ))
}

pub async fn update_reservation_status(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: UpdateReservationStatusRequest,
) -> AppResult<ApiResponse<Reservation>> {
    ensure_admin(user)?;
    let mut reservation = state.store.fetch::<Reservation>(id).await?;
    reservation.status = payload.status;
    let reservation = state.store.update(reservation).await?;

    log_audit(
        user,
        "reservation_status_update",
        "reservations",
        Some(serde_json::json!({
            "reservation_id": reservation.id,
            "status": reservation.status.as_str(),
        })),
    );

    Ok(ApiResponse::success(
        "Reservation updated",
        reservation,
        Some(Meta::empty()),
    ))
}
