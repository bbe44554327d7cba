use std::convert::Infallible;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, patch},
};
use tokio_stream::{Stream, StreamExt};

use crate::{
    dto::{
        careers::ApplicationList,
        orders::{OrderList, UpdateOrderStatusRequest},
        reservations::{ReservationList, UpdateReservationStatusRequest},
        users::{UpdatePointsRequest, UpdateRoleRequest, UserList, UserView},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Order, Reservation},
    response::ApiResponse,
    routes::params::{OrderListQuery, Pagination},
    services::{admin_service, careers_service, reservation_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_all_orders))
        .route("/orders/stream", get(stream_orders))
        .route("/orders/{id}", get(get_order_admin))
        .route("/orders/{id}/status", patch(update_order_status))
        .route("/users", get(list_users))
        .route("/users/{id}/role", patch(update_user_role))
        .route("/users/{id}/points", patch(update_user_points))
        .route("/applications", get(list_applications))
        .route("/reservations", get(list_reservations))
        .route("/reservations/{id}/status", patch(update_reservation_status))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(OrderListQuery),
    responses(
    (status = 200, description = "Get all orders (admin only)", body = ApiResponse<OrderList>),
    (status = 400, description = "Unknown status filter"),
    (status = 403, description = "Forbidden"),
    (status = 500, description = "Internal Server Error"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = admin_service::list_all_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/stream",
    responses(
    (status = 200, description = "Server-sent `orders` events carrying the full order list", body = String, content_type = "text/event-stream"),
    (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn stream_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let feed = admin_service::order_feed(&state, &user).await?;
    let events = feed.filter_map(|orders| match Event::default().event("orders").json_data(orders) {
        Ok(event) => Some(Ok(event)),
        Err(err) => {
            tracing::warn!(error = %err, "failed to encode order snapshot");
            None
        }
    });
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(
    (
        "id" = String, Path, description = "Order ID")
    ),
    responses(
    (status = 200, description = "Get any order (admin only)", body = ApiResponse<Order>),
    (status = 404, description = "Not Found", ),
    (status = 403, description = "Forbidden", ),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_order_admin(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = admin_service::get_order_admin(&state, &user, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    params(
    (
        "id" = String, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Update order status", body = ApiResponse<Order>),
        (status = 400, description = "Invalid status"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = admin_service::update_order_status(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(Pagination),
    responses(
        (status = 200, description = "List accounts", body = ApiResponse<UserList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = admin_service::list_users(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/role",
    params(
    (
        "id" = String, Path, description = "User ID")
    ),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = ApiResponse<UserView>),
        (status = 403, description = "Forbidden, or the account is the super-admin"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> AppResult<Json<ApiResponse<UserView>>> {
    let resp = admin_service::update_user_role(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/points",
    params(
    (
        "id" = String, Path, description = "User ID")
    ),
    request_body = UpdatePointsRequest,
    responses(
        (status = 200, description = "Points set", body = ApiResponse<UserView>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_user_points(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePointsRequest>,
) -> AppResult<Json<ApiResponse<UserView>>> {
    let resp = admin_service::update_user_points(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/applications",
    params(Pagination),
    responses(
        (status = 200, description = "Job applications", body = ApiResponse<ApplicationList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_applications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ApplicationList>>> {
    let resp = careers_service::list_applications(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/reservations",
    params(Pagination),
    responses(
        (status = 200, description = "Table reservations", body = ApiResponse<ReservationList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ReservationList>>> {
    let resp = reservation_service::list_reservations(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/reservations/{id}/status",
    params(
    (
        "id" = String, Path, description = "Reservation ID")
    ),
    request_body = UpdateReservationStatusRequest,
    responses(
        (status = 200, description = "Reservation status changed", body = ApiResponse<Reservation>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_reservation_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateReservationStatusRequest>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let resp =
        reservation_service::update_reservation_status(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}
