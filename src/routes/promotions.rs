use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::promotions::{PromotionList, PromotionRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::DiscountCode,
    response::ApiResponse,
    services::promotion_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_active).post(create_promotion))
        .route("/all", get(list_all))
        .route("/{id}", put(update_promotion).delete(delete_promotion))
}

#[utoipa::path(
    get,
    path = "/api/promotions",
    responses(
        (status = 200, description = "Codes valid today", body = ApiResponse<PromotionList>)
    ),
    tag = "Promotions"
)]
pub async fn list_active(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PromotionList>>> {
    let resp = promotion_service::list_active(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/promotions/all",
    responses(
        (status = 200, description = "Every code (admin only)", body = ApiResponse<PromotionList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Promotions"
)]
pub async fn list_all(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PromotionList>>> {
    let resp = promotion_service::list_all(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/promotions",
    request_body = PromotionRequest,
    responses(
        (status = 201, description = "Create code", body = ApiResponse<DiscountCode>),
        (status = 400, description = "Invalid code"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Code already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Promotions"
)]
pub async fn create_promotion(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PromotionRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<DiscountCode>>)> {
    let resp = promotion_service::create_promotion(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/promotions/{id}",
    params(
        ("id" = String, Path, description = "Promotion ID")
    ),
    request_body = PromotionRequest,
    responses(
        (status = 200, description = "Updated code", body = ApiResponse<DiscountCode>),
        (status = 400, description = "Invalid code"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Code already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Promotions"
)]
pub async fn update_promotion(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<PromotionRequest>,
) -> AppResult<Json<ApiResponse<DiscountCode>>> {
    let resp = promotion_service::update_promotion(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/promotions/{id}",
    params(
        ("id" = String, Path, description = "Promotion ID")
    ),
    responses(
        (status = 200, description = "Deleted code"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Promotions"
)]
pub async fn delete_promotion(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = promotion_service::delete_promotion(&state, &user, &id).await?;
    Ok(Json(resp))
}
