use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::users::{LoyaltyView, UpdateProfileRequest, UserView},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(me).put(update_profile))
        .route("/loyalty", get(loyalty))
}

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current account", body = ApiResponse<UserView>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UserView>>> {
    let resp = user_service::me(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserView>),
        (status = 400, description = "Invalid profile")
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<UserView>>> {
    let resp = user_service::update_profile(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/me/loyalty",
    responses(
        (status = 200, description = "Points and tier", body = ApiResponse<LoyaltyView>)
    ),
    security(("bearer_auth" = [])),
    tag = "Account"
)]
pub async fn loyalty(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<LoyaltyView>>> {
    let resp = user_service::loyalty(&state, &user).await?;
    Ok(Json(resp))
}
