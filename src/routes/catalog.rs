//! Categories, toppings, banners, brand settings and partnership copy: public reads, admin
//! writes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::catalog::{
        BannerList, BannerRequest, CategoryList, CategoryRequest, ToppingList, ToppingRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Banner, BrandSettings, Category, PartnershipContent, Topping},
    response::ApiResponse,
    services::{brand_service, catalog_service, partnership_service},
    state::AppState,
};

pub fn categories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/{id}", put(update_category).delete(delete_category))
}

pub fn toppings_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_toppings).post(create_topping))
        .route("/{id}", put(update_topping).delete(delete_topping))
}

pub fn banners_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_banners).post(create_banner))
        .route("/{id}", put(update_banner).delete(delete_banner))
}

pub fn brand_router() -> Router<AppState> {
    Router::new().route("/", get(get_brand).put(update_brand))
}

pub fn partnership_router() -> Router<AppState> {
    Router::new().route("/", get(get_partnership).put(update_partnership))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List categories", body = ApiResponse<CategoryList>)
    ),
    tag = "Catalog"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = catalog_service::list_categories(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Create category", body = ApiResponse<Category>),
        (status = 400, description = "Invalid category"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Category key already used")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CategoryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    let resp = catalog_service::create_category(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Updated category", body = ApiResponse<Category>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<CategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = catalog_service::update_category(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Deleted category"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = catalog_service::delete_category(&state, &user, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/toppings",
    responses(
        (status = 200, description = "List toppings", body = ApiResponse<ToppingList>)
    ),
    tag = "Catalog"
)]
pub async fn list_toppings(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ToppingList>>> {
    let resp = catalog_service::list_toppings(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/toppings",
    request_body = ToppingRequest,
    responses(
        (status = 201, description = "Create topping", body = ApiResponse<Topping>),
        (status = 400, description = "Invalid topping"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_topping(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ToppingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Topping>>)> {
    let resp = catalog_service::create_topping(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/toppings/{id}",
    params(
        ("id" = String, Path, description = "Topping ID")
    ),
    request_body = ToppingRequest,
    responses(
        (status = 200, description = "Updated topping", body = ApiResponse<Topping>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_topping(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<ToppingRequest>,
) -> AppResult<Json<ApiResponse<Topping>>> {
    let resp = catalog_service::update_topping(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/toppings/{id}",
    params(
        ("id" = String, Path, description = "Topping ID")
    ),
    responses(
        (status = 200, description = "Deleted topping"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_topping(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = catalog_service::delete_topping(&state, &user, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/banners",
    responses(
        (status = 200, description = "List banners", body = ApiResponse<BannerList>)
    ),
    tag = "Catalog"
)]
pub async fn list_banners(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<BannerList>>> {
    let resp = catalog_service::list_banners(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/banners",
    request_body = BannerRequest,
    responses(
        (status = 201, description = "Create banner", body = ApiResponse<Banner>),
        (status = 400, description = "Invalid banner"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_banner(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<BannerRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Banner>>)> {
    let resp = catalog_service::create_banner(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/banners/{id}",
    params(
        ("id" = String, Path, description = "Banner ID")
    ),
    request_body = BannerRequest,
    responses(
        (status = 200, description = "Updated banner", body = ApiResponse<Banner>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_banner(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<BannerRequest>,
) -> AppResult<Json<ApiResponse<Banner>>> {
    let resp = catalog_service::update_banner(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/banners/{id}",
    params(
        ("id" = String, Path, description = "Banner ID")
    ),
    responses(
        (status = 200, description = "Deleted banner"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_banner(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = catalog_service::delete_banner(&state, &user, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/brand",
    responses(
        (status = 200, description = "Brand settings", body = ApiResponse<BrandSettings>)
    ),
    tag = "Brand"
)]
pub async fn get_brand(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<BrandSettings>>> {
    let resp = brand_service::get_brand(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/brand",
    request_body = BrandSettings,
    responses(
        (status = 200, description = "Updated brand settings", body = ApiResponse<BrandSettings>),
        (status = 400, description = "Invalid settings"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Brand"
)]
pub async fn update_brand(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<BrandSettings>,
) -> AppResult<Json<ApiResponse<BrandSettings>>> {
    let resp = brand_service::update_brand(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/partnership",
    responses(
        (status = 200, description = "Partnership page copy", body = ApiResponse<PartnershipContent>)
    ),
    tag = "Brand"
)]
pub async fn get_partnership(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PartnershipContent>>> {
    let resp = partnership_service::get_partnership(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/partnership",
    request_body = PartnershipContent,
    responses(
        (status = 200, description = "Updated partnership copy", body = ApiResponse<PartnershipContent>),
        (status = 400, description = "Missing title or pillars"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Brand"
)]
pub async fn update_partnership(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PartnershipContent>,
) -> AppResult<Json<ApiResponse<PartnershipContent>>> {
    let resp = partnership_service::update_partnership(&state, &user, payload).await?;
    Ok(Json(resp))
}
