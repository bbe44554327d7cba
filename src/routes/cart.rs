use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};

use crate::{
    dto::cart::{AddToCartRequest, CartView, QuoteRequest, UpdateQuantityRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    rules::pricing::PriceQuote,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_list).post(add_to_cart).delete(clear_cart))
        .route("/quote", post(quote))
        .route("/{line_id}", patch(update_quantity).delete(remove_line))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart of the current user", body = ApiResponse<CartView>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn cart_list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::get_cart(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Line added or merged", body = ApiResponse<CartView>),
        (status = 400, description = "Unavailable product or unknown topping"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::add_to_cart(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/cart/{line_id}",
    params(
        ("line_id" = String, Path, description = "Cart line ID")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Quantity changed; lines reaching zero are removed", body = ApiResponse<CartView>),
        (status = 404, description = "Line not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    user: AuthUser,
    Path(line_id): Path<String>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::update_quantity(&state, &user, &line_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{line_id}",
    params(
        ("line_id" = String, Path, description = "Cart line ID")
    ),
    responses(
        (status = 200, description = "Line removed", body = ApiResponse<CartView>),
        (status = 404, description = "Line not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_line(
    State(state): State<AppState>,
    user: AuthUser,
    Path(line_id): Path<String>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::remove_line(&state, &user, &line_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart cleared", body = ApiResponse<CartView>)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::clear_cart(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/quote",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Subtotal, discount and total", body = ApiResponse<PriceQuote>),
        (status = 400, description = "Discount code rejected")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn quote(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<QuoteRequest>,
) -> AppResult<Json<ApiResponse<PriceQuote>>> {
    let resp = cart_service::quote(&state, &user, payload).await?;
    Ok(Json(resp))
}
