use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod careers;
pub mod cart;
pub mod catalog;
pub mod doc;
pub mod health;
pub mod me;
pub mod orders;
pub mod params;
pub mod products;
pub mod promotions;
pub mod reservations;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/categories", catalog::categories_router())
        .nest("/toppings", catalog::toppings_router())
        .nest("/banners", catalog::banners_router())
        .nest("/brand", catalog::brand_router())
        .nest("/partnership", catalog::partnership_router())
        .nest("/promotions", promotions::router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::route())
        .nest("/me", me::router())
        .nest("/jobs", careers::jobs_router())
        .nest("/applications", careers::applications_router())
        .nest("/reservations", reservations::router())
        .nest("/admin", admin::router())
}
