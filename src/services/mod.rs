pub mod admin_service;
pub mod auth_service;
pub mod brand_service;
pub mod careers_service;
pub mod cart_service;
pub mod catalog_service;
pub mod order_service;
pub mod partnership_service;
pub mod product_service;
pub mod promotion_service;
pub mod reservation_service;
pub mod review_service;
pub mod user_service;
