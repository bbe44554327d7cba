use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        careers::{ApplicationList, ApplicationRequest, JobList, JobRequest},
        cart::{AddToCartRequest, CartView, QuoteRequest, UpdateQuantityRequest},
        catalog::{
            BannerList, BannerRequest, CategoryList, CategoryRequest, ToppingList, ToppingRequest,
        },
        orders::{CheckoutRequest, OrderList, UpdateOrderStatusRequest},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        promotions::{PromotionList, PromotionRequest},
        reservations::{ReservationList, ReservationRequest, UpdateReservationStatusRequest},
        reviews::{ReviewList, ReviewRequest},
        users::{
            LoyaltyView, UpdatePointsRequest, UpdateProfileRequest, UpdateRoleRequest, UserList,
            UserView,
        },
    },
    models::{
        Banner, BrandSettings, CartLine, Category, DiscountCode, DiscountType, Job,
        JobApplication, Order, OrderLine, OrderStatus, PartnershipContent, PartnershipCopy,
        PartnershipPillar, Product, ProductSize, Reservation, ReservationStatus, Review, Role,
        Topping,
    },
    response::{ApiResponse, Meta},
    routes::{
        admin, auth, careers, cart, catalog, health, me, orders, params, products, promotions,
        reservations,
    },
    rules::{
        loyalty::{LoyaltyThresholds, LoyaltyTier},
        pricing::PriceQuote,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        products::list_reviews,
        products::create_review,
        catalog::list_categories,
        catalog::create_category,
        catalog::update_category,
        catalog::delete_category,
        catalog::list_toppings,
        catalog::create_topping,
        catalog::update_topping,
        catalog::delete_topping,
        catalog::list_banners,
        catalog::create_banner,
        catalog::update_banner,
        catalog::delete_banner,
        catalog::get_brand,
        catalog::update_brand,
        catalog::get_partnership,
        catalog::update_partnership,
        promotions::list_active,
        promotions::list_all,
        promotions::create_promotion,
        promotions::update_promotion,
        promotions::delete_promotion,
        cart::cart_list,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_line,
        cart::clear_cart,
        cart::quote,
        orders::list_order,
        orders::checkout,
        orders::get_order,
        me::me,
        me::update_profile,
        me::loyalty,
        careers::list_jobs,
        careers::list_all_jobs,
        careers::create_job,
        careers::update_job,
        careers::delete_job,
        careers::submit_application,
        reservations::create_reservation,
        admin::list_all_orders,
        admin::stream_orders,
        admin::get_order_admin,
        admin::update_order_status,
        admin::list_users,
        admin::update_user_role,
        admin::update_user_points,
        admin::list_applications,
        admin::list_reservations,
        admin::update_reservation_status
    ),
    components(
        schemas(
            Product,
            Category,
            Topping,
            ProductSize,
            CartLine,
            OrderLine,
            Order,
            OrderStatus,
            Role,
            BrandSettings,
            PartnershipContent,
            PartnershipCopy,
            PartnershipPillar,
            Banner,
            DiscountCode,
            DiscountType,
            Review,
            Job,
            JobApplication,
            Reservation,
            ReservationStatus,
            PriceQuote,
            LoyaltyTier,
            LoyaltyThresholds,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UserView,
            UserList,
            UpdateProfileRequest,
            UpdateRoleRequest,
            UpdatePointsRequest,
            LoyaltyView,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            CategoryRequest,
            CategoryList,
            ToppingRequest,
            ToppingList,
            BannerRequest,
            BannerList,
            PromotionRequest,
            PromotionList,
            AddToCartRequest,
            UpdateQuantityRequest,
            QuoteRequest,
            CartView,
            CheckoutRequest,
            OrderList,
            UpdateOrderStatusRequest,
            ReviewRequest,
            ReviewList,
            JobRequest,
            JobList,
            ApplicationRequest,
            ApplicationList,
            ReservationRequest,
            ReservationList,
            UpdateReservationStatusRequest,
            health::HealthData,
            params::Pagination,
            params::ProductQuery,
            params::OrderListQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartView>,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<UserView>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Reviews", description = "Product review endpoints"),
        (name = "Catalog", description = "Categories, toppings and banners"),
        (name = "Brand", description = "Store-wide brand settings"),
        (name = "Promotions", description = "Discount code endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Account", description = "Profile and loyalty endpoints"),
        (name = "Careers", description = "Job postings and applications"),
        (name = "Reservations", description = "Table reservations"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
