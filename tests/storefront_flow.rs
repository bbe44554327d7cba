use std::{path::Path, sync::Arc};

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use coffee_shop_api::{
    app::build_app,
    config::{AppConfig, StorageConfig},
    dto::{
        auth::{LoginRequest, RegisterRequest},
        cart::{AddToCartRequest, QuoteRequest, UpdateQuantityRequest},
        orders::CheckoutRequest,
        products::CreateProductRequest,
        reviews::ReviewRequest,
        users::{UpdatePointsRequest, UpdateRoleRequest},
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{DiscountCode, DiscountType, Order, Product, ProductSize, Role, Topping, User},
    routes::params::Pagination,
    rules::loyalty::LoyaltyTier,
    services::{
        admin_service, auth_service::CredentialVerifier, auth_service, cart_service,
        order_service, product_service, review_service, user_service,
    },
    state::AppState,
    storage::{LocalStore, Store},
};
use rust_decimal::Decimal;
use tower::ServiceExt;

const SUPER_ADMIN: &str = "boss@example.com";

/// Skips argon2 so the flows stay fast.
struct PlainVerifier;

impl CredentialVerifier for PlainVerifier {
    fn hash(&self, password: &str) -> anyhow::Result<String> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("plain:") == Some(password)
    }
}

fn test_config(dir: &Path) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        storage: StorageConfig::Local {
            dir: dir.to_path_buf(),
        },
        jwt_secret: "test-secret".into(),
        token_ttl_hours: 1,
        super_admin_email: SUPER_ADMIN.into(),
        loyalty_points_rate: Decimal::ONE,
    }
}

async fn setup_state(dir: &Path) -> anyhow::Result<AppState> {
    let store = Store::Local(LocalStore::open(dir).await?);
    Ok(AppState::with_verifier(
        store,
        test_config(dir),
        Arc::new(PlainVerifier),
    ))
}

async fn create_user(state: &AppState, email: &str, role: Role) -> anyhow::Result<AuthUser> {
    let user = state
        .store
        .insert(User {
            id: format!("user-{email}"),
            name: email.split('@').next().unwrap_or("user").to_string(),
            email: email.to_string(),
            role,
            avatar: None,
            phone: None,
            address: None,
            loyalty_points: 0,
            password_hash: Some("plain:pw".into()),
        })
        .await?;
    Ok(AuthUser {
        user_id: user.id,
        role,
    })
}

async fn seed_product(state: &AppState, id: &str, cents: i64) -> anyhow::Result<Product> {
    let product = state
        .store
        .insert(Product {
            id: id.to_string(),
            name: format!("Drink {id}"),
            description: String::new(),
            price: Decimal::new(cents, 2),
            original_price: None,
            category: "coffee".into(),
            image: None,
            rating: 0.0,
            review_count: 0,
            is_available: true,
        })
        .await?;
    Ok(product)
}

async fn seed_code(state: &AppState, code: &str, percent: i64) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    state
        .store
        .insert(DiscountCode {
            id: format!("promo-{code}"),
            code: code.to_string(),
            discount_type: DiscountType::Percent,
            value: Decimal::new(percent, 0),
            start_date: today - Duration::days(1),
            end_date: today + Duration::days(1),
            is_active: true,
            applicable_product_ids: vec![],
            description: None,
        })
        .await?;
    Ok(())
}

fn add(product_id: &str, size: Option<ProductSize>, note: Option<&str>) -> AddToCartRequest {
    AddToCartRequest {
        product_id: product_id.to_string(),
        size,
        note: note.map(str::to_owned),
        topping_ids: vec![],
    }
}

#[tokio::test]
async fn identical_lines_merge_and_quote_applies_code() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(dir.path()).await?;
    let user = create_user(&state, "ana@example.com", Role::Customer).await?;
    seed_product(&state, "latte", 1000).await?;
    seed_code(&state, "SAVE10", 10).await?;

    cart_service::add_to_cart(&state, &user, add("latte", None, Some("  "))).await?;
    let view = cart_service::add_to_cart(&state, &user, add("latte", Some(ProductSize::M), None))
        .await?
        .data
        .expect("cart");
    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.item_count, 2);

    let view = cart_service::add_to_cart(&state, &user, add("latte", Some(ProductSize::L), None))
        .await?
        .data
        .expect("cart");
    assert_eq!(view.lines.len(), 2);
    // 2 x 10.00 + 1 x (10.00 + 0.50 default upcharge)
    assert_eq!(view.quote.subtotal, Decimal::new(3050, 2));

    let quote = cart_service::quote(
        &state,
        &user,
        QuoteRequest {
            discount_code: Some(" save10 ".into()),
        },
    )
    .await?
    .data
    .expect("quote");
    assert_eq!(quote.discount, Decimal::new(305, 2));
    assert_eq!(quote.total, Decimal::new(2745, 2));
    assert_eq!(quote.discount_code.as_deref(), Some("SAVE10"));

    let unknown = cart_service::quote(
        &state,
        &user,
        QuoteRequest {
            discount_code: Some("NOPE".into()),
        },
    )
    .await;
    assert!(matches!(unknown, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn quantity_changes_never_drop_below_one() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(dir.path()).await?;
    let user = create_user(&state, "ana@example.com", Role::Customer).await?;
    seed_product(&state, "mocha", 450).await?;

    let view = cart_service::add_to_cart(&state, &user, add("mocha", None, None))
        .await?
        .data
        .expect("cart");
    let line_id = view.lines[0].line.id.clone();

    let view = cart_service::update_quantity(
        &state,
        &user,
        &line_id,
        UpdateQuantityRequest { delta: -5 },
    )
    .await?
    .data
    .expect("cart");
    assert_eq!(view.item_count, 1);

    let missing =
        cart_service::update_quantity(&state, &user, "nope", UpdateQuantityRequest { delta: 1 })
            .await;
    assert!(matches!(missing, Err(AppError::NotFound)));
    Ok(())
}

#[tokio::test]
async fn repeated_checkout_returns_stored_order_without_double_points() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(dir.path()).await?;
    let user = create_user(&state, "ana@example.com", Role::Customer).await?;
    let other = create_user(&state, "bo@example.com", Role::Customer).await?;
    seed_product(&state, "latte", 1000).await?;
    seed_code(&state, "SAVE10", 10).await?;

    let empty = order_service::checkout(&state, &user, CheckoutRequest::default()).await;
    assert!(matches!(empty, Err(AppError::BadRequest(_))));

    cart_service::add_to_cart(&state, &user, add("latte", None, None)).await?;
    cart_service::add_to_cart(&state, &user, add("latte", None, None)).await?;

    let request = || CheckoutRequest {
        order_id: Some("order-1".into()),
        payment_method: Some("cash".into()),
        discount_code: Some("SAVE10".into()),
        ..CheckoutRequest::default()
    };

    let placed = order_service::checkout(&state, &user, request()).await?;
    assert_eq!(placed.message, "Order placed");
    let order = placed.data.expect("order");
    assert_eq!(order.total, Decimal::new(1800, 2));
    assert_eq!(order.points_awarded, 18);
    assert!(cart_service::cart_lines(&state, &user).await.is_empty());

    let repeated = order_service::checkout(&state, &user, request()).await?;
    assert_eq!(repeated.message, "Order already placed");
    assert_eq!(repeated.data.expect("order").id, order.id);

    let account = state.store.fetch::<User>(&user.user_id).await?;
    assert_eq!(account.loyalty_points, 18);
    assert_eq!(state.store.list::<Order>().await?.len(), 1);

    let hijack = order_service::checkout(&state, &other, request()).await;
    assert!(matches!(hijack, Err(AppError::Conflict(_))));

    let foreign = order_service::get_my_order(&state, &other, "order-1").await;
    assert!(matches!(foreign, Err(AppError::NotFound)));
    Ok(())
}

#[tokio::test]
async fn loyalty_reflects_points_set_by_admin() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(dir.path()).await?;
    let admin = create_user(&state, SUPER_ADMIN, Role::Admin).await?;
    let user = create_user(&state, "ana@example.com", Role::Customer).await?;

    admin_service::update_user_points(
        &state,
        &admin,
        &user.user_id,
        UpdatePointsRequest { points: 900 },
    )
    .await?;

    let view = user_service::loyalty(&state, &user).await?.data.expect("loyalty");
    assert_eq!(view.points, 900);
    assert_eq!(view.tier, LoyaltyTier::Gold);
    assert_eq!(view.next_tier, Some(LoyaltyTier::Diamond));
    assert_eq!(view.points_to_next_tier, Some(450));
    Ok(())
}

#[tokio::test]
async fn admin_operations_are_role_protected() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(dir.path()).await?;
    let admin = create_user(&state, SUPER_ADMIN, Role::Admin).await?;
    let user = create_user(&state, "ana@example.com", Role::Customer).await?;

    let product = || CreateProductRequest {
        name: "Cold Brew".into(),
        description: String::new(),
        price: Decimal::new(500, 2),
        original_price: None,
        category: "coffee".into(),
        image: None,
        is_available: None,
    };

    let denied = product_service::create_product(&state, &user, product()).await;
    assert!(matches!(denied, Err(AppError::Forbidden)));
    assert!(state.store.list::<Product>().await?.is_empty());

    product_service::create_product(&state, &admin, product()).await?;
    assert_eq!(state.store.list::<Product>().await?.len(), 1);

    let demote_boss = admin_service::update_user_role(
        &state,
        &admin,
        &admin.user_id,
        UpdateRoleRequest {
            role: Role::Customer,
        },
    )
    .await;
    assert!(matches!(demote_boss, Err(AppError::Forbidden)));

    let promoted = admin_service::update_user_role(
        &state,
        &admin,
        &user.user_id,
        UpdateRoleRequest { role: Role::Admin },
    )
    .await?
    .data
    .expect("user");
    assert_eq!(promoted.role, Role::Admin);

    let listing = admin_service::list_users(&state, &user, Pagination::default()).await;
    assert!(matches!(listing, Err(AppError::Forbidden)));
    Ok(())
}

#[tokio::test]
async fn reviews_update_product_rating() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(dir.path()).await?;
    let ana = create_user(&state, "ana@example.com", Role::Customer).await?;
    let bo = create_user(&state, "bo@example.com", Role::Customer).await?;
    seed_product(&state, "latte", 1000).await?;

    let out_of_range = review_service::create_review(
        &state,
        &ana,
        "latte",
        ReviewRequest {
            rating: 6,
            comment: String::new(),
        },
    )
    .await;
    assert!(matches!(out_of_range, Err(AppError::BadRequest(_))));

    for (user, rating) in [(&ana, 5), (&bo, 4)] {
        review_service::create_review(
            &state,
            user,
            "latte",
            ReviewRequest {
                rating,
                comment: "nice".into(),
            },
        )
        .await?;
    }

    let product = state.store.fetch::<Product>("latte").await?;
    assert_eq!(product.review_count, 2);
    assert_eq!(product.rating, 4.5);
    Ok(())
}

#[tokio::test]
async fn saved_state_survives_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    {
        let state = setup_state(dir.path()).await?;
        let user = create_user(&state, "ana@example.com", Role::Customer).await?;
        seed_product(&state, "latte", 1000).await?;
        state
            .store
            .insert(Topping {
                id: "oat".into(),
                name: "Oat milk".into(),
                price: Decimal::new(50, 2),
            })
            .await?;
        cart_service::add_to_cart(
            &state,
            &user,
            AddToCartRequest {
                topping_ids: vec!["oat".into()],
                ..add("latte", Some(ProductSize::L), None)
            },
        )
        .await?;
        order_service::checkout(&state, &user, CheckoutRequest::default()).await?;
    }

    let reopened = setup_state(dir.path()).await?;
    let orders = reopened.store.list::<Order>().await?;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].items[0].line.toppings[0].name, "Oat milk");
    assert_eq!(orders[0].total, Decimal::new(1100, 2));

    let account = reopened
        .store
        .fetch::<User>("user-ana@example.com")
        .await?;
    assert_eq!(account.loyalty_points, 11);
    Ok(())
}

#[tokio::test]
async fn concurrent_registrations_keep_emails_unique() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(dir.path()).await?;
    let register = |email: &str| {
        auth_service::register_user(
            &state,
            RegisterRequest {
                name: "Ana".into(),
                email: email.into(),
                password: "pw".into(),
            },
        )
    };

    let (first, second) = tokio::join!(register("ana@example.com"), register("ANA@example.com"));
    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(AppError::Conflict(_))))
    );
    assert_eq!(state.store.list::<User>().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn router_requires_bearer_token() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(dir.path()).await?;
    auth_service::register_user(
        &state,
        RegisterRequest {
            name: "Ana".into(),
            email: "Ana@Example.com".into(),
            password: "pw".into(),
        },
    )
    .await?;
    let login = auth_service::login_user(
        &state,
        LoginRequest {
            email: "ana@example.com".into(),
            password: "pw".into(),
        },
    )
    .await?
    .data
    .expect("login");
    let app = build_app(state);

    let health = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty())?)
        .await?;
    assert_eq!(health.status(), StatusCode::OK);
    assert!(health.headers().contains_key("x-request-id"));

    let missing = app
        .clone()
        .oneshot(Request::get("/nowhere").body(Body::empty())?)
        .await?;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body = axum::body::to_bytes(missing.into_body(), usize::MAX).await?;
    let json: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(json["data"]["path"], "/nowhere");

    let anonymous = app
        .clone()
        .oneshot(Request::get("/api/cart").body(Body::empty())?)
        .await?;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .clone()
        .oneshot(
            Request::get("/api/me")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let me = app
        .clone()
        .oneshot(
            Request::get("/api/me")
                .header(header::AUTHORIZATION, login.token.as_str())
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(me.status(), StatusCode::OK);
    let body = axum::body::to_bytes(me.into_body(), usize::MAX).await?;
    let json: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(json["data"]["email"], "ana@example.com");
    assert!(json["data"].get("passwordHash").is_none());

    let forbidden = app
        .oneshot(
            Request::get("/api/admin/orders")
                .header(header::AUTHORIZATION, login.token.as_str())
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    Ok(())
}
