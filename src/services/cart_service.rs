use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    dto::cart::{AddToCartRequest, CartView, QuoteRequest, UpdateQuantityRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{CartLine, DiscountCode, Product, Topping},
    response::{ApiResponse, Meta},
    rules::{cart::Cart, discount, pricing},
    state::AppState,
};

pub async fn size_upcharge(state: &AppState) -> AppResult<Decimal> {
    Ok(state.store.brand_settings().await?.size_l_price)
}

fn cart_view(lines: &[CartLine], upcharge: Decimal) -> CartView {
    let subtotal = pricing::subtotal(lines, upcharge);
    CartView {
        lines: lines
            .iter()
            .cloned()
            .map(|line| pricing::freeze_line(line, upcharge))
            .collect(),
        item_count: lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity)),
        quote: pricing::PriceQuote::new(subtotal, Decimal::ZERO, None),
    }
}

/// Current lines of the user's cart, without holding the lock.
pub async fn cart_lines(state: &AppState, user: &AuthUser) -> Vec<CartLine> {
    let carts = state.carts.read().await;
    carts
        .get(&user.user_id)
        .map(|cart| cart.lines().to_vec())
        .unwrap_or_default()
}

pub async fn get_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let upcharge = size_upcharge(state).await?;
    let lines = cart_lines(state, user).await;
    Ok(ApiResponse::success("Cart", cart_view(&lines, upcharge), None))
}

/// Resolves topping ids against the topping list; unknown ids are rejected.
async fn resolve_toppings(state: &AppState, ids: &[String]) -> AppResult<Vec<Topping>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let toppings = state.store.list::<Topping>().await?;
    ids.iter()
        .map(|id| {
            toppings
                .iter()
                .find(|t| &t.id == id)
                .cloned()
                .ok_or_else(|| AppError::BadRequest(format!("Unknown topping {id}")))
        })
        .collect()
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    let product = state
        .store
        .get::<Product>(&payload.product_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let toppings = resolve_toppings(state, &payload.topping_ids).await?;
    let upcharge = size_upcharge(state).await?;

    let mut carts = state.carts.write().await;
    let cart = carts.entry(user.user_id.clone()).or_insert_with(Cart::new);
    let line = cart.add(&product, payload.size, payload.note.as_deref(), toppings)?;
    tracing::debug!(
        user_id = %user.user_id,
        line_id = %line.id,
        quantity = line.quantity,
        "cart line added"
    );

    Ok(ApiResponse::success(
        "Added to cart",
        cart_view(cart.lines(), upcharge),
        Some(Meta::empty()),
    ))
}

pub async fn update_quantity(
    state: &AppState,
    user: &AuthUser,
    line_id: &str,
    payload: UpdateQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    let upcharge = size_upcharge(state).await?;
    let mut carts = state.carts.write().await;
    let cart = carts.get_mut(&user.user_id).ok_or(AppError::NotFound)?;
    cart.update_quantity(line_id, payload.delta)?;
    Ok(ApiResponse::success(
        "Updated",
        cart_view(cart.lines(), upcharge),
        Some(Meta::empty()),
    ))
}

pub async fn remove_line(
    state: &AppState,
    user: &AuthUser,
    line_id: &str,
) -> AppResult<ApiResponse<CartView>> {
    let upcharge = size_upcharge(state).await?;
    let mut carts = state.carts.write().await;
    let cart = carts.get_mut(&user.user_id).ok_or(AppError::NotFound)?;
    cart.remove(line_id)?;
    Ok(ApiResponse::success(
        "Removed from cart",
        cart_view(cart.lines(), upcharge),
        Some(Meta::empty()),
    ))
}

pub async fn clear_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let upcharge = size_upcharge(state).await?;
    state.carts.write().await.remove(&user.user_id);
    Ok(ApiResponse::success(
        "Cart cleared",
        cart_view(&[], upcharge),
        Some(Meta::empty()),
    ))
}

/// Prices `lines` with an optional discount code as of today.
pub async fn price_lines(
    state: &AppState,
    lines: &[CartLine],
    upcharge: Decimal,
    code: Option<&str>,
) -> AppResult<pricing::PriceQuote> {
    let subtotal = pricing::subtotal(lines, upcharge);

    let code = code.map(str::trim).filter(|c| !c.is_empty());
    let Some(code) = code else {
        return Ok(pricing::PriceQuote::new(subtotal, Decimal::ZERO, None));
    };

    let promotions = state.store.list::<DiscountCode>().await?;
    let today = Utc::now().date_naive();
    let (applied, amount) = discount::apply(&promotions, code, lines, upcharge, today)?;
    Ok(pricing::PriceQuote::new(subtotal, amount, Some(applied)))
}

pub async fn quote(
    state: &AppState,
    user: &AuthUser,
    payload: QuoteRequest,
) -> AppResult<ApiResponse<pricing::PriceQuote>> {
    let lines = cart_lines(state, user).await;
    if lines.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }
    let upcharge = size_upcharge(state).await?;
    let quote = price_lines(state, &lines, upcharge, payload.discount_code.as_deref()).await?;
    Ok(ApiResponse::success("Quote", quote, None))
}
