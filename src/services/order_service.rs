use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::orders::{CheckoutRequest, OrderList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderStatus, User},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    rules::{cart::normalize_note, loyalty::earned_points, pricing},
    services::cart_service,
    state::AppState,
};

/// Turns the user's cart into an order.
///
/// Idempotent per `orderId`: when the client repeats a checkout with an id that is already
/// stored, the stored order comes back and no further points are awarded. The order write
/// and the points write are independent; a failed points write is logged and the order
/// stands.
pub async fn checkout(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<Order>> {
    let requested_id = payload
        .order_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned);

    if let Some(order_id) = requested_id.as_deref() {
        if let Some(existing) = state.store.get::<Order>(order_id).await? {
            if existing.user_id.as_deref() != Some(user.user_id.as_str()) {
                return Err(AppError::Conflict(format!("Order {order_id} already exists")));
            }
            tracing::info!(order_id, "repeated checkout, returning stored order");
            return Ok(ApiResponse::success(
                "Order already placed",
                existing,
                Some(Meta::empty()),
            ));
        }
    }

    let lines = cart_service::cart_lines(state, user).await;
    if lines.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    let upcharge = cart_service::size_upcharge(state).await?;
    let quote =
        cart_service::price_lines(state, &lines, upcharge, payload.discount_code.as_deref())
            .await?;

    let account = state.store.get::<User>(&user.user_id).await?;
    let customer_name = payload
        .customer_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .or_else(|| account.as_ref().map(|a| a.name.clone()))
        .unwrap_or_else(|| "Guest".to_string());

    let points = earned_points(quote.total, state.config.loyalty_points_rate);
    let order = Order {
        id: requested_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        user_id: Some(user.user_id.clone()),
        customer_name,
        items: lines
            .iter()
            .cloned()
            .map(|line| pricing::freeze_line(line, upcharge))
            .collect(),
        subtotal: quote.subtotal,
        discount: quote.discount,
        discount_code: quote.discount_code,
        total: quote.total,
        status: OrderStatus::Pending,
        created_at: Utc::now(),
        address: payload.address.or_else(|| account.as_ref().and_then(|a| a.address.clone())),
        phone: payload.phone.or_else(|| account.as_ref().and_then(|a| a.phone.clone())),
        payment_method: payload.payment_method,
        note: normalize_note(payload.note.as_deref()),
        points_awarded: points,
    };
    let order = state.store.insert(order).await?;
    {
        let mut carts = state.carts.write().await;
        if let Some(cart) = carts.get_mut(&user.user_id) {
            cart.settle(&lines);
            if cart.is_empty() {
                carts.remove(&user.user_id);
            }
        }
    }

    tracing::info!(
        order_id = %order.id,
        user_id = %user.user_id,
        total = %order.total,
        points,
        "order placed"
    );

    if points > 0 {
        if let Err(err) = award_points(state, &user.user_id, points).await {
            tracing::warn!(
                error = %err,
                order_id = %order.id,
                user_id = %user.user_id,
                "loyalty points award failed"
            );
        }
    }

    Ok(ApiResponse::success(
        "Order placed",
        order,
        Some(Meta::empty()),
    ))
}

async fn award_points(state: &AppState, user_id: &str, points: u64) -> AppResult<()> {
    let mut account = state.store.fetch::<User>(user_id).await?;
    account.loyalty_points = account.loyalty_points.saturating_add(points);
    state.store.update(account).await?;
    Ok(())
}

pub async fn list_my_orders(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<OrderList>> {
    let orders: Vec<Order> = state
        .store
        .list::<Order>()
        .await?
        .into_iter()
        .filter(|order| order.user_id.as_deref() == Some(user.user_id.as_str()))
        .collect();
    let (items, meta) = pagination.paginate(orders);
    Ok(ApiResponse::success("Ok", OrderList { items }, Some(meta)))
}

/// Customers only see their own orders; other ids read as missing.
pub async fn get_my_order(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<Order>> {
    let order = state.store.fetch::<Order>(id).await?;
    if order.user_id.as_deref() != Some(user.user_id.as_str()) && !user.is_admin() {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success("Order", order, None))
}
