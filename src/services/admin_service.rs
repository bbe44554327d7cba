use crate::{
    audit::log_audit,
    dto::{
        orders::{OrderList, UpdateOrderStatusRequest},
        users::{UpdatePointsRequest, UpdateRoleRequest, UserList, UserView},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, OrderStatus, User},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, Pagination},
    services::auth_service::normalize_email,
    state::AppState,
    storage::Watch,
};

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<OrderStatus>().map_err(AppError::BadRequest)?),
    };

    let orders: Vec<Order> = state
        .store
        .list::<Order>()
        .await?
        .into_iter()
        .filter(|order| status.is_none_or(|s| order.status == s))
        .collect();
    let (items, meta) = query.pagination().paginate(orders);
    Ok(ApiResponse::success("Ok", OrderList { items }, Some(meta)))
}

/// Live order list for the back-office: the current orders, then a fresh list after every change.
pub async fn order_feed(state: &AppState, user: &AuthUser) -> AppResult<Watch<Order>> {
    ensure_admin(user)?;
    let feed = state.store.watch::<Order>().await?;
    tracing::debug!(user_id = %user.user_id, "admin order feed opened");
    Ok(feed)
}

pub async fn get_order_admin(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    let order = state.store.fetch::<Order>(id).await?;
    Ok(ApiResponse::success("Order found", order, Some(Meta::empty())))
}

/// Any status may follow any other; the item snapshot is left untouched.
pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    let mut order = state.store.fetch::<Order>(id).await?;
    let previous = order.status;
    order.status = payload.status;
    let order = state.store.update(order).await?;

    log_audit(
        user,
        "order_status_update",
        "orders",
        Some(serde_json::json!({
            "order_id": order.id,
            "from": previous.as_str(),
            "status": order.status.as_str(),
        })),
    );

    Ok(ApiResponse::success(
        "Order updated",
        order,
        Some(Meta::empty()),
    ))
}

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let users: Vec<UserView> = state
        .store
        .list::<User>()
        .await?
        .into_iter()
        .map(UserView::from)
        .collect();
    let (items, meta) = pagination.paginate(users);
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

/// Role changes on the configured super-admin are refused.
pub async fn update_user_role(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: UpdateRoleRequest,
) -> AppResult<ApiResponse<UserView>> {
    ensure_admin(user)?;
    let mut target = state.store.fetch::<User>(id).await?;
    if normalize_email(&target.email) == state.config.super_admin_email {
        return Err(AppError::Forbidden);
    }

    target.role = payload.role;
    let target = state.store.update(target).await?;

    log_audit(
        user,
        "user_role_update",
        "users",
        Some(serde_json::json!({ "user_id": target.id, "role": target.role.as_str() })),
    );

    Ok(ApiResponse::success(
        "Updated",
        UserView::from(target),
        Some(Meta::empty()),
    ))
}

pub async fn update_user_points(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: UpdatePointsRequest,
) -> AppResult<ApiResponse<UserView>> {
    ensure_admin(user)?;
    let mut target = state.store.fetch::<User>(id).await?;
    let previous = target.loyalty_points;
    target.loyalty_points = payload.points;
    let target = state.store.update(target).await?;

    log_audit(
        user,
        "user_points_update",
        "users",
        Some(serde_json::json!({
            "user_id": target.id,
            "from": previous,
            "points": target.loyalty_points,
        })),
    );

    Ok(ApiResponse::success(
        "Updated",
        UserView::from(target),
        Some(Meta::empty()),
    ))
}
