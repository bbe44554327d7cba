use crate::{
    dto::users::{LoyaltyView, UpdateProfileRequest, UserView},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Meta},
    rules::loyalty::{next_tier, tier},
    state::AppState,
};

fn blank_to_none(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub async fn me(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<UserView>> {
    let account = state.store.fetch::<User>(&user.user_id).await?;
    Ok(ApiResponse::success("Me", UserView::from(account), None))
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<UserView>> {
    let mut account = state.store.fetch::<User>(&user.user_id).await?;

    if let Some(name) = payload.name {
        account.name = blank_to_none(name)
            .ok_or_else(|| AppError::BadRequest("Name must not be empty".to_string()))?;
    }
    if let Some(avatar) = payload.avatar {
        account.avatar = blank_to_none(avatar);
    }
    if let Some(phone) = payload.phone {
        account.phone = blank_to_none(phone);
    }
    if let Some(address) = payload.address {
        account.address = blank_to_none(address);
    }

    let account = state.store.update(account).await?;
    tracing::debug!(user_id = %account.id, "profile updated");
    Ok(ApiResponse::success(
        "Updated",
        UserView::from(account),
        Some(Meta::empty()),
    ))
}

pub async fn loyalty(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<LoyaltyView>> {
    let account = state.store.fetch::<User>(&user.user_id).await?;
    let thresholds = state.store.brand_settings().await?.loyalty_thresholds();
    let points = account.loyalty_points;
    let next = next_tier(points, &thresholds);

    let view = LoyaltyView {
        points,
        tier: tier(points, &thresholds),
        next_tier: next.map(|(tier, _)| tier),
        points_to_next_tier: next.map(|(_, missing)| missing),
        thresholds,
    };
    Ok(ApiResponse::success("Loyalty", view, None))
}
