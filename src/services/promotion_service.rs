use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::promotions::{PromotionList, PromotionRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{DiscountCode, DiscountType},
    response::{ApiResponse, Meta},
    rules::discount::{is_valid_on, normalize_code},
    state::AppState,
};

/// Codes a customer can use today.
pub async fn list_active(state: &AppState) -> AppResult<ApiResponse<PromotionList>> {
    let today = Utc::now().date_naive();
    let items = state
        .store
        .list::<DiscountCode>()
        .await?
        .into_iter()
        .filter(|code| is_valid_on(code, today))
        .collect();
    Ok(ApiResponse::success("Promotions", PromotionList { items }, None))
}

pub async fn list_all(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<PromotionList>> {
    ensure_admin(user)?;
    let items = state.store.list::<DiscountCode>().await?;
    Ok(ApiResponse::success("Promotions", PromotionList { items }, None))
}

/// Builds a code record from the request, rejecting values that could never apply sanely.
pub fn code_from_request(id: String, payload: PromotionRequest) -> AppResult<DiscountCode> {
    let code = normalize_code(&payload.code);
    if code.is_empty() {
        return Err(AppError::BadRequest("Code is required".to_string()));
    }
    if payload.value.is_sign_negative() {
        return Err(AppError::BadRequest("Value must not be negative".to_string()));
    }
    if payload.discount_type == DiscountType::Percent && payload.value > Decimal::ONE_HUNDRED {
        return Err(AppError::BadRequest(
            "Percentage value must be between 0 and 100".to_string(),
        ));
    }
    if payload.end_date < payload.start_date {
        return Err(AppError::BadRequest(
            "End date must not be before start date".to_string(),
        ));
    }

    Ok(DiscountCode {
        id,
        code,
        discount_type: payload.discount_type,
        value: payload.value,
        start_date: payload.start_date,
        end_date: payload.end_date,
        is_active: payload.is_active.unwrap_or(true),
        applicable_product_ids: payload.applicable_product_ids,
        description: payload.description,
    })
}

async fn ensure_unique_code(state: &AppState, code: &str, except: Option<&str>) -> AppResult<()> {
    let taken = state
        .store
        .list::<DiscountCode>()
        .await?
        .iter()
        .any(|p| normalize_code(&p.code) == code && Some(p.id.as_str()) != except);
    if taken {
        return Err(AppError::Conflict(format!("Code `{code}` already exists")));
    }
    Ok(())
}

pub async fn create_promotion(
    state: &AppState,
    user: &AuthUser,
    payload: PromotionRequest,
) -> AppResult<ApiResponse<DiscountCode>> {
    ensure_admin(user)?;
    let code = code_from_request(Uuid::new_v4().to_string(), payload)?;
    ensure_unique_code(state, &code.code, None).await?;
    let code = state.store.insert(code).await?;

    log_audit(
        user,
        "promotion_create",
        "promotions",
        Some(serde_json::json!({ "promotion_id": code.id, "code": code.code })),
    );
    Ok(ApiResponse::success("Promotion created", code, Some(Meta::empty())))
}

pub async fn update_promotion(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: PromotionRequest,
) -> AppResult<ApiResponse<DiscountCode>> {
    ensure_admin(user)?;
    let existing = state.store.fetch::<DiscountCode>(id).await?;
    let code = code_from_request(existing.id, payload)?;
    ensure_unique_code(state, &code.code, Some(id)).await?;
    let code = state.store.update(code).await?;

    log_audit(
        user,
        "promotion_update",
        "promotions",
        Some(serde_json::json!({ "promotion_id": code.id, "code": code.code })),
    );
    Ok(ApiResponse::success("Updated", code, Some(Meta::empty())))
}

pub async fn delete_promotion(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    state.store.delete::<DiscountCode>(id).await?;

    log_audit(
        user,
        "promotion_delete",
        "promotions",
        Some(serde_json::json!({ "promotion_id": id })),
    );
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn request(discount_type: DiscountType, value: i64) -> PromotionRequest {
        PromotionRequest {
            code: " summer ".to_string(),
            discount_type,
            value: Decimal::new(value, 0),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 8, 31).unwrap(),
            is_active: None,
            applicable_product_ids: vec![],
            description: None,
        }
    }

    #[test]
    fn normalizes_code_and_defaults_active() {
        let code = code_from_request("p1".into(), request(DiscountType::Percent, 15)).unwrap();
        assert_eq!(code.code, "SUMMER");
        assert!(code.is_active);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(code_from_request("p1".into(), request(DiscountType::Percent, 101)).is_err());
        assert!(code_from_request("p1".into(), request(DiscountType::Fixed, -5)).is_err());
        assert!(code_from_request("p1".into(), request(DiscountType::Fixed, 500)).is_ok());

        let mut backwards = request(DiscountType::Fixed, 5);
        backwards.end_date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(code_from_request("p1".into(), backwards).is_err());
    }
}
