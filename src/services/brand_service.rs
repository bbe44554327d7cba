use crate::{
    audit::log_audit,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::BrandSettings,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn get_brand(state: &AppState) -> AppResult<ApiResponse<BrandSettings>> {
    let settings = state.store.brand_settings().await?;
    Ok(ApiResponse::success("Brand settings", settings, None))
}

pub fn validate_brand(settings: &BrandSettings) -> AppResult<()> {
    if settings.brand_name.trim().is_empty() {
        return Err(AppError::BadRequest("Brand name is required".to_string()));
    }
    if !settings.loyalty_thresholds().is_monotonic() {
        return Err(AppError::BadRequest(
            "Loyalty thresholds must not decrease from bronze to diamond".to_string(),
        ));
    }
    if settings.size_l_price.is_sign_negative() {
        return Err(AppError::BadRequest(
            "Size L price must not be negative".to_string(),
        ));
    }
    Ok(())
}

pub async fn update_brand(
    state: &AppState,
    user: &AuthUser,
    payload: BrandSettings,
) -> AppResult<ApiResponse<BrandSettings>> {
    ensure_admin(user)?;
    validate_brand(&payload)?;
    let settings = state.store.save_brand_settings(payload).await?;

    log_audit(
        user,
        "brand_update",
        "brand_settings",
        Some(serde_json::json!({ "brand_name": settings.brand_name })),
    );

    Ok(ApiResponse::success("Updated", settings, Some(Meta::empty())))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_brand(&BrandSettings::default()).is_ok());
    }

    #[test]
    fn rejects_decreasing_thresholds_and_negative_upcharge() {
        let thresholds = BrandSettings {
            loyalty_gold_min: 100,
            ..BrandSettings::default()
        };
        assert!(matches!(
            validate_brand(&thresholds),
            Err(AppError::BadRequest(_))
        ));

        let upcharge = BrandSettings {
            size_l_price: Decimal::new(-1, 0),
            ..BrandSettings::default()
        };
        assert!(matches!(
            validate_brand(&upcharge),
            Err(AppError::BadRequest(_))
        ));
    }
}
