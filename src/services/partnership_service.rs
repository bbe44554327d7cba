use crate::{
    audit::log_audit,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::PartnershipContent,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn get_partnership(state: &AppState) -> AppResult<ApiResponse<PartnershipContent>> {
    let content = state.store.partnership().await?;
    Ok(ApiResponse::success("Partnership content", content, None))
}

/// Each language needs a title and at least one pillar.
pub fn validate_partnership(content: &PartnershipContent) -> AppResult<()> {
    for (language, copy) in content.copies() {
        if copy.title.trim().is_empty() {
            return Err(AppError::BadRequest(format!("Title is required ({language})")));
        }
        if copy.pillars.is_empty() {
            return Err(AppError::BadRequest(format!(
                "At least one pillar is required ({language})"
            )));
        }
    }
    Ok(())
}

pub async fn update_partnership(
    state: &AppState,
    user: &AuthUser,
    mut payload: PartnershipContent,
) -> AppResult<ApiResponse<PartnershipContent>> {
    ensure_admin(user)?;
    validate_partnership(&payload)?;
    for copy in [&mut payload.vi, &mut payload.en] {
        copy.tags = copy
            .tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect();
    }
    let content = state.store.save_partnership(payload).await?;

    log_audit(user, "partnership_update", "partnership_content", None);

    Ok(ApiResponse::success("Updated", content, Some(Meta::empty())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_partnership(&PartnershipContent::default()).is_ok());
    }

    #[test]
    fn every_language_needs_title_and_pillar() {
        let mut untitled = PartnershipContent::default();
        untitled.en.title = "  ".to_string();
        assert!(matches!(
            validate_partnership(&untitled),
            Err(AppError::BadRequest(msg)) if msg.contains("(en)")
        ));

        let mut bare = PartnershipContent::default();
        bare.vi.pillars.clear();
        assert!(matches!(
            validate_partnership(&bare),
            Err(AppError::BadRequest(msg)) if msg.contains("(vi)")
        ));
    }
}
