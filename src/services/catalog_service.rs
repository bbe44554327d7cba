//! Categories, toppings and banners: small admin-owned lists read by the storefront.

use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::catalog::{
        BannerList, BannerRequest, CategoryList, CategoryRequest, ToppingList, ToppingRequest,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Banner, Category, Topping},
    response::{ApiResponse, Meta},
    state::AppState,
};

fn deleted() -> ApiResponse<serde_json::Value> {
    ApiResponse::success("Deleted", serde_json::json!({}), Some(Meta::empty()))
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items = state.store.list::<Category>().await?;
    Ok(ApiResponse::success("Categories", CategoryList { items }, None))
}

fn validate_category(payload: &CategoryRequest) -> AppResult<(String, String)> {
    let name = payload.name.trim();
    let key = payload.key.trim();
    if name.is_empty() || key.is_empty() {
        return Err(AppError::BadRequest("Name and key are required".to_string()));
    }
    Ok((name.to_string(), key.to_string()))
}

async fn ensure_unique_key(state: &AppState, key: &str, except: Option<&str>) -> AppResult<()> {
    let taken = state
        .store
        .list::<Category>()
        .await?
        .iter()
        .any(|c| c.key == key && Some(c.id.as_str()) != except);
    if taken {
        return Err(AppError::Conflict(format!("Category key `{key}` is taken")));
    }
    Ok(())
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let (name, key) = validate_category(&payload)?;
    ensure_unique_key(state, &key, None).await?;

    let category = state
        .store
        .insert(Category {
            id: Uuid::new_v4().to_string(),
            name,
            key,
        })
        .await?;
    log_audit(
        user,
        "category_create",
        "categories",
        Some(serde_json::json!({ "category_id": category.id })),
    );
    Ok(ApiResponse::success("Category created", category, Some(Meta::empty())))
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let (name, key) = validate_category(&payload)?;
    let mut category = state.store.fetch::<Category>(id).await?;
    ensure_unique_key(state, &key, Some(id)).await?;

    category.name = name;
    category.key = key;
    let category = state.store.update(category).await?;
    log_audit(
        user,
        "category_update",
        "categories",
        Some(serde_json::json!({ "category_id": category.id })),
    );
    Ok(ApiResponse::success("Updated", category, Some(Meta::empty())))
}

pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    state.store.delete::<Category>(id).await?;
    log_audit(
        user,
        "category_delete",
        "categories",
        Some(serde_json::json!({ "category_id": id })),
    );
    Ok(deleted())
}

pub async fn list_toppings(state: &AppState) -> AppResult<ApiResponse<ToppingList>> {
    let items = state.store.list::<Topping>().await?;
    Ok(ApiResponse::success("Toppings", ToppingList { items }, None))
}

fn validate_topping(payload: &ToppingRequest) -> AppResult<String> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if payload.price.is_sign_negative() {
        return Err(AppError::BadRequest("price must not be negative".to_string()));
    }
    Ok(name.to_string())
}

pub async fn create_topping(
    state: &AppState,
    user: &AuthUser,
    payload: ToppingRequest,
) -> AppResult<ApiResponse<Topping>> {
    ensure_admin(user)?;
    let name = validate_topping(&payload)?;
    let topping = state
        .store
        .insert(Topping {
            id: Uuid::new_v4().to_string(),
            name,
            price: payload.price,
        })
        .await?;
    log_audit(
        user,
        "topping_create",
        "toppings",
        Some(serde_json::json!({ "topping_id": topping.id })),
    );
    Ok(ApiResponse::success("Topping created", topping, Some(Meta::empty())))
}

pub async fn update_topping(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: ToppingRequest,
) -> AppResult<ApiResponse<Topping>> {
    ensure_admin(user)?;
    let name = validate_topping(&payload)?;
    let mut topping = state.store.fetch::<Topping>(id).await?;
    topping.name = name;
    topping.price = payload.price;
    let topping = state.store.update(topping).await?;
    log_audit(
        user,
        "topping_update",
        "toppings",
        Some(serde_json::json!({ "topping_id": topping.id })),
    );
    Ok(ApiResponse::success("Updated", topping, Some(Meta::empty())))
}

pub async fn delete_topping(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    state.store.delete::<Topping>(id).await?;
    log_audit(
        user,
        "topping_delete",
        "toppings",
        Some(serde_json::json!({ "topping_id": id })),
    );
    Ok(deleted())
}

pub async fn list_banners(state: &AppState) -> AppResult<ApiResponse<BannerList>> {
    let items = state.store.list::<Banner>().await?;
    Ok(ApiResponse::success("Banners", BannerList { items }, None))
}

fn banner_from_request(id: String, payload: BannerRequest) -> AppResult<Banner> {
    let title = payload.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }
    Ok(Banner {
        id,
        title,
        subtitle: payload.subtitle,
        image_url: payload.image_url,
        cta_text: payload.cta_text,
        link_section: payload.link_section,
        ends_at: payload.ends_at,
    })
}

pub async fn create_banner(
    state: &AppState,
    user: &AuthUser,
    payload: BannerRequest,
) -> AppResult<ApiResponse<Banner>> {
    ensure_admin(user)?;
    let banner = banner_from_request(Uuid::new_v4().to_string(), payload)?;
    let banner = state.store.insert(banner).await?;
    log_audit(
        user,
        "banner_create",
        "banners",
        Some(serde_json::json!({ "banner_id": banner.id })),
    );
    Ok(ApiResponse::success("Banner created", banner, Some(Meta::empty())))
}

pub async fn update_banner(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: BannerRequest,
) -> AppResult<ApiResponse<Banner>> {
    ensure_admin(user)?;
    let existing = state.store.fetch::<Banner>(id).await?;
    let banner = banner_from_request(existing.id, payload)?;
    let banner = state.store.update(banner).await?;
    log_audit(
        user,
        "banner_update",
        "banners",
        Some(serde_json::json!({ "banner_id": banner.id })),
    );
    Ok(ApiResponse::success("Updated", banner, Some(Meta::empty())))
}

pub async fn delete_banner(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    state.store.delete::<Banner>(id).await?;
    log_audit(
        user,
        "banner_delete",
        "banners",
        Some(serde_json::json!({ "banner_id": id })),
    );
    Ok(deleted())
}
