use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    rules::catalog::filter_products,
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let products = state.store.list::<Product>().await?;
    let filtered = filter_products(&products, &query.filter());
    let (items, meta) = query.pagination().paginate(filtered);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    let product = state.store.fetch::<Product>(id).await?;
    Ok(ApiResponse::success("Product", product, None))
}

fn validate_price(price: Decimal, field: &str) -> AppResult<()> {
    if price.is_sign_negative() {
        return Err(AppError::BadRequest(format!("{field} must not be negative")));
    }
    Ok(())
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let name = payload.name.trim().to_string();
    if name.is_empty() || payload.category.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Name and category are required".to_string(),
        ));
    }
    validate_price(payload.price, "price")?;
    if let Some(original) = payload.original_price {
        validate_price(original, "originalPrice")?;
    }

    let product = Product {
        id: Uuid::new_v4().to_string(),
        name,
        description: payload.description,
        price: payload.price,
        original_price: payload.original_price,
        category: payload.category.trim().to_string(),
        image: payload.image,
        rating: 0.0,
        review_count: 0,
        is_available: payload.is_available.unwrap_or(true),
    };
    let product = state.store.insert(product).await?;

    log_audit(
        user,
        "product_create",
        "products",
        Some(serde_json::json!({ "product_id": product.id })),
    );

    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let mut product = state.store.fetch::<Product>(id).await?;

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Name must not be empty".to_string()));
        }
        product.name = name;
    }
    if let Some(description) = payload.description {
        product.description = description;
    }
    if let Some(price) = payload.price {
        validate_price(price, "price")?;
        product.price = price;
    }
    if let Some(original) = payload.original_price {
        if let Some(price) = original {
            validate_price(price, "originalPrice")?;
        }
        product.original_price = original;
    }
    if let Some(category) = payload.category {
        product.category = category.trim().to_string();
    }
    if let Some(image) = payload.image {
        product.image = image;
    }
    if let Some(is_available) = payload.is_available {
        product.is_available = is_available;
    }

    let product = state.store.update(product).await?;

    log_audit(
        user,
        "product_update",
        "products",
        Some(serde_json::json!({ "product_id": product.id })),
    );

    Ok(ApiResponse::success("Updated", product, Some(Meta::empty())))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    state.store.delete::<Product>(id).await?;

    log_audit(
        user,
        "product_delete",
        "products",
        Some(serde_json::json!({ "product_id": id })),
    );

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
