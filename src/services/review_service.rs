use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::reviews::{ReviewList, ReviewRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Product, Review, User},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_reviews(
    state: &AppState,
    product_id: &str,
) -> AppResult<ApiResponse<ReviewList>> {
    let items = state
        .store
        .list::<Review>()
        .await?
        .into_iter()
        .filter(|review| review.product_id == product_id)
        .collect();
    Ok(ApiResponse::success("Reviews", ReviewList { items }, None))
}

/// Mean rating rounded to one decimal, and the review count.
pub fn rating_summary(reviews: &[Review]) -> (f64, u32) {
    if reviews.is_empty() {
        return (0.0, 0);
    }
    let count = reviews.len();
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let mean = f64::from(sum) / count as f64;
    ((mean * 10.0).round() / 10.0, u32::try_from(count).unwrap_or(u32::MAX))
}

pub async fn create_review(
    state: &AppState,
    user: &AuthUser,
    product_id: &str,
    payload: ReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_string(),
        ));
    }
    state.store.fetch::<Product>(product_id).await?;
    let author = state.store.fetch::<User>(&user.user_id).await?;

    let review = Review {
        id: Uuid::new_v4().to_string(),
        product_id: product_id.to_string(),
        user_id: author.id,
        user_name: author.name,
        user_avatar: author.avatar,
        rating: payload.rating,
        comment: payload.comment.trim().to_string(),
        date: Utc::now().date_naive(),
    };
    let review = state.store.insert(review).await?;

    if let Err(err) = refresh_product_rating(state, product_id).await {
        tracing::warn!(error = %err, product_id, "product rating refresh failed");
    }

    Ok(ApiResponse::success(
        "Review created",
        review,
        Some(Meta::empty()),
    ))
}

async fn refresh_product_rating(state: &AppState, product_id: &str) -> AppResult<()> {
    let reviews: Vec<Review> = state
        .store
        .list::<Review>()
        .await?
        .into_iter()
        .filter(|review| review.product_id == product_id)
        .collect();
    let (rating, review_count) = rating_summary(&reviews);

    let mut product = state.store.fetch::<Product>(product_id).await?;
    product.rating = rating;
    product.review_count = review_count;
    state.store.update(product).await?;
    Ok(())
}
