use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    response::ApiResponse,
    rules::{cart::CartError, discount::DiscountError},
    storage::StoreError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Unauthorized {0}")]
    Unauthorized(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Conflict {0}")]
    Conflict(String),

    #[error("Storage error")]
    Storage(StoreError),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound,
            StoreError::Duplicate(what) => AppError::Conflict(format!("{what} already exists")),
            other => AppError::Storage(other),
        }
    }
}

impl From<DiscountError> for AppError {
    fn from(err: DiscountError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::LineNotFound(_) => AppError::NotFound,
            CartError::Unavailable(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = self.to_string();
        let body = ApiResponse::failure(message.clone(), ErrorData { error: message });

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        let cases = [
            (AppError::from(StoreError::NotFound), StatusCode::NOT_FOUND),
            (
                AppError::from(StoreError::Duplicate("SAVE10".into())),
                StatusCode::CONFLICT,
            ),
            (
                AppError::from(DiscountError::Expired("OLD".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(CartError::LineNotFound("l-1".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Unauthorized("Missing token".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (AppError::Forbidden, StatusCode::FORBIDDEN),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
