use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{dto::users::UserView, models::Role};

/// Self-service sign-up. New accounts are always customers.
#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    /// Matched case-insensitively.
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Ready to send as the `Authorization` header value (`Bearer <jwt>`).
    pub token: String,
    pub expires_at: i64,
    pub user: UserView,
}

/// JWT payload.
#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}
