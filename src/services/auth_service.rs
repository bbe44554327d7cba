use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    dto::{
        auth::{Claims, LoginRequest, LoginResponse, RegisterRequest},
        users::UserView,
    },
    error::{AppError, AppResult},
    models::{Role, User},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Checks passwords against stored hashes. Swappable so tests and alternative identity
/// providers can plug in without touching the handlers.
pub trait CredentialVerifier: Send + Sync {
    fn hash(&self, password: &str) -> anyhow::Result<String>;

    fn verify(&self, password: &str, hash: &str) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Verifier;

impl CredentialVerifier for Argon2Verifier {
    fn hash(&self, password: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Emails are the lookup key and compare case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn find_user_by_email(state: &AppState, email: &str) -> AppResult<Option<User>> {
    let email = normalize_email(email);
    let users = state.store.list::<User>().await?;
    Ok(users
        .into_iter()
        .find(|u| normalize_email(&u.email) == email))
}

/// Signs a token for `user`. Returns the `Bearer <jwt>` header value and its expiry (unix seconds).
pub fn issue_token(config: &AppConfig, user: &User) -> AppResult<(String, i64)> {
    let issued_at = Utc::now();
    let expiration = issued_at
        .checked_add_signed(Duration::hours(config.token_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.clone(),
        role: user.role,
        iat: issued_at.timestamp(),
        exp: expiration.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    Ok((format!("Bearer {}", token), claims.exp))
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<UserView>> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload;
    let email = normalize_email(&email);
    let name = name.trim().to_string();

    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Name, email and password are required".to_string(),
        ));
    }
    if !email.contains('@') {
        return Err(AppError::BadRequest("Email is invalid".to_string()));
    }
    if find_user_by_email(state, &email).await?.is_some() {
        return Err(AppError::Conflict("Email is already taken".to_string()));
    }

    let password_hash = state.verifier.hash(&password)?;
    let user = User {
        id: Uuid::new_v4().to_string(),
        name,
        email,
        role: Role::Customer,
        avatar: None,
        phone: None,
        address: None,
        loyalty_points: 0,
        password_hash: Some(password_hash),
    };
    let user = state.store.insert(user).await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok(ApiResponse::success("User created", UserView::from(user), None))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let invalid = || AppError::BadRequest("Invalid email or password".into());

    let user = find_user_by_email(state, &email).await?.ok_or_else(invalid)?;
    let hash = user.password_hash.as_deref().ok_or_else(invalid)?;
    if !state.verifier.verify(&password, hash) {
        return Err(invalid());
    }

    let (token, expires_at) = issue_token(&state.config, &user)?;
    tracing::info!(user_id = %user.id, "user logged in");

    let resp = LoginResponse {
        token,
        expires_at,
        user: UserView::from(user),
    };
    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}
