use std::{env, path::PathBuf};

use anyhow::Context;
use rust_decimal::Decimal;

/// Which persistence backend the process runs on. Exactly one is selected at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Local { dir: PathBuf },
    Remote { database_url: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub super_admin_email: String,
    pub loyalty_points_rate: Decimal,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let token_ttl_hours = env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|h| h.parse::<i64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(24);
        let super_admin_email = env::var("SUPER_ADMIN_EMAIL")
            .unwrap_or_else(|_| "admin@example.com".to_string())
            .trim()
            .to_lowercase();
        let loyalty_points_rate = match env::var("LOYALTY_POINTS_RATE") {
            Ok(raw) => raw
                .trim()
                .parse::<Decimal>()
                .with_context(|| format!("invalid LOYALTY_POINTS_RATE `{raw}`"))?,
            Err(_) => Decimal::ONE,
        };
        anyhow::ensure!(
            !loyalty_points_rate.is_sign_negative(),
            "LOYALTY_POINTS_RATE must not be negative"
        );

        Ok(Self {
            host,
            port,
            storage: StorageConfig::from_env(),
            jwt_secret,
            token_ttl_hours,
            super_admin_email,
            loyalty_points_rate,
        })
    }
}

impl StorageConfig {
    /// Remote when `DATABASE_URL` is set and non-empty, otherwise the local store in `STORE_DIR`.
    pub fn from_env() -> Self {
        match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => StorageConfig::Remote { database_url: url },
            _ => StorageConfig::Local {
                dir: env::var("STORE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("data")),
            },
        }
    }
}
