use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::{
    config::AppConfig,
    rules::cart::Cart,
    services::auth_service::{Argon2Verifier, CredentialVerifier},
    storage::Store,
};

/// In-memory carts keyed by user id. Carts are session state and are not persisted.
pub type CartBook = Arc<RwLock<HashMap<String, Cart>>>;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub carts: CartBook,
    pub config: Arc<AppConfig>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(store: Store, config: AppConfig) -> Self {
        Self::with_verifier(store, config, Arc::new(Argon2Verifier))
    }

    pub fn with_verifier(
        store: Store,
        config: AppConfig,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            store,
            carts: CartBook::default(),
            config: Arc::new(config),
            verifier,
        }
    }
}
