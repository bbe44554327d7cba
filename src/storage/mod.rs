//! Persistence adapter.
//!
//! Two interchangeable backends sit behind [`Store`]: a file-backed key-value store with one
//! JSON document per collection, and a PostgreSQL store with one table per collection. Which
//! one runs is decided once at startup from configuration; they are never mixed.

pub mod local;
pub mod remote;

use std::{
    pin::Pin,
    task::{Context, Poll},
};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::{sync::broadcast, task::JoinHandle};
use tokio_stream::{Stream, wrappers::ReceiverStream};

use crate::{
    config::StorageConfig,
    models::{BrandSettings, PartnershipContent},
};

pub use local::LocalStore;
pub use remote::{RemoteStore, TableRecord};

/// Named collections. Each maps to one local storage key and one remote table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Products,
    Categories,
    Toppings,
    Banners,
    Promotions,
    Orders,
    Reviews,
    Jobs,
    Applications,
    Reservations,
    BrandSettings,
    Partnership,
}

impl Collection {
    pub const ALL: [Collection; 13] = [
        Collection::Users,
        Collection::Products,
        Collection::Categories,
        Collection::Toppings,
        Collection::Banners,
        Collection::Promotions,
        Collection::Orders,
        Collection::Reviews,
        Collection::Jobs,
        Collection::Applications,
        Collection::Reservations,
        Collection::BrandSettings,
        Collection::Partnership,
    ];

    /// Key of the collection in the local store.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Products => "products",
            Collection::Categories => "categories",
            Collection::Toppings => "toppings",
            Collection::Banners => "banners",
            Collection::Promotions => "promotions",
            Collection::Orders => "orders",
            Collection::Reviews => "reviews",
            Collection::Jobs => "jobs",
            Collection::Applications => "applications",
            Collection::Reservations => "reservations",
            Collection::BrandSettings => "brand_settings",
            Collection::Partnership => "partnership",
        }
    }

    /// Table backing the collection in the remote store.
    pub fn table(self) -> &'static str {
        match self {
            Collection::Applications => "job_applications",
            Collection::Partnership => "partnership_content",
            other => other.key(),
        }
    }

    pub fn from_table(table: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.table() == table)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Notification that one row of a collection changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub kind: ChangeKind,
    pub id: Option<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("duplicate record: {0}")]
    Duplicate(String),

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("collection `{collection}` is unreadable: {reason}")]
    Unreadable {
        collection: &'static str,
        reason: String,
    },

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A persisted record that lives in one [`Collection`] and is keyed by a string id.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    /// Value that must not repeat across the collection, mirroring the remote `UNIQUE`
    /// columns.
    fn unique_key(&self) -> Option<String> {
        None
    }
}

#[derive(Clone)]
pub enum Store {
    Local(LocalStore),
    Remote(RemoteStore),
}

impl Store {
    /// Opens the backend selected by configuration.
    pub async fn connect(config: &StorageConfig) -> StoreResult<Self> {
        match config {
            StorageConfig::Local { dir } => Ok(Store::Local(LocalStore::open(dir).await?)),
            StorageConfig::Remote { database_url } => {
                Ok(Store::Remote(RemoteStore::connect(database_url).await?))
            }
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Store::Local(_) => "local",
            Store::Remote(_) => "remote",
        }
    }

    pub async fn list<T: TableRecord>(&self) -> StoreResult<Vec<T>> {
        match self {
            Store::Local(store) => store.list().await,
            Store::Remote(store) => store.list().await,
        }
    }

    pub async fn get<T: TableRecord>(&self, id: &str) -> StoreResult<Option<T>> {
        match self {
            Store::Local(store) => store.get(id).await,
            Store::Remote(store) => store.get(id).await,
        }
    }

    /// Like [`Store::get`] but a missing record is an error.
    pub async fn fetch<T: TableRecord>(&self, id: &str) -> StoreResult<T> {
        self.get(id).await?.ok_or(StoreError::NotFound)
    }

    /// Inserts a new record. Fails with [`StoreError::Duplicate`] when the id is taken.
    pub async fn insert<T: TableRecord>(&self, record: T) -> StoreResult<T> {
        match self {
            Store::Local(store) => store.insert(record).await,
            Store::Remote(store) => store.insert(record).await,
        }
    }

    /// Replaces an existing record. Fails with [`StoreError::NotFound`] when it is missing.
    pub async fn update<T: TableRecord>(&self, record: T) -> StoreResult<T> {
        match self {
            Store::Local(store) => store.update(record).await,
            Store::Remote(store) => store.update(record).await,
        }
    }

    pub async fn delete<T: TableRecord>(&self, id: &str) -> StoreResult<()> {
        match self {
            Store::Local(store) => store.delete::<T>(id).await,
            Store::Remote(store) => store.delete::<T>(id).await,
        }
    }

    /// Overwrites a whole collection.
    pub async fn replace_all<T: TableRecord>(&self, records: Vec<T>) -> StoreResult<()> {
        match self {
            Store::Local(store) => store.replace_all(records).await,
            Store::Remote(store) => store.replace_all(records).await,
        }
    }

    pub async fn brand_settings(&self) -> StoreResult<BrandSettings> {
        match self {
            Store::Local(store) => store.brand_settings().await,
            Store::Remote(store) => store.brand_settings().await,
        }
    }

    pub async fn save_brand_settings(&self, settings: BrandSettings) -> StoreResult<BrandSettings> {
        match self {
            Store::Local(store) => store.save_brand_settings(settings).await,
            Store::Remote(store) => store.save_brand_settings(settings).await,
        }
    }

    pub async fn partnership(&self) -> StoreResult<PartnershipContent> {
        match self {
            Store::Local(store) => store.partnership().await,
            Store::Remote(store) => store.partnership().await,
        }
    }

    pub async fn save_partnership(
        &self,
        content: PartnershipContent,
    ) -> StoreResult<PartnershipContent> {
        match self {
            Store::Local(store) => store.save_partnership(content).await,
            Store::Remote(store) => store.save_partnership(content).await,
        }
    }

    /// Raw change feed for every collection.
    pub fn changes(&self) -> broadcast::Receiver<ChangeEvent> {
        match self {
            Store::Local(store) => store.changes(),
            Store::Remote(store) => store.changes(),
        }
    }

    /// Re-fetches the `T` collection after every change to it and hands the fresh list to
    /// `callback`. Dropping the returned handle stops the subscription. Notifications are
    /// best effort: bursts may be coalesced and nothing is replayed.
    pub fn subscribe<T, F>(&self, callback: F) -> Subscription
    where
        T: TableRecord,
        F: Fn(Vec<T>) + Send + Sync + 'static,
    {
        let mut changes = self.changes();
        let store = self.clone();
        let handle = tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(event) if event.collection != T::COLLECTION => continue,
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "change feed lagged, refetching");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
                match store.list::<T>().await {
                    Ok(records) => callback(records),
                    Err(err) => {
                        tracing::warn!(
                            error = %err,
                            collection = T::COLLECTION.key(),
                            "refetch after change failed"
                        );
                    }
                }
            }
        });
        Subscription { handle }
    }

    /// Stream flavour of [`Store::subscribe`]: yields the current list first, then a fresh
    /// list after every change.
    pub async fn watch<T: TableRecord>(&self) -> StoreResult<Watch<T>> {
        let (tx, rx) = tokio::sync::mpsc::channel(16);
        let subscription = self.subscribe::<T, _>({
            let tx = tx.clone();
            move |records| {
                if tx.try_send(records).is_err() {
                    tracing::debug!("watch consumer is behind, dropping snapshot");
                }
            }
        });
        let initial = self.list::<T>().await?;
        // The receiver cannot be closed yet, so the only failure is a full buffer.
        let _ = tx.try_send(initial);
        Ok(Watch {
            rx: ReceiverStream::new(rx),
            _subscription: subscription,
        })
    }
}

/// Handle of a running subscription. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Stream of collection snapshots produced by [`Store::watch`].
#[derive(Debug)]
pub struct Watch<T> {
    rx: ReceiverStream<Vec<T>>,
    _subscription: Subscription,
}

impl<T> Stream for Watch<T> {
    type Item = Vec<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use tokio::sync::mpsc;

    use super::*;
    use crate::models::Category;

    fn category(id: &str) -> Category {
        Category {
            id: id.to_string(),
            name: id.to_string(),
            key: id.to_string(),
        }
    }

    #[tokio::test]
    async fn subscription_refetches_until_unsubscribed() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = Store::Local(LocalStore::open(dir.path()).await?);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let tx = Arc::new(tx);

        let subscription = store.subscribe::<Category, _>({
            let tx = Arc::clone(&tx);
            move |records| {
                let _ = tx.send(records.len());
            }
        });

        store.insert(category("tea")).await?;
        let seen = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await?;
        assert_eq!(seen, Some(1));

        subscription.unsubscribe();
        tokio::task::yield_now().await;
        store.insert(category("juice")).await?;
        let after = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
        assert!(after.is_err());
        Ok(())
    }

    #[test]
    fn tables_map_back_to_collections() {
        assert_eq!(Collection::from_table("job_applications"), Some(Collection::Applications));
        assert_eq!(Collection::from_table("brand_settings"), Some(Collection::BrandSettings));
        assert_eq!(
            Collection::from_table("partnership_content"),
            Some(Collection::Partnership)
        );
        assert_eq!(Collection::from_table("applications"), None);
    }
}
