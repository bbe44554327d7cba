use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tokio::{
    fs,
    sync::{Mutex, broadcast},
};

use crate::models::{BrandSettings, PartnershipContent};

use super::{ChangeEvent, ChangeKind, Collection, Record, StoreError, StoreResult};

const CHANGE_BUFFER: usize = 64;

/// File-backed key-value store: one JSON document per collection under `dir`.
///
/// Writes are last-write-wins and serialized through a single lock. Files are replaced
/// atomically (write to a temporary sibling, then rename).
#[derive(Clone)]
pub struct LocalStore {
    inner: Arc<Inner>,
}

struct Inner {
    dir: PathBuf,
    write_lock: Mutex<()>,
    changes: broadcast::Sender<ChangeEvent>,
}

impl LocalStore {
    pub async fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;
        tracing::info!(dir = %dir.display(), "local store opened");
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        Ok(Self {
            inner: Arc::new(Inner {
                dir,
                write_lock: Mutex::new(()),
                changes,
            }),
        })
    }

    pub fn path_of(&self, collection: Collection) -> PathBuf {
        self.inner.dir.join(format!("{}.json", collection.key()))
    }

    pub fn changes(&self) -> broadcast::Receiver<ChangeEvent> {
        self.inner.changes.subscribe()
    }

    pub async fn list<T: Record>(&self) -> StoreResult<Vec<T>> {
        Ok(self.load::<T>().await)
    }

    pub async fn get<T: Record>(&self, id: &str) -> StoreResult<Option<T>> {
        Ok(self
            .load::<T>()
            .await
            .into_iter()
            .find(|record| record.id() == id))
    }

    /// New records go first so lists read newest-first, like the remote store.
    pub async fn insert<T: Record>(&self, record: T) -> StoreResult<T> {
        let _guard = self.inner.write_lock.lock().await;
        let mut elements = self.load_for_write(T::COLLECTION).await?;
        if elements.iter().any(|e| element_id(e) == Some(record.id())) {
            return Err(StoreError::Duplicate(record.id().to_owned()));
        }
        ensure_unique(&elements, &record)?;
        elements.insert(0, serde_json::to_value(&record)?);
        self.write(T::COLLECTION, &elements).await?;
        self.emit(T::COLLECTION, ChangeKind::Insert, Some(record.id()));
        Ok(record)
    }

    pub async fn update<T: Record>(&self, record: T) -> StoreResult<T> {
        let _guard = self.inner.write_lock.lock().await;
        let mut elements = self.load_for_write(T::COLLECTION).await?;
        let slot = elements
            .iter()
            .position(|e| element_id(e) == Some(record.id()))
            .ok_or(StoreError::NotFound)?;
        ensure_unique(&elements, &record)?;
        elements[slot] = serde_json::to_value(&record)?;
        self.write(T::COLLECTION, &elements).await?;
        self.emit(T::COLLECTION, ChangeKind::Update, Some(record.id()));
        Ok(record)
    }

    pub async fn delete<T: Record>(&self, id: &str) -> StoreResult<()> {
        let _guard = self.inner.write_lock.lock().await;
        let mut elements = self.load_for_write(T::COLLECTION).await?;
        let before = elements.len();
        elements.retain(|e| element_id(e) != Some(id));
        if elements.len() == before {
            return Err(StoreError::NotFound);
        }
        self.write(T::COLLECTION, &elements).await?;
        self.emit(T::COLLECTION, ChangeKind::Delete, Some(id));
        Ok(())
    }

    pub async fn replace_all<T: Record>(&self, records: Vec<T>) -> StoreResult<()> {
        let _guard = self.inner.write_lock.lock().await;
        self.write(T::COLLECTION, &records).await?;
        self.emit(T::COLLECTION, ChangeKind::Update, None);
        Ok(())
    }

    pub async fn brand_settings(&self) -> StoreResult<BrandSettings> {
        Ok(self.read_document(Collection::BrandSettings).await)
    }

    pub async fn save_brand_settings(&self, settings: BrandSettings) -> StoreResult<BrandSettings> {
        self.write_document(Collection::BrandSettings, settings).await
    }

    pub async fn partnership(&self) -> StoreResult<PartnershipContent> {
        Ok(self.read_document(Collection::Partnership).await)
    }

    pub async fn save_partnership(
        &self,
        content: PartnershipContent,
    ) -> StoreResult<PartnershipContent> {
        self.write_document(Collection::Partnership, content).await
    }

    /// Reads a single-document collection, falling back to its default.
    async fn read_document<D: DeserializeOwned + Default>(&self, collection: Collection) -> D {
        let Some(raw) = self.read_raw(collection).await else {
            return D::default();
        };
        match serde_json::from_str::<D>(&raw) {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    collection = collection.key(),
                    "unreadable document, using defaults"
                );
                D::default()
            }
        }
    }

    async fn write_document<D: Serialize>(
        &self,
        collection: Collection,
        document: D,
    ) -> StoreResult<D> {
        let _guard = self.inner.write_lock.lock().await;
        self.write(collection, &document).await?;
        self.emit(collection, ChangeKind::Update, None);
        Ok(document)
    }

    /// Reads a collection, keeping every element that still decodes.
    async fn load<T: Record>(&self) -> Vec<T> {
        let collection = T::COLLECTION;
        let Some(raw) = self.read_raw(collection).await else {
            return Vec::new();
        };

        let elements = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(elements) => elements,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    collection = collection.key(),
                    "collection file is not a JSON array, treating as empty"
                );
                return Vec::new();
            }
        };

        elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| match serde_json::from_value::<T>(element) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        collection = collection.key(),
                        index,
                        "skipping undecodable record"
                    );
                    None
                }
            })
            .collect()
    }

    /// Raw elements of a collection about to be rewritten. Unlike [`LocalStore::load`] a file
    /// that exists but cannot be read or parsed is an error, and elements that no longer
    /// decode are carried over untouched.
    async fn load_for_write(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        let raw = match fs::read_to_string(self.path_of(collection)).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(StoreError::Unreadable {
                    collection: collection.key(),
                    reason: err.to_string(),
                });
            }
        };
        serde_json::from_str::<Vec<Value>>(&raw).map_err(|err| StoreError::Unreadable {
            collection: collection.key(),
            reason: err.to_string(),
        })
    }

    /// Raw file contents, or `None` when the file is missing or unreadable.
    async fn read_raw(&self, collection: Collection) -> Option<String> {
        match fs::read_to_string(self.path_of(collection)).await {
            Ok(raw) => Some(raw),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    collection = collection.key(),
                    "failed to read collection file"
                );
                None
            }
        }
    }

    async fn write<V: Serialize + ?Sized>(&self, collection: Collection, value: &V) -> StoreResult<()> {
        let path = self.path_of(collection);
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(value)?;
        fs::write(&tmp, body).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    fn emit(&self, collection: Collection, kind: ChangeKind, id: Option<&str>) {
        // No receivers is not an error.
        let _ = self.inner.changes.send(ChangeEvent {
            collection,
            kind,
            id: id.map(str::to_owned),
        });
    }
}

fn element_id(element: &Value) -> Option<&str> {
    element.get("id").and_then(Value::as_str)
}

/// Rejects `record` when another element already holds its unique key.
fn ensure_unique<T: Record>(elements: &[Value], record: &T) -> StoreResult<()> {
    let Some(key) = record.unique_key() else {
        return Ok(());
    };
    let taken = elements
        .iter()
        .filter(|e| element_id(e) != Some(record.id()))
        .filter_map(|e| serde_json::from_value::<T>(e.clone()).ok())
        .any(|other| other.unique_key().as_deref() == Some(key.as_str()));
    if taken {
        return Err(StoreError::Duplicate(key));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::{Category, Order, OrderStatus, Product, Role, User};

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: String::new(),
            price: Decimal::new(350, 2),
            original_price: None,
            category: "coffee".to_string(),
            image: None,
            rating: 0.0,
            review_count: 0,
            is_available: true,
        }
    }

    fn category(id: &str, key: &str) -> Category {
        Category {
            id: id.to_string(),
            name: id.to_string(),
            key: key.to_string(),
        }
    }

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            name: id.to_string(),
            email: email.to_string(),
            role: Role::Customer,
            avatar: None,
            phone: None,
            address: None,
            loyalty_points: 0,
            password_hash: None,
        }
    }

    #[tokio::test]
    async fn missing_files_load_defaults() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = LocalStore::open(dir.path()).await?;
        assert!(store.list::<Product>().await?.is_empty());
        assert_eq!(store.brand_settings().await?, BrandSettings::default());
        Ok(())
    }

    #[tokio::test]
    async fn crud_round_trip() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = LocalStore::open(dir.path()).await?;

        store.insert(product("a")).await?;
        store.insert(product("b")).await?;
        assert!(matches!(
            store.insert(product("a")).await,
            Err(StoreError::Duplicate(_))
        ));

        let ids: Vec<String> = store.list::<Product>().await?.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let mut changed = product("a");
        changed.name = "Renamed".to_string();
        store.update(changed.clone()).await?;
        assert_eq!(store.get::<Product>("a").await?, Some(changed));

        store.delete::<Product>("a").await?;
        assert!(store.get::<Product>("a").await?.is_none());
        assert!(matches!(
            store.delete::<Product>("a").await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.update(product("zzz")).await,
            Err(StoreError::NotFound)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn reopened_store_sees_saved_collections() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let order = Order {
            id: "o-1".to_string(),
            user_id: Some("u-1".to_string()),
            customer_name: "Ana".to_string(),
            items: vec![],
            subtotal: Decimal::new(1000, 2),
            discount: Decimal::ZERO,
            discount_code: None,
            total: Decimal::new(1000, 2),
            status: OrderStatus::Ready,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
            address: None,
            phone: None,
            payment_method: Some("cash".to_string()),
            note: None,
            points_awarded: 10,
        };
        {
            let store = LocalStore::open(dir.path()).await?;
            store.insert(order.clone()).await?;
        }
        let reopened = LocalStore::open(dir.path()).await?;
        assert_eq!(reopened.list::<Order>().await?, vec![order]);
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_elements_are_skipped() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = LocalStore::open(dir.path()).await?;
        std::fs::write(
            store.path_of(Collection::Categories),
            r#"[{"id":"c1","name":"Coffee","key":"coffee"},{"id":42},"junk"]"#,
        )?;
        let categories = store.list::<Category>().await?;
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].key, "coffee");

        std::fs::write(store.path_of(Collection::Categories), "not json at all")?;
        assert!(store.list::<Category>().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn partial_brand_settings_keep_defaults() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = LocalStore::open(dir.path()).await?;
        std::fs::write(
            store.path_of(Collection::BrandSettings),
            r#"{"brandName":"Night Owl","loyaltyGoldMin":900}"#,
        )?;
        let settings = store.brand_settings().await?;
        assert_eq!(settings.brand_name, "Night Owl");
        assert_eq!(settings.loyalty_gold_min, 900);
        assert_eq!(settings.loyalty_silver_min, 500);
        assert_eq!(settings.size_l_price, Decimal::new(50, 2));
        Ok(())
    }

    #[tokio::test]
    async fn partnership_document_round_trips() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = LocalStore::open(dir.path()).await?;
        assert_eq!(store.partnership().await?, PartnershipContent::default());

        let mut content = PartnershipContent::default();
        content.en.title = "Open a franchise".to_string();
        content.en.tags = vec!["franchise".to_string(), "b2b".to_string()];
        store.save_partnership(content.clone()).await?;

        let reopened = LocalStore::open(dir.path()).await?;
        assert_eq!(reopened.partnership().await?, content);
        Ok(())
    }

    #[tokio::test]
    async fn writes_are_announced() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = LocalStore::open(dir.path()).await?;
        let mut changes = store.changes();
        store.insert(product("a")).await?;
        let event = changes.recv().await?;
        assert_eq!(event.collection, Collection::Products);
        assert_eq!(event.kind, ChangeKind::Insert);
        assert_eq!(event.id.as_deref(), Some("a"));
        Ok(())
    }

    #[tokio::test]
    async fn writes_keep_undecodable_elements() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = LocalStore::open(dir.path()).await?;
        let path = store.path_of(Collection::Categories);
        std::fs::write(
            &path,
            r#"[{"id":"c1","name":"Coffee","key":"coffee"},{"id":"c2"},"junk"]"#,
        )?;

        store.insert(category("c3", "tea")).await?;
        store.delete::<Category>("c1").await?;

        let on_disk: Vec<Value> = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(on_disk.len(), 3);
        assert_eq!(element_id(&on_disk[0]), Some("c3"));
        assert_eq!(on_disk[1], serde_json::json!({ "id": "c2" }));
        assert_eq!(on_disk[2], serde_json::json!("junk"));

        let listed = store.list::<Category>().await?;
        assert_eq!(listed, vec![category("c3", "tea")]);
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_files_refuse_writes() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = LocalStore::open(dir.path()).await?;
        let path = store.path_of(Collection::Categories);

        let mut not_utf8 = br#"[{"id":"c1","name":"Caf"#.to_vec();
        not_utf8.push(0xE9);
        not_utf8.extend_from_slice(br#"","key":"cafe"},{"id":"c2","name":"Tea","key":"tea"}]"#);
        std::fs::write(&path, &not_utf8)?;

        assert!(matches!(
            store.insert(category("c3", "juice")).await,
            Err(StoreError::Unreadable { .. })
        ));
        assert!(matches!(
            store.update(category("c2", "tea")).await,
            Err(StoreError::Unreadable { .. })
        ));
        assert!(matches!(
            store.delete::<Category>("c2").await,
            Err(StoreError::Unreadable { .. })
        ));
        assert_eq!(std::fs::read(&path)?, not_utf8);

        std::fs::write(&path, r#"{"id":"c1"}"#)?;
        assert!(matches!(
            store.insert(category("c3", "juice")).await,
            Err(StoreError::Unreadable { .. })
        ));
        assert_eq!(std::fs::read_to_string(&path)?, r#"{"id":"c1"}"#);
        Ok(())
    }

    #[tokio::test]
    async fn unique_keys_are_enforced_under_the_write_lock() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = LocalStore::open(dir.path()).await?;

        let (first, second) = tokio::join!(
            store.insert(user("u1", "ana@example.com")),
            store.insert(user("u2", " ANA@example.com")),
        );
        assert_eq!(
            [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(),
            1
        );
        assert_eq!(store.list::<User>().await?.len(), 1);

        store.insert(category("c1", "coffee")).await?;
        store.insert(category("c2", "tea")).await?;
        assert!(matches!(
            store.insert(category("c3", "coffee")).await,
            Err(StoreError::Duplicate(_))
        ));
        assert!(matches!(
            store.update(category("c2", "coffee")).await,
            Err(StoreError::Duplicate(_))
        ));
        store.update(category("c1", "coffee")).await?;
        Ok(())
    }
}
