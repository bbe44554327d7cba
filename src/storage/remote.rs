use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, SqlErr,
    SqlxPostgresConnector,
};
use serde::Deserialize;
use sqlx::postgres::{PgListener, PgPool};
use tokio::sync::broadcast;

use crate::{
    db,
    entity::{self, brand_settings::SINGLETON_ID},
    models::{
        Banner, BrandSettings, Category, DiscountCode, Job, JobApplication, Order,
        PartnershipContent, Product, Reservation, Review, Topping, User,
    },
};

use super::{ChangeEvent, ChangeKind, Collection, Record, StoreError, StoreResult};

/// Postgres channel the change triggers publish on.
pub const CHANGE_CHANNEL: &str = "storefront_changes";

const CHANGE_BUFFER: usize = 256;
const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Row-level access to the table backing a record type.
#[async_trait]
pub trait TableRecord: Record {
    /// Every row, newest first.
    async fn fetch_all(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr>;

    async fn fetch_one(db: &DatabaseConnection, id: &str) -> Result<Option<Self>, DbErr>;

    async fn insert_row(db: &DatabaseConnection, record: Self) -> Result<Self, DbErr>;

    async fn update_row(db: &DatabaseConnection, record: Self) -> Result<Self, DbErr>;

    /// Returns the number of deleted rows.
    async fn delete_row(db: &DatabaseConnection, id: &str) -> Result<u64, DbErr>;

    async fn clear(db: &DatabaseConnection) -> Result<(), DbErr>;
}

macro_rules! table_record {
    ($record:ty, $table:ident) => {
        #[async_trait]
        impl TableRecord for $record {
            async fn fetch_all(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
                let rows = entity::$table::Entity::find()
                    .order_by_desc(entity::$table::Column::CreatedAt)
                    .all(db)
                    .await?;
                Ok(rows.into_iter().map(Self::from).collect())
            }

            async fn fetch_one(db: &DatabaseConnection, id: &str) -> Result<Option<Self>, DbErr> {
                let row = entity::$table::Entity::find_by_id(id.to_owned())
                    .one(db)
                    .await?;
                Ok(row.map(Self::from))
            }

            async fn insert_row(db: &DatabaseConnection, record: Self) -> Result<Self, DbErr> {
                let model = entity::$table::ActiveModel::from(record).insert(db).await?;
                Ok(Self::from(model))
            }

            async fn update_row(db: &DatabaseConnection, record: Self) -> Result<Self, DbErr> {
                let model = entity::$table::ActiveModel::from(record).update(db).await?;
                Ok(Self::from(model))
            }

            async fn delete_row(db: &DatabaseConnection, id: &str) -> Result<u64, DbErr> {
                let result = entity::$table::Entity::delete_by_id(id.to_owned())
                    .exec(db)
                    .await?;
                Ok(result.rows_affected)
            }

            async fn clear(db: &DatabaseConnection) -> Result<(), DbErr> {
                entity::$table::Entity::delete_many().exec(db).await?;
                Ok(())
            }
        }
    };
}

table_record!(User, users);
table_record!(Product, products);
table_record!(Category, categories);
table_record!(Topping, toppings);
table_record!(Banner, banners);
table_record!(DiscountCode, promotions);
table_record!(Order, orders);
table_record!(Review, reviews);
table_record!(Job, jobs);
table_record!(JobApplication, job_applications);
table_record!(Reservation, reservations);

/// Table-backed store over PostgreSQL. Row changes arrive through `LISTEN`.
#[derive(Clone)]
pub struct RemoteStore {
    orm: DatabaseConnection,
    changes: broadcast::Sender<ChangeEvent>,
}

impl RemoteStore {
    /// Connects, applies pending migrations and starts the change listener.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = db::create_pool(database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        let orm = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());

        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        tokio::spawn(listen(pool, changes.clone()));
        tracing::info!("remote store connected");

        Ok(Self { orm, changes })
    }

    pub fn changes(&self) -> broadcast::Receiver<ChangeEvent> {
        self.changes.subscribe()
    }

    pub async fn list<T: TableRecord>(&self) -> StoreResult<Vec<T>> {
        Ok(T::fetch_all(&self.orm).await?)
    }

    pub async fn get<T: TableRecord>(&self, id: &str) -> StoreResult<Option<T>> {
        Ok(T::fetch_one(&self.orm, id).await?)
    }

    pub async fn insert<T: TableRecord>(&self, record: T) -> StoreResult<T> {
        T::insert_row(&self.orm, record).await.map_err(write_err)
    }

    pub async fn update<T: TableRecord>(&self, record: T) -> StoreResult<T> {
        T::update_row(&self.orm, record).await.map_err(write_err)
    }

    pub async fn delete<T: TableRecord>(&self, id: &str) -> StoreResult<()> {
        match T::delete_row(&self.orm, id).await? {
            0 => Err(StoreError::NotFound),
            _ => Ok(()),
        }
    }

    /// Not atomic: a failure midway leaves the rows written so far.
    pub async fn replace_all<T: TableRecord>(&self, records: Vec<T>) -> StoreResult<()> {
        T::clear(&self.orm).await?;
        for record in records {
            T::insert_row(&self.orm, record).await.map_err(write_err)?;
        }
        Ok(())
    }

    pub async fn brand_settings(&self) -> StoreResult<BrandSettings> {
        let row = entity::BrandSettings::find_by_id(SINGLETON_ID.to_owned())
            .one(&self.orm)
            .await?;
        Ok(row.map(BrandSettings::from).unwrap_or_default())
    }

    pub async fn save_brand_settings(&self, settings: BrandSettings) -> StoreResult<BrandSettings> {
        let active = entity::brand_settings::ActiveModel::from(settings);
        let exists = entity::BrandSettings::find_by_id(SINGLETON_ID.to_owned())
            .one(&self.orm)
            .await?
            .is_some();
        let model = if exists {
            active.update(&self.orm).await?
        } else {
            active.insert(&self.orm).await?
        };
        Ok(BrandSettings::from(model))
    }

    pub async fn partnership(&self) -> StoreResult<PartnershipContent> {
        let row = entity::PartnershipContent::find_by_id(SINGLETON_ID.to_owned())
            .one(&self.orm)
            .await?;
        Ok(row.map(PartnershipContent::from).unwrap_or_default())
    }

    pub async fn save_partnership(
        &self,
        content: PartnershipContent,
    ) -> StoreResult<PartnershipContent> {
        let active = entity::partnership_content::ActiveModel::from(content);
        let exists = entity::PartnershipContent::find_by_id(SINGLETON_ID.to_owned())
            .one(&self.orm)
            .await?
            .is_some();
        let model = if exists {
            active.update(&self.orm).await?
        } else {
            active.insert(&self.orm).await?
        };
        Ok(PartnershipContent::from(model))
    }
}

fn write_err(err: DbErr) -> StoreError {
    if let DbErr::RecordNotUpdated = err {
        return StoreError::NotFound;
    }
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::Duplicate(detail),
        _ => StoreError::Db(err),
    }
}

#[derive(Debug, Deserialize)]
struct ChangePayload {
    table: String,
    op: String,
    id: Option<String>,
}

fn parse_change(payload: &str) -> Option<ChangeEvent> {
    let payload: ChangePayload = serde_json::from_str(payload).ok()?;
    let kind = match payload.op.as_str() {
        "INSERT" => ChangeKind::Insert,
        "UPDATE" => ChangeKind::Update,
        "DELETE" => ChangeKind::Delete,
        _ => return None,
    };
    Some(ChangeEvent {
        collection: Collection::from_table(&payload.table)?,
        kind,
        id: payload.id,
    })
}

/// Forwards notifications into `changes`, reconnecting after listener failures.
async fn listen(pool: PgPool, changes: broadcast::Sender<ChangeEvent>) {
    while !pool.is_closed() {
        if let Err(err) = forward_notifications(&pool, &changes).await {
            tracing::warn!(error = %err, "change listener failed, reconnecting");
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    }
}

async fn forward_notifications(
    pool: &PgPool,
    changes: &broadcast::Sender<ChangeEvent>,
) -> Result<(), sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(CHANGE_CHANNEL).await?;
    tracing::debug!(channel = CHANGE_CHANNEL, "listening for row changes");

    loop {
        let notification = listener.recv().await?;
        match parse_change(notification.payload()) {
            Some(event) => {
                // Sending only fails without receivers.
                let _ = changes.send(event);
            }
            None => {
                tracing::debug!(payload = notification.payload(), "ignoring change payload");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trigger_payloads() {
        let event = parse_change(r#"{"table":"job_applications","op":"DELETE","id":"a-1"}"#);
        assert_eq!(
            event,
            Some(ChangeEvent {
                collection: Collection::Applications,
                kind: ChangeKind::Delete,
                id: Some("a-1".to_string()),
            })
        );
    }

    #[test]
    fn rejects_unknown_tables_and_ops() {
        assert_eq!(parse_change(r#"{"table":"audit","op":"INSERT","id":"x"}"#), None);
        assert_eq!(parse_change(r#"{"table":"orders","op":"TRUNCATE","id":null}"#), None);
        assert_eq!(parse_change("garbage"), None);
    }
}
