use std::time::Duration;

use coffee_shop_api::{
    models::Category,
    storage::{RemoteStore, Store, StoreError},
};
use tokio_stream::StreamExt;
use uuid::Uuid;

// Runs only against a real PostgreSQL; the row-change triggers come from the migrations.
#[tokio::test]
async fn remote_store_crud_and_change_feed() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run remote store tests."
            );
            return Ok(());
        }
    };

    let store = Store::Remote(RemoteStore::connect(&database_url).await?);
    let mut feed = store.watch::<Category>().await?;
    let initial = feed.next().await.unwrap_or_default();

    let id = Uuid::new_v4().to_string();
    let category = Category {
        id: id.clone(),
        name: "Remote test".into(),
        key: format!("remote-{id}"),
    };
    store.insert(category.clone()).await?;
    assert!(matches!(
        store.insert(category.clone()).await,
        Err(StoreError::Duplicate(_))
    ));
    assert_eq!(store.get::<Category>(&id).await?, Some(category.clone()));

    let seen = tokio::time::timeout(Duration::from_secs(10), async {
        while let Some(snapshot) = feed.next().await {
            if snapshot.iter().any(|c| c.id == id) {
                return true;
            }
        }
        false
    })
    .await
    .unwrap_or(false);
    assert!(seen, "change feed never delivered the inserted row");
    assert!(!initial.iter().any(|c| c.id == id));

    let renamed = Category {
        name: "Renamed".into(),
        ..category
    };
    store.update(renamed.clone()).await?;
    assert_eq!(store.fetch::<Category>(&id).await?.name, "Renamed");

    store.delete::<Category>(&id).await?;
    assert!(matches!(
        store.delete::<Category>(&id).await,
        Err(StoreError::NotFound)
    ));
    Ok(())
}
