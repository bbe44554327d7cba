use coffee_shop_api::{config::StorageConfig, db::create_pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    match StorageConfig::from_env() {
        StorageConfig::Remote { database_url } => {
            let pool = create_pool(&database_url).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            println!("Migrations applied");
        }
        StorageConfig::Local { dir } => {
            println!(
                "DATABASE_URL is not set; the local store in {} needs no migrations",
                dir.display()
            );
        }
    }
    Ok(())
}
