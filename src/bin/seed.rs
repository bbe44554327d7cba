use chrono::{Duration, Utc};
use coffee_shop_api::{
    config::StorageConfig,
    models::{
        Banner, BrandSettings, Category, DiscountCode, DiscountType, Job, Product, Role, Topping,
        User,
    },
    services::auth_service::{Argon2Verifier, CredentialVerifier, normalize_email},
    storage::Store,
};
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let store = Store::connect(&StorageConfig::from_env()).await?;
    println!("Seeding the {} store", store.backend());

    let admin_email = std::env::var("SUPER_ADMIN_EMAIL")
        .unwrap_or_else(|_| "admin@example.com".to_string());
    let admin_password =
        std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

    let admin_id = ensure_user(&store, "Store Admin", &admin_email, &admin_password, Role::Admin).await?;
    let user_id = ensure_user(&store, "Demo Customer", "user@example.com", "user123", Role::Customer).await?;
    seed_catalog(&store).await?;
    seed_extras(&store).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    store: &Store,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<String> {
    let email = normalize_email(email);
    let existing = store
        .list::<User>()
        .await?
        .into_iter()
        .find(|u| normalize_email(&u.email) == email);

    let user_id = match existing {
        Some(mut user) => {
            user.role = role;
            let id = user.id.clone();
            store.update(user).await?;
            id
        }
        None => {
            let user = User {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                email: email.clone(),
                role,
                avatar: None,
                phone: None,
                address: None,
                loyalty_points: 0,
                password_hash: Some(Argon2Verifier.hash(password)?),
            };
            store.insert(user).await?.id
        }
    };

    println!("Ensured user {email} (role={})", role.as_str());
    Ok(user_id)
}

fn product(name: &str, description: &str, cents: i64, category: &str) -> Product {
    Product {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::new(cents, 2),
        original_price: None,
        category: category.to_string(),
        image: None,
        rating: 0.0,
        review_count: 0,
        is_available: true,
    }
}

async fn seed_catalog(store: &Store) -> anyhow::Result<()> {
    let categories: Vec<Category> = [("Coffee", "coffee"), ("Tea", "tea"), ("Pastry", "pastry")]
        .into_iter()
        .map(|(name, key)| Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            key: key.to_string(),
        })
        .collect();
    store.replace_all::<Category>(categories).await?;

    let toppings: Vec<Topping> = [("Extra shot", 60), ("Oat milk", 50), ("Caramel syrup", 40)]
        .into_iter()
        .map(|(name, cents)| Topping {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price: Decimal::new(cents, 2),
        })
        .collect();
    store.replace_all::<Topping>(toppings).await?;

    let mut latte = product("Caffe Latte", "Espresso with steamed milk", 420, "coffee");
    latte.original_price = Some(Decimal::new(480, 2));
    let products = vec![
        product("Espresso", "A short, intense shot", 250, "coffee"),
        latte,
        product("Matcha Latte", "Stone-ground matcha with milk", 450, "tea"),
        product("Earl Grey", "Black tea with bergamot", 300, "tea"),
        product("Butter Croissant", "Baked every morning", 280, "pastry"),
    ];
    store.replace_all::<Product>(products).await?;

    println!("Seeded categories, toppings and products");
    Ok(())
}

async fn seed_extras(store: &Store) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    store
        .replace_all::<DiscountCode>(vec![DiscountCode {
            id: Uuid::new_v4().to_string(),
            code: "WELCOME10".to_string(),
            discount_type: DiscountType::Percent,
            value: Decimal::new(10, 0),
            start_date: today,
            end_date: today + Duration::days(90),
            is_active: true,
            applicable_product_ids: vec![],
            description: Some("10% off your first order".to_string()),
        }])
        .await?;

    store
        .replace_all::<Banner>(vec![Banner {
            id: Uuid::new_v4().to_string(),
            title: "New season blends".to_string(),
            subtitle: "Freshly roasted this week".to_string(),
            image_url: String::new(),
            cta_text: "Order now".to_string(),
            link_section: "menu".to_string(),
            ends_at: None,
        }])
        .await?;

    store
        .replace_all::<Job>(vec![Job {
            id: Uuid::new_v4().to_string(),
            title: "Barista".to_string(),
            location: "Main street store".to_string(),
            job_type: "Full-time".to_string(),
            salary: "Negotiable".to_string(),
            description: "Prepare drinks and welcome guests".to_string(),
            requirements: vec!["Friendly attitude".to_string()],
            benefits: vec!["Free coffee".to_string()],
            is_active: true,
        }])
        .await?;

    store.save_brand_settings(BrandSettings::default()).await?;
    println!("Seeded promotions, banners, jobs and brand settings");
    Ok(())
}
