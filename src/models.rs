use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    rules::loyalty::LoyaltyThresholds,
    storage::{Collection, Record},
};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Stable key used by the catalog filter and for translation lookup.
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Topping {
    pub id: String,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ProductSize {
    #[default]
    M,
    L,
}

/// One customized product entry in a cart. `id` identifies the line, not the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub product_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub base_price: Decimal,
    #[serde(default)]
    pub size: ProductSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub toppings: Vec<Topping>,
    pub quantity: u32,
}

/// A cart line frozen at checkout together with the prices it was charged at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(flatten)]
    pub line: CartLine,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "ready" => Ok(OrderStatus::Ready),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub customer_name: String,
    /// Snapshot of the cart at checkout. Never edited afterwards.
    #[serde(default)]
    pub items: Vec<OrderLine>,
    pub subtotal: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    pub total: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub points_awarded: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "customer" => Ok(Role::Customer),
            other => Err(format!("unknown role `{other}`")),
        }
    }
}

/// Persisted account record. API responses expose [`crate::dto::users::UserView`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub loyalty_points: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

/// Store-wide configuration record. Missing fields load as their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandSettings {
    pub brand_name: String,
    pub logo_url: String,
    pub store_address: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub google_maps_embed_url: String,
    pub loyalty_bronze_min: u64,
    pub loyalty_silver_min: u64,
    pub loyalty_gold_min: u64,
    pub loyalty_diamond_min: u64,
    /// Upcharge applied to every size L line.
    pub size_l_price: Decimal,
}

impl Default for BrandSettings {
    fn default() -> Self {
        Self {
            brand_name: "Coffee House".to_string(),
            logo_url: String::new(),
            store_address: String::new(),
            contact_phone: String::new(),
            contact_email: String::new(),
            google_maps_embed_url: String::new(),
            loyalty_bronze_min: 0,
            loyalty_silver_min: 500,
            loyalty_gold_min: 850,
            loyalty_diamond_min: 1350,
            size_l_price: Decimal::new(50, 2),
        }
    }
}

impl BrandSettings {
    pub fn loyalty_thresholds(&self) -> LoyaltyThresholds {
        LoyaltyThresholds {
            bronze: self.loyalty_bronze_min,
            silver: self.loyalty_silver_min,
            gold: self.loyalty_gold_min,
            diamond: self.loyalty_diamond_min,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PartnershipPillar {
    /// Name of the icon the storefront renders next to the pillar.
    pub icon: String,
    pub title: String,
    pub desc: String,
}

/// Copy of the partnership page in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PartnershipCopy {
    pub badge: String,
    pub title: String,
    pub subtitle: String,
    pub tags: Vec<String>,
    pub pillars: Vec<PartnershipPillar>,
    pub image_url: String,
    pub cta_primary_text: String,
    pub cta_primary_link: String,
    pub cta_secondary_text: String,
    pub cta_secondary_link: String,
    pub chat_link: String,
    pub contact_note: String,
}

/// Administrator-edited partnership page, kept as one document with a Vietnamese and an
/// English copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PartnershipContent {
    pub vi: PartnershipCopy,
    pub en: PartnershipCopy,
}

impl Default for PartnershipContent {
    fn default() -> Self {
        let pillar = |icon: &str, title: &str, desc: &str| PartnershipPillar {
            icon: icon.to_string(),
            title: title.to_string(),
            desc: desc.to_string(),
        };
        Self {
            vi: PartnershipCopy {
                badge: "Hợp tác".to_string(),
                title: "Cùng phát triển thương hiệu".to_string(),
                pillars: vec![pillar("Handshake", "Đồng hành", "Hỗ trợ vận hành từ ngày đầu")],
                cta_primary_text: "Liên hệ".to_string(),
                ..PartnershipCopy::default()
            },
            en: PartnershipCopy {
                badge: "Partnership".to_string(),
                title: "Grow the brand with us".to_string(),
                pillars: vec![pillar("Handshake", "Support", "Operations support from day one")],
                cta_primary_text: "Contact us".to_string(),
                ..PartnershipCopy::default()
            },
        }
    }
}

impl PartnershipContent {
    pub fn copies(&self) -> [(&'static str, &PartnershipCopy); 2] {
        [("vi", &self.vi), ("en", &self.en)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub cta_text: String,
    #[serde(default)]
    pub link_section: String,
    /// Optional countdown end time shown on the carousel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percent,
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percent => "percent",
            DiscountType::Fixed => "fixed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    pub id: String,
    pub code: String,
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    pub value: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Empty means every product is eligible.
    #[serde(default)]
    pub applicable_product_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub job_type: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_file_name: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::Completed => "Completed",
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            "completed" => Ok(ReservationStatus::Completed),
            other => Err(format!("unknown reservation status `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub party_size: u32,
    pub table_id: String,
    pub datetime: DateTime<Utc>,
    #[serde(default)]
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

macro_rules! impl_record {
    ($record:ty, $collection:expr) => {
        impl Record for $record {
            const COLLECTION: Collection = $collection;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

macro_rules! impl_unique_record {
    ($record:ty, $collection:expr, |$this:ident| $key:expr) => {
        impl Record for $record {
            const COLLECTION: Collection = $collection;

            fn id(&self) -> &str {
                &self.id
            }

            fn unique_key(&self) -> Option<String> {
                let $this = self;
                Some($key)
            }
        }
    };
}

impl_record!(Product, Collection::Products);
impl_record!(Topping, Collection::Toppings);
impl_record!(Order, Collection::Orders);
impl_record!(Banner, Collection::Banners);
impl_unique_record!(Category, Collection::Categories, |c| c.key.clone());
impl_unique_record!(User, Collection::Users, |u| u.email.trim().to_lowercase());
impl_unique_record!(DiscountCode, Collection::Promotions, |d| {
    crate::rules::discount::normalize_code(&d.code)
});
impl_record!(Review, Collection::Reviews);
impl_record!(Job, Collection::Jobs);
impl_record!(JobApplication, Collection::Applications);
impl_record!(Reservation, Collection::Reservations);
