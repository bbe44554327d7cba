use sea_orm::{ActiveValue::NotSet, Set, entity::prelude::*};

use crate::models::BrandSettings;

/// The settings table holds a single row under this id.
pub const SINGLETON_ID: &str = "default";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "brand_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub brand_name: String,
    pub logo_url: String,
    pub store_address: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub google_maps_embed_url: String,
    pub loyalty_bronze_min: i64,
    pub loyalty_silver_min: i64,
    pub loyalty_gold_min: i64,
    pub loyalty_diamond_min: i64,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub size_l_price: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BrandSettings {
    fn from(model: Model) -> Self {
        BrandSettings {
            brand_name: model.brand_name,
            logo_url: model.logo_url,
            store_address: model.store_address,
            contact_phone: model.contact_phone,
            contact_email: model.contact_email,
            google_maps_embed_url: model.google_maps_embed_url,
            loyalty_bronze_min: super::unsigned(model.loyalty_bronze_min),
            loyalty_silver_min: super::unsigned(model.loyalty_silver_min),
            loyalty_gold_min: super::unsigned(model.loyalty_gold_min),
            loyalty_diamond_min: super::unsigned(model.loyalty_diamond_min),
            size_l_price: model.size_l_price,
        }
    }
}

impl From<BrandSettings> for ActiveModel {
    fn from(settings: BrandSettings) -> Self {
        ActiveModel {
            id: Set(SINGLETON_ID.to_string()),
            brand_name: Set(settings.brand_name),
            logo_url: Set(settings.logo_url),
            store_address: Set(settings.store_address),
            contact_phone: Set(settings.contact_phone),
            contact_email: Set(settings.contact_email),
            google_maps_embed_url: Set(settings.google_maps_embed_url),
            loyalty_bronze_min: Set(super::signed(settings.loyalty_bronze_min)),
            loyalty_silver_min: Set(super::signed(settings.loyalty_silver_min)),
            loyalty_gold_min: Set(super::signed(settings.loyalty_gold_min)),
            loyalty_diamond_min: Set(super::signed(settings.loyalty_diamond_min)),
            size_l_price: Set(settings.size_l_price),
            created_at: NotSet,
        }
    }
}
