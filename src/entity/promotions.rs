use sea_orm::{ActiveValue::NotSet, Set, entity::prelude::*};

use crate::models::{DiscountCode, DiscountType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "promotions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub code: String,
    pub discount_type: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub value: Decimal,
    pub start_date: Date,
    pub end_date: Date,
    pub is_active: bool,
    #[sea_orm(column_type = "JsonBinary")]
    pub applicable_product_ids: Json,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for DiscountCode {
    fn from(model: Model) -> Self {
        let discount_type = if model.discount_type.eq_ignore_ascii_case("fixed") {
            DiscountType::Fixed
        } else {
            DiscountType::Percent
        };
        DiscountCode {
            id: model.id,
            code: model.code,
            discount_type,
            value: model.value,
            start_date: model.start_date,
            end_date: model.end_date,
            is_active: model.is_active,
            applicable_product_ids: super::from_json(
                model.applicable_product_ids,
                "promotions.applicable_product_ids",
            ),
            description: model.description,
        }
    }
}

impl From<DiscountCode> for ActiveModel {
    fn from(code: DiscountCode) -> Self {
        ActiveModel {
            id: Set(code.id),
            code: Set(code.code),
            discount_type: Set(code.discount_type.as_str().to_string()),
            value: Set(code.value),
            start_date: Set(code.start_date),
            end_date: Set(code.end_date),
            is_active: Set(code.is_active),
            applicable_product_ids: Set(super::to_json(&code.applicable_product_ids)),
            description: Set(code.description),
            created_at: NotSet,
        }
    }
}
