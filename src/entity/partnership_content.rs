use sea_orm::{ActiveValue::NotSet, Set, entity::prelude::*};

use crate::models::PartnershipContent;

use super::brand_settings::SINGLETON_ID;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "partnership_content")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub content: Json,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PartnershipContent {
    fn from(model: Model) -> Self {
        super::from_json(model.content, "partnership_content.content")
    }
}

impl From<PartnershipContent> for ActiveModel {
    fn from(content: PartnershipContent) -> Self {
        ActiveModel {
            id: Set(SINGLETON_ID.to_string()),
            content: Set(super::to_json(&content)),
            created_at: NotSet,
        }
    }
}
