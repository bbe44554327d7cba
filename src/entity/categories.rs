use sea_orm::{ActiveValue::NotSet, Set, entity::prelude::*};

use crate::models::Category;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub key: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Category {
            id: model.id,
            name: model.name,
            key: model.key,
        }
    }
}

impl From<Category> for ActiveModel {
    fn from(category: Category) -> Self {
        ActiveModel {
            id: Set(category.id),
            name: Set(category.name),
            key: Set(category.key),
            created_at: NotSet,
        }
    }
}
