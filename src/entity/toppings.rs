use sea_orm::{ActiveValue::NotSet, Set, entity::prelude::*};

use crate::models::Topping;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "toppings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Topping {
    fn from(model: Model) -> Self {
        Topping {
            id: model.id,
            name: model.name,
            price: model.price,
        }
    }
}

impl From<Topping> for ActiveModel {
    fn from(topping: Topping) -> Self {
        ActiveModel {
            id: Set(topping.id),
            name: Set(topping.name),
            price: Set(topping.price),
            created_at: NotSet,
        }
    }
}
