use sea_orm::{ActiveValue::NotSet, Set, entity::prelude::*};

use crate::models::User;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: String,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub loyalty_points: i64,
    pub password_hash: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role.parse().unwrap_or_default(),
            avatar: model.avatar,
            phone: model.phone,
            address: model.address,
            loyalty_points: super::unsigned(model.loyalty_points),
            password_hash: model.password_hash,
        }
    }
}

impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        ActiveModel {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email),
            role: Set(user.role.as_str().to_string()),
            avatar: Set(user.avatar),
            phone: Set(user.phone),
            address: Set(user.address),
            loyalty_points: Set(super::signed(user.loyalty_points)),
            password_hash: Set(user.password_hash),
            created_at: NotSet,
        }
    }
}
