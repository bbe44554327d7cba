use chrono::Utc;
use sea_orm::{Set, entity::prelude::*};

use crate::models::Order;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: Option<String>,
    pub customer_name: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub items: Json,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub subtotal: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub discount: Decimal,
    pub discount_code: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total: Decimal,
    pub status: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub payment_method: Option<String>,
    pub note: Option<String>,
    pub points_awarded: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Order {
    fn from(model: Model) -> Self {
        Order {
            id: model.id,
            user_id: model.user_id,
            customer_name: model.customer_name,
            items: super::from_json(model.items, "orders.items"),
            subtotal: model.subtotal,
            discount: model.discount,
            discount_code: model.discount_code,
            total: model.total,
            status: model.status.parse().unwrap_or_default(),
            created_at: model.created_at.with_timezone(&Utc),
            address: model.address,
            phone: model.phone,
            payment_method: model.payment_method,
            note: model.note,
            points_awarded: super::unsigned(model.points_awarded),
        }
    }
}

impl From<Order> for ActiveModel {
    fn from(order: Order) -> Self {
        ActiveModel {
            id: Set(order.id),
            user_id: Set(order.user_id),
            customer_name: Set(order.customer_name),
            items: Set(super::to_json(&order.items)),
            subtotal: Set(order.subtotal),
            discount: Set(order.discount),
            discount_code: Set(order.discount_code),
            total: Set(order.total),
            status: Set(order.status.as_str().to_string()),
            address: Set(order.address),
            phone: Set(order.phone),
            payment_method: Set(order.payment_method),
            note: Set(order.note),
            points_awarded: Set(super::signed(order.points_awarded)),
            created_at: Set(order.created_at.into()),
            updated_at: Set(Utc::now().into()),
        }
    }
}
