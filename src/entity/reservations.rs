use chrono::Utc;
use sea_orm::{Set, entity::prelude::*};

use crate::models::Reservation;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub note: Option<String>,
    pub party_size: i32,
    pub table_id: String,
    pub datetime: DateTimeWithTimeZone,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Reservation {
    fn from(model: Model) -> Self {
        Reservation {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            phone: model.phone,
            email: model.email,
            note: model.note,
            party_size: super::unsigned(i64::from(model.party_size)),
            table_id: model.table_id,
            datetime: model.datetime.with_timezone(&Utc),
            status: model.status.parse().unwrap_or_default(),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<Reservation> for ActiveModel {
    fn from(reservation: Reservation) -> Self {
        ActiveModel {
            id: Set(reservation.id),
            user_id: Set(reservation.user_id),
            name: Set(reservation.name),
            phone: Set(reservation.phone),
            email: Set(reservation.email),
            note: Set(reservation.note),
            party_size: Set(i32::try_from(reservation.party_size).unwrap_or(i32::MAX)),
            table_id: Set(reservation.table_id),
            datetime: Set(reservation.datetime.into()),
            status: Set(reservation.status.as_str().to_string()),
            created_at: Set(reservation.created_at.into()),
        }
    }
}
