use sea_orm::{ActiveValue::NotSet, Set, entity::prelude::*};

use crate::models::Review;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub product_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub rating: i16,
    pub comment: String,
    pub date: Date,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id"
    )]
    Products,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Review {
    fn from(model: Model) -> Self {
        Review {
            id: model.id,
            product_id: model.product_id,
            user_id: model.user_id,
            user_name: model.user_name,
            user_avatar: model.user_avatar,
            rating: u8::try_from(model.rating.clamp(0, 5)).unwrap_or_default(),
            comment: model.comment,
            date: model.date,
        }
    }
}

impl From<Review> for ActiveModel {
    fn from(review: Review) -> Self {
        ActiveModel {
            id: Set(review.id),
            product_id: Set(review.product_id),
            user_id: Set(review.user_id),
            user_name: Set(review.user_name),
            user_avatar: Set(review.user_avatar),
            rating: Set(i16::from(review.rating)),
            comment: Set(review.comment),
            date: Set(review.date),
            created_at: NotSet,
        }
    }
}
