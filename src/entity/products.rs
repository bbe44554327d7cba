use sea_orm::{ActiveValue::NotSet, Set, entity::prelude::*};

use crate::models::Product;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub original_price: Option<Decimal>,
    pub category: String,
    pub image: Option<String>,
    pub rating: f64,
    pub review_count: i32,
    pub is_available: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Product {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            original_price: model.original_price,
            category: model.category,
            image: model.image,
            rating: model.rating,
            review_count: super::unsigned(i64::from(model.review_count)),
            is_available: model.is_available,
        }
    }
}

impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            original_price: Set(product.original_price),
            category: Set(product.category),
            image: Set(product.image),
            rating: Set(product.rating),
            review_count: Set(i32::try_from(product.review_count).unwrap_or(i32::MAX)),
            is_available: Set(product.is_available),
            created_at: NotSet,
        }
    }
}
