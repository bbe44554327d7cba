use chrono::Utc;
use sea_orm::{ActiveValue::NotSet, Set, entity::prelude::*};

use crate::models::Banner;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "banners")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub cta_text: String,
    pub link_section: String,
    pub ends_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Banner {
    fn from(model: Model) -> Self {
        Banner {
            id: model.id,
            title: model.title,
            subtitle: model.subtitle,
            image_url: model.image_url,
            cta_text: model.cta_text,
            link_section: model.link_section,
            ends_at: model.ends_at.map(|at| at.with_timezone(&Utc)),
        }
    }
}

impl From<Banner> for ActiveModel {
    fn from(banner: Banner) -> Self {
        ActiveModel {
            id: Set(banner.id),
            title: Set(banner.title),
            subtitle: Set(banner.subtitle),
            image_url: Set(banner.image_url),
            cta_text: Set(banner.cta_text),
            link_section: Set(banner.link_section),
            ends_at: Set(banner.ends_at.map(Into::into)),
            created_at: NotSet,
        }
    }
}
