use chrono::Utc;
use sea_orm::{ActiveValue::NotSet, Set, entity::prelude::*};

use crate::models::JobApplication;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "job_applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub experience: String,
    pub note: String,
    pub cv_file_name: Option<String>,
    pub submitted_at: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for JobApplication {
    fn from(model: Model) -> Self {
        JobApplication {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            position: model.position,
            experience: model.experience,
            note: model.note,
            cv_file_name: model.cv_file_name,
            submitted_at: model.submitted_at.with_timezone(&Utc),
        }
    }
}

impl From<JobApplication> for ActiveModel {
    fn from(application: JobApplication) -> Self {
        ActiveModel {
            id: Set(application.id),
            name: Set(application.name),
            email: Set(application.email),
            phone: Set(application.phone),
            position: Set(application.position),
            experience: Set(application.experience),
            note: Set(application.note),
            cv_file_name: Set(application.cv_file_name),
            submitted_at: Set(application.submitted_at.into()),
            created_at: NotSet,
        }
    }
}
