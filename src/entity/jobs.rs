use sea_orm::{ActiveValue::NotSet, Set, entity::prelude::*};

use crate::models::Job;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub location: String,
    pub job_type: String,
    pub salary: String,
    pub description: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub requirements: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub benefits: Json,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Job {
    fn from(model: Model) -> Self {
        Job {
            id: model.id,
            title: model.title,
            location: model.location,
            job_type: model.job_type,
            salary: model.salary,
            description: model.description,
            requirements: super::from_json(model.requirements, "jobs.requirements"),
            benefits: super::from_json(model.benefits, "jobs.benefits"),
            is_active: model.is_active,
        }
    }
}

impl From<Job> for ActiveModel {
    fn from(job: Job) -> Self {
        ActiveModel {
            id: Set(job.id),
            title: Set(job.title),
            location: Set(job.location),
            job_type: Set(job.job_type),
            salary: Set(job.salary),
            description: Set(job.description),
            requirements: Set(super::to_json(&job.requirements)),
            benefits: Set(super::to_json(&job.benefits)),
            is_active: Set(job.is_active),
            created_at: NotSet,
        }
    }
}
