use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Job, JobApplication};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub job_type: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, ToSchema)]
pub struct JobList {
    pub items: Vec<Job>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub note: String,
    pub cv_file_name: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ApplicationList {
    pub items: Vec<JobApplication>,
}
